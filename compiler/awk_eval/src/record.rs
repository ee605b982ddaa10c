//! The current input record and its fields.
//!
//! Fields are split eagerly whenever `$0` changes. Assigning a field or
//! `NF` rebuilds `$0` by joining the fields with `OFS`.

use regex::Regex;

/// Highest field number a `$n` or `NF` assignment may create.
pub const MAX_FIELDS: usize = 1 << 20;

/// How `FS` (or the separator given to `split`) divides text.
#[derive(Clone, Copy, Debug)]
pub enum FieldSeparator<'a> {
    /// `" "`: runs of blanks and newlines; leading and trailing ones ignored.
    Whitespace,
    /// `""`: every character is a field.
    Chars,
    /// Any other single character, taken literally.
    Char(char),
    Regex(&'a Regex),
}

impl FieldSeparator<'_> {
    /// Split `text`. Empty fields are dropped.
    pub fn split(self, text: &str) -> Vec<String> {
        let non_empty = |field: &&str| !field.is_empty();
        match self {
            FieldSeparator::Whitespace => text
                .split([' ', '\t', '\n'])
                .filter(non_empty)
                .map(str::to_string)
                .collect(),
            FieldSeparator::Chars => text.chars().map(String::from).collect(),
            FieldSeparator::Char(sep) => text
                .split(sep)
                .filter(non_empty)
                .map(str::to_string)
                .collect(),
            FieldSeparator::Regex(regex) => regex
                .split(text)
                .filter(non_empty)
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Classification of a separator string that needs no regex.
pub fn simple_separator(fs: &str) -> Option<FieldSeparator<'static>> {
    let mut chars = fs.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Some(FieldSeparator::Chars),
        (Some(' '), None) => Some(FieldSeparator::Whitespace),
        (Some(c), None) if c != '\\' => Some(FieldSeparator::Char(c)),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    text: String,
    /// `$1..$NF`
    fields: Vec<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `$index`; `""` past the last field.
    pub fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.text,
            n => self.fields.get(n - 1).map_or("", String::as_str),
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Install a new `$0` already split into `fields`.
    pub fn replace(&mut self, text: String, fields: Vec<String>) {
        self.text = text;
        self.fields = fields;
    }

    /// Assign `$index` for `index >= 1`, padding with empty fields.
    pub fn set_field(&mut self, index: usize, value: String, ofs: &str) {
        debug_assert!(index >= 1, "$0 is replaced, not set");
        if index > self.fields.len() {
            self.fields.resize(index, String::new());
        }
        self.fields[index - 1] = value;
        self.rebuild(ofs);
    }

    /// Assignment to `NF`: truncate or pad, then rebuild.
    pub fn set_field_count(&mut self, count: usize, ofs: &str) {
        self.fields.resize(count, String::new());
        self.rebuild(ofs);
    }

    fn rebuild(&mut self, ofs: &str) {
        self.text = self.fields.join(ofs);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn split(fs: &str, text: &str) -> Vec<String> {
        match simple_separator(fs) {
            Some(sep) => sep.split(text),
            None => FieldSeparator::Regex(&Regex::new(fs).unwrap()).split(text),
        }
    }

    #[test]
    fn default_separator_is_blank_runs() {
        assert_eq!(split(" ", "  a \t b\nc  "), vec!["a", "b", "c"]);
        assert!(split(" ", "   ").is_empty());
    }

    #[test]
    fn single_character_is_literal() {
        assert_eq!(split(":", "a:b:c"), vec!["a", "b", "c"]);
        assert_eq!(split(".", "1.2"), vec!["1", "2"]);
        assert_eq!(split("\t", "x\ty"), vec!["x", "y"]);
    }

    #[test]
    fn empty_fields_are_dropped() {
        assert_eq!(split(",", "a,,b,"), vec!["a", "b"]);
        assert_eq!(split("[,;]+", "a,;b"), vec!["a", "b"]);
    }

    #[test]
    fn empty_separator_splits_characters() {
        assert_eq!(split("", "abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn field_assignment_rebuilds_record() {
        let mut record = Record::new();
        record.replace("a b c".to_string(), split(" ", "a b c"));
        assert_eq!(record.field(2), "b");
        assert_eq!(record.field(7), "");

        record.set_field(2, "X".to_string(), "-");
        assert_eq!(record.text(), "a-X-c");

        record.set_field(5, "e".to_string(), " ");
        assert_eq!(record.text(), "a X c  e");
        assert_eq!(record.field_count(), 5);
    }

    #[test]
    fn field_count_truncates_and_pads() {
        let mut record = Record::new();
        record.replace("a b c".to_string(), split(" ", "a b c"));
        record.set_field_count(2, ",");
        assert_eq!(record.text(), "a,b");
        record.set_field_count(4, ",");
        assert_eq!(record.text(), "a,b,,");
    }
}
