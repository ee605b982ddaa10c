//! Compiled regular expressions, keyed by source text.
//!
//! Dynamic regexes (strings used where a regex is expected) are compiled on
//! first use, so the same text is only compiled once per run.

use regex::Regex;
use rustc_hash::FxHashMap;

use awk_value::{invalid_regex, EvalError};

#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: FxHashMap<String, Regex>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, pattern: &str) -> Result<&Regex, EvalError> {
        if !self.compiled.contains_key(pattern) {
            let regex = Regex::new(pattern).map_err(|err| invalid_regex(pattern, err))?;
            self.compiled.insert(pattern.to_string(), regex);
        }
        self.compiled
            .get(pattern)
            .ok_or_else(|| invalid_regex(pattern, "missing from cache"))
    }

    pub fn is_match(&mut self, pattern: &str, text: &str) -> Result<bool, EvalError> {
        Ok(self.get(pattern)?.is_match(text))
    }

    /// Leftmost match as a 1-based character position and character length.
    pub fn find_chars(
        &mut self,
        pattern: &str,
        text: &str,
    ) -> Result<Option<(usize, usize)>, EvalError> {
        let Some(found) = self.get(pattern)?.find(text) else {
            return Ok(None);
        };
        let start = text[..found.start()].chars().count() + 1;
        let length = found.as_str().chars().count();
        Ok(Some((start, length)))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
