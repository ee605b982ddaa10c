//! Builtin functions.
//!
//! Arguments arrive as unforced operands so `split`, `sub` and `gsub` can
//! write to their target and regex literals reach `match`/`split`/`sub`
//! as patterns instead of being matched against `$0`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use smallvec::SmallVec;

use awk_ir::{Builtin, Expr};
use awk_value::{invalid_arg_count, lhs_not_a_variable, not_a_variable, Value};

use crate::format::sprintf;
use crate::record::FieldSeparator;
use crate::{Interpreter, Operand, Place};

type Operands<'p> = smallvec::IntoIter<[Operand<'p>; 4]>;

impl<'p> Interpreter<'p> {
    pub(crate) fn call_builtin(&mut self, builtin: Builtin, args: &'p [Expr]) -> Value {
        if !builtin.accepts(args.len()) {
            self.report(invalid_arg_count(builtin.name()));
            return Value::empty();
        }
        let operands: SmallVec<[Operand<'p>; 4]> =
            args.iter().map(|arg| self.eval_operand(arg)).collect();
        tracing::trace!(%builtin, args = operands.len(), "builtin");
        let mut ops = operands.into_iter();

        match builtin {
            Builtin::Length => self.length(ops.next()),
            Builtin::Index => {
                let haystack = self.value(ops.next());
                let needle = self.value(ops.next());
                Value::from(char_index(haystack.as_str(), needle.as_str()))
            }
            Builtin::Substr => {
                let text = self.value(ops.next());
                let start = self.value(ops.next()).to_real();
                let length = ops.next().map(|operand| self.force(operand).to_real());
                Value::from(substr(text.as_str(), start, length))
            }
            Builtin::Split => self.split(ops),
            Builtin::Sub => self.substitute(ops, false),
            Builtin::Gsub => self.substitute(ops, true),
            Builtin::Match => self.match_fn(ops),
            Builtin::Sprintf => {
                let values: SmallVec<[Value; 8]> = ops.map(|operand| self.force(operand)).collect();
                match values.split_first() {
                    Some((format, rest)) => Value::from(sprintf(format.as_str(), rest)),
                    None => Value::empty(),
                }
            }
            Builtin::Tolower => Value::from(self.value(ops.next()).as_str().to_lowercase()),
            Builtin::Toupper => Value::from(self.value(ops.next()).as_str().to_uppercase()),
            Builtin::Atan2 => {
                let y = self.real(ops.next());
                let x = self.real(ops.next());
                Value::real(y.atan2(x))
            }
            Builtin::Cos => Value::real(self.real(ops.next()).cos()),
            Builtin::Exp => Value::real(self.real(ops.next()).exp()),
            Builtin::Log => Value::real(self.real(ops.next()).ln()),
            Builtin::Sin => Value::real(self.real(ops.next()).sin()),
            Builtin::Sqrt => Value::real(self.real(ops.next()).sqrt()),
            Builtin::Int => {
                let value = self.value(ops.next());
                if value.is_integer() {
                    Value::integer(value.to_integer())
                } else {
                    Value::real(value.to_real().trunc())
                }
            }
            Builtin::Rand => Value::real(self.rng.gen::<f64>()),
            Builtin::Srand => self.srand(ops.next()),
            Builtin::Close => {
                let name = self.value(ops.next());
                let status = self.streams.close(name.as_str());
                self.io_status(status)
            }
            Builtin::Fflush => {
                let name = ops.next().map(|operand| self.force(operand));
                let result = self.streams.flush(name.as_ref().map(Value::as_str));
                self.io_status(result.map(|()| 0))
            }
            Builtin::System => {
                let command = self.value(ops.next());
                let status = self.streams.system(command.as_str());
                self.io_status(status)
            }
        }
    }

    fn value(&mut self, operand: Option<Operand<'p>>) -> Value {
        match operand {
            Some(operand) => self.force(operand),
            None => Value::empty(),
        }
    }

    fn real(&mut self, operand: Option<Operand<'p>>) -> f64 {
        self.value(operand).to_real()
    }

    fn io_status(&mut self, result: Result<i64, crate::IoError>) -> Value {
        match result {
            Ok(status) => Value::integer(status),
            Err(err) => {
                self.report(err.into());
                Value::integer(-1)
            }
        }
    }

    /// `length`, `length(s)` or `length(arr)`.
    fn length(&mut self, operand: Option<Operand<'p>>) -> Value {
        let Some(operand) = operand else {
            return Value::from(self.record.text().chars().count());
        };
        if let Operand::Place(Place::Scalar(name)) = &operand {
            let count = self.env.lookup(name).map_or(0, crate::Variable::element_count);
            if count > 0 {
                return Value::from(count);
            }
        }
        Value::from(self.force(operand).as_str().chars().count())
    }

    /// `split(s, arr [, sep])`
    fn split(&mut self, mut ops: Operands<'p>) -> Value {
        let text = self.value(ops.next());
        let Some(Operand::Place(Place::Scalar(array))) = ops.next() else {
            self.report(not_a_variable());
            return Value::integer(0);
        };
        let parts = match ops.next() {
            Some(Operand::Regex(pattern)) => match self.regexes.get(pattern) {
                Ok(regex) => FieldSeparator::Regex(regex).split(text.as_str()),
                Err(err) => {
                    self.report(err);
                    vec![text.into_string()]
                }
            },
            Some(separator) => {
                let separator = self.force(separator);
                self.split_text(text.as_str(), separator.as_str())
            }
            None => {
                let fs = self.env.value_of(&self.names.fs);
                self.split_text(text.as_str(), fs.as_str())
            }
        };

        let variable = self.env.lookup_or_create(&array);
        variable.clear_elements();
        for (index, part) in parts.iter().enumerate() {
            variable.set_element(&(index + 1).to_string(), Value::from(part.as_str()));
        }
        Value::from(parts.len())
    }

    /// `sub(re, repl [, target])` and `gsub(...)`.
    fn substitute(&mut self, mut ops: Operands<'p>, global: bool) -> Value {
        let pattern = match ops.next() {
            Some(operand) => self.regex_source(operand),
            None => String::new(),
        };
        let replacement = self.value(ops.next());
        let place = match ops.next() {
            None => Place::Field(0),
            Some(Operand::Place(place)) => place,
            Some(_) => {
                self.report(lhs_not_a_variable());
                return Value::integer(0);
            }
        };
        let text = self.get_place(&place);

        let (result, count) = match self.regexes.get(&pattern) {
            Ok(regex) => replace_matches(regex, text.as_str(), replacement.as_str(), global),
            Err(err) => {
                self.report(err);
                return Value::integer(0);
            }
        };
        if count > 0 {
            self.assign(&place, Value::from(result));
        }
        Value::from(count)
    }

    /// `match(s, re)`: sets `RSTART` and `RLENGTH`, returns `RSTART`.
    fn match_fn(&mut self, mut ops: Operands<'p>) -> Value {
        let text = self.value(ops.next());
        let pattern = match ops.next() {
            Some(operand) => self.regex_source(operand),
            None => String::new(),
        };
        let found = match self.regexes.find_chars(&pattern, text.as_str()) {
            Ok(found) => found,
            Err(err) => {
                self.report(err);
                None
            }
        };
        let (start, length) = match found {
            Some((start, length)) => (Value::from(start), Value::from(length)),
            None => (Value::integer(0), Value::integer(-1)),
        };
        let (rstart, rlength) = (self.names.rstart.clone(), self.names.rlength.clone());
        self.assign(&Place::Scalar(rstart), start.clone());
        self.assign(&Place::Scalar(rlength), length);
        start
    }

    /// `srand([seed])`: reseed, returning the previous seed.
    #[expect(clippy::cast_sign_loss, reason = "any bit pattern is a usable seed")]
    fn srand(&mut self, operand: Option<Operand<'p>>) -> Value {
        let seed = match operand {
            Some(operand) => self.force(operand),
            None => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |elapsed| elapsed.as_secs());
                Value::integer(i64::try_from(now).unwrap_or_default())
            }
        };
        self.rng = StdRng::seed_from_u64(seed.to_integer() as u64);
        tracing::debug!(%seed, "srand");
        std::mem::replace(&mut self.seed, seed)
    }
}

/// 1-based character position of `needle` in `haystack`, `0` if absent.
fn char_index(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .map_or(0, |byte| haystack[..byte].chars().count() + 1)
}

/// Characters `start..start+length` (1-based, rounded), clamped to the text.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "bounds are clamped to 1..=len+1 before conversion"
)]
fn substr(text: &str, start: f64, length: Option<f64>) -> String {
    let count = text.chars().count() as f64;
    let start = start.round();
    let end = match length {
        Some(length) => start + length.round(),
        None => f64::INFINITY,
    };
    let from = start.max(1.0);
    let to = end.min(count + 1.0);
    if to.is_nan() || to <= from {
        return String::new();
    }
    let skip = from as usize - 1;
    let take = (to - from) as usize;
    text.chars().skip(skip).take(take).collect()
}

/// Replace the first (or every) match of `regex` in `text`.
///
/// An empty match directly after the previous match is skipped. Returns the
/// new text and the number of replacements.
fn replace_matches(regex: &Regex, text: &str, replacement: &str, global: bool) -> (String, usize) {
    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    let mut count = 0;
    let mut previous_end = None;
    for found in regex.find_iter(text) {
        if found.is_empty() && previous_end == Some(found.start()) {
            continue;
        }
        result.push_str(&text[copied..found.start()]);
        expand_replacement(replacement, found.as_str(), &mut result);
        copied = found.end();
        previous_end = Some(found.end());
        count += 1;
        if !global {
            break;
        }
    }
    result.push_str(&text[copied..]);
    (result, count)
}

/// `&` is the matched text, `\&` a literal ampersand and `\\` a backslash.
fn expand_replacement(replacement: &str, matched: &str, out: &mut String) {
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next @ ('&' | '\\')) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            },
            '&' => out.push_str(matched),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn index_counts_characters() {
        assert_eq!(char_index("héllo", "llo"), 3);
        assert_eq!(char_index("abc", "z"), 0);
        assert_eq!(char_index("abc", ""), 1);
    }

    #[test]
    fn substr_clamps() {
        assert_eq!(substr("hello", 2.0, Some(3.0)), "ell");
        assert_eq!(substr("hello", 0.0, None), "hello");
        assert_eq!(substr("hello", -1.0, Some(3.0)), "h");
        assert_eq!(substr("hello", 4.0, Some(10.0)), "lo");
        assert_eq!(substr("hello", 6.0, None), "");
        assert_eq!(substr("hello", 1.5, Some(1.0)), "e");
        assert_eq!(substr("hello", 2.0, Some(-1.0)), "");
    }

    #[test]
    fn replacement_escapes() {
        let mut out = String::new();
        expand_replacement(r"[&] \& \\", "x", &mut out);
        assert_eq!(out, r"[x] & \");
    }

    #[test]
    fn first_and_global_replacement() {
        let regex = Regex::new("o").unwrap();
        assert_eq!(replace_matches(&regex, "foo", "0", false), ("f0o".to_string(), 1));
        assert_eq!(replace_matches(&regex, "foo", "0", true), ("f00".to_string(), 2));
        assert_eq!(replace_matches(&regex, "bar", "0", true), ("bar".to_string(), 0));
    }

    #[test]
    fn empty_matches_between_characters() {
        let regex = Regex::new("x*").unwrap();
        assert_eq!(replace_matches(&regex, "abc", "-", true), ("-a-b-c-".to_string(), 4));
        assert_eq!(replace_matches(&regex, "axb", "-", true), ("-a-b-".to_string(), 3));
    }
}
