//! Pattern selection.

use awk_ir::Pattern;

use crate::Interpreter;

impl<'p> Interpreter<'p> {
    /// Whether `pattern` selects the current record.
    ///
    /// A range becomes active on a record matching its start and inactive
    /// after a record matching its end; both may be the same record.
    pub(crate) fn pattern_matches(&mut self, pattern: &'p Pattern) -> bool {
        match pattern {
            Pattern::All => true,
            Pattern::Begin | Pattern::End => false,
            Pattern::Regex(source) => self.match_record(source),
            Pattern::Expr(expr) => self.eval(expr).to_bool(),
            Pattern::Not(inner) => !self.pattern_matches(inner),
            Pattern::And(left, right) => self.pattern_matches(left) && self.pattern_matches(right),
            Pattern::Or(left, right) => self.pattern_matches(left) || self.pattern_matches(right),
            Pattern::Range { id, start, end } => {
                let active = self.ranges.get(*id).copied().unwrap_or(false);
                if !active && !self.pattern_matches(start) {
                    return false;
                }
                let ended = self.pattern_matches(end);
                self.set_range(*id, !ended);
                true
            }
        }
    }

    fn set_range(&mut self, id: usize, active: bool) {
        if id >= self.ranges.len() {
            self.ranges.resize(id + 1, false);
        }
        self.ranges[id] = active;
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use awk_parse::parse;

    use crate::{buffer_handler, InterpreterBuilder};

    fn selected(source: &str, records: &[&str]) -> Vec<bool> {
        let program = parse(source).unwrap();
        let mut interp = InterpreterBuilder::new(&program)
            .print_handler(buffer_handler())
            .echo_errors(false)
            .build();
        let pattern = &program.items[0].pattern;
        records
            .iter()
            .map(|record| {
                interp.set_record((*record).to_string());
                interp.pattern_matches(pattern)
            })
            .collect()
    }

    #[test]
    fn range_spans_start_to_end() {
        let hits = selected("/b/,/d/", &["a", "b", "c", "d", "e", "b"]);
        assert_eq!(hits, [false, true, true, true, false, true]);
    }

    #[test]
    fn range_may_open_and_close_on_one_record() {
        let hits = selected("/x/,/x/", &["x", "y", "x"]);
        assert_eq!(hits, [true, false, true]);
    }

    #[test]
    fn compound_patterns() {
        assert_eq!(selected("!/a/", &["a", "b"]), [false, true]);
        assert_eq!(selected("/a/ && /b/", &["ab", "a"]), [true, false]);
        assert_eq!(selected("$1 > 2 || /z/", &["3", "1", "z"]), [true, false, true]);
    }
}
