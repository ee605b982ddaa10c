//! Stack growth for deep recursion.
//!
//! Two places in awki recurse on input the user controls: the parser
//! descending into nested groups and blocks, and the interpreter calling
//! user-defined functions (which may recurse without bound). Both wrap the
//! recursive step in [`ensure_sufficient_stack`], which moves execution onto
//! a freshly allocated segment when the current one runs low.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nesting_depth(text: &[u8]) -> usize {
        ensure_sufficient_stack(|| match text.split_first() {
            Some((b'(', rest)) => 1 + nesting_depth(rest),
            _ => 0,
        })
    }

    #[test]
    fn shallow_nesting() {
        assert_eq!(nesting_depth(b"((("), 3);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let text = vec![b'('; 200_000];
        assert_eq!(nesting_depth(&text), 200_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
