//! Lexical number rules.
//!
//! Values are strings; these helpers decide whether a string *looks* like
//! an integer or a real and produce the canonical text stored when a value
//! is built from a number.

/// Largest magnitude at which every integral `f64` is exactly representable.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

fn trim_blanks(text: &str) -> &str {
    text.trim_matches(|c| c == ' ' || c == '\t' || c == '\n')
}

/// Parse `text` as an integer: optional sign followed by decimal digits,
/// surrounding blanks allowed.
///
/// Returns `None` for anything else, including integers that overflow
/// `i64` (those still classify as reals).
pub fn parse_integer(text: &str) -> Option<i64> {
    let body = trim_blanks(text);
    let digits = body.strip_prefix(['+', '-']).unwrap_or(body);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.strip_prefix('+').unwrap_or(body).parse().ok()
}

/// Parse `text` as a decimal real: `[+-]digits[.digits][e[+-]digits]` or
/// `[+-].digits[e[+-]digits]`, surrounding blanks allowed.
///
/// Integers are reals too. `inf`, `nan` and hexadecimal forms are not.
pub fn parse_real(text: &str) -> Option<f64> {
    let body = trim_blanks(text);
    if !is_decimal_literal(body) {
        return None;
    }
    body.parse().ok()
}

fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let frac_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        digits += pos - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}

/// Canonical text for a number.
///
/// Integral values that an `f64` holds exactly print without a fraction;
/// everything else uses the shortest text that parses back to the same
/// `f64`, switching to exponent form for very large or very small
/// magnitudes.
#[expect(
    clippy::cast_possible_truncation,
    reason = "guarded by EXACT_INTEGER_LIMIT"
)]
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        return "nan".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if number.fract() == 0.0 && number.abs() < EXACT_INTEGER_LIMIT {
        return (number as i64).to_string();
    }
    let magnitude = number.abs();
    if !(1e-5..1e16).contains(&magnitude) {
        return format!("{number:e}");
    }
    format!("{number}")
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer(" -7 "), Some(-7));
        assert_eq!(parse_integer("+3"), Some(3));
        assert_eq!(parse_integer("3.0"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer("12abc"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn reals() {
        assert_eq!(parse_real("1.5"), Some(1.5));
        assert_eq!(parse_real(".5"), Some(0.5));
        assert_eq!(parse_real("5."), Some(5.0));
        assert_eq!(parse_real("1e3"), Some(1000.0));
        assert_eq!(parse_real("-2.5E-1"), Some(-0.25));
        assert_eq!(parse_real("10"), Some(10.0));
        assert_eq!(parse_real("99999999999999999999").unwrap(), 1e20);
        assert_eq!(parse_real("."), None);
        assert_eq!(parse_real("1e"), None);
        assert_eq!(parse_real("inf"), None);
        assert_eq!(parse_real("nan"), None);
        assert_eq!(parse_real("0x10"), None);
        assert_eq!(parse_real("abc"), None);
    }

    #[test]
    fn canonical_text() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-1.25), "-1.25");
        assert_eq!(format_number(1e20), "1e20");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NAN), "nan");
    }
}
