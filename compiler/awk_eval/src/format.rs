//! `printf`-style formatting.
//!
//! Supports the flags `-+ #0`, `*` widths and precisions, and the
//! conversions `c d i o u x X e E f F g G s %`. A missing argument reads as
//! `""`; an unknown conversion is copied through. Widths are capped at
//! [`MAX_WIDTH`] and precisions at [`MAX_PRECISION`].

use awk_value::Value;

pub const MAX_WIDTH: usize = 65_535;
pub const MAX_PRECISION: usize = 4096;

#[derive(Clone, Copy, Debug, Default)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
}

struct Args<'a> {
    values: &'a [Value],
    next: usize,
}

impl Args<'_> {
    fn take(&mut self) -> Value {
        let value = self.values.get(self.next).cloned().unwrap_or_default();
        self.next += 1;
        value
    }

    /// A `*` width or precision; negative widths mean left-justify.
    fn star(&mut self) -> i64 {
        self.take().to_integer()
    }
}

/// Format `args` according to `format`.
pub fn sprintf(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut args = Args {
        values: args,
        next: 0,
    };
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        let mut raw = String::from("%");
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '#' => spec.alternate = true,
                '0' => spec.zero = true,
                _ => break,
            }
            raw.push(flag);
            chars.next();
        }

        if chars.peek() == Some(&'*') {
            chars.next();
            raw.push('*');
            let width = args.star();
            if width < 0 {
                spec.left = true;
            }
            spec.width = usize::try_from(width.unsigned_abs()).unwrap_or(usize::MAX);
        } else {
            spec.width = take_number(&mut chars, &mut raw);
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            raw.push('.');
            if chars.peek() == Some(&'*') {
                chars.next();
                raw.push('*');
                spec.precision = usize::try_from(args.star()).ok();
            } else {
                spec.precision = Some(take_number(&mut chars, &mut raw));
            }
        }
        spec.width = spec.width.min(MAX_WIDTH);
        spec.precision = spec.precision.map(|precision| precision.min(MAX_PRECISION));

        let Some(conversion) = chars.next() else {
            out.push_str(&raw);
            break;
        };

        match conversion {
            '%' => out.push('%'),
            'c' => {
                let arg = args.take();
                let text = match arg.as_number() {
                    Some(_) => char_from_code(arg.to_integer()),
                    None => arg.as_str().chars().take(1).collect(),
                };
                pad(&mut out, &text, spec, false);
            }
            's' => {
                let arg = args.take();
                let text: String = match spec.precision {
                    Some(limit) => arg.as_str().chars().take(limit).collect(),
                    None => arg.into_string(),
                };
                pad(&mut out, &text, spec, false);
            }
            'd' | 'i' => format_signed(&mut out, args.take().to_integer(), spec),
            'o' | 'u' | 'x' | 'X' => {
                format_unsigned(&mut out, args.take().to_integer(), spec, conversion);
            }
            'e' | 'E' | 'f' | 'F' | 'g' | 'G' => {
                format_real(&mut out, args.take().to_real(), spec, conversion);
            }
            other => {
                out.push_str(&raw);
                out.push(other);
            }
        }
    }
    out
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, raw: &mut String) -> usize {
    let mut number = 0usize;
    while let Some(&c) = chars.peek() {
        let Some(digit) = c.to_digit(10).and_then(|d| usize::try_from(d).ok()) else {
            break;
        };
        raw.push(c);
        number = number.saturating_mul(10).saturating_add(digit);
        chars.next();
    }
    number
}

fn char_from_code(code: i64) -> String {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_default()
}

/// Justify `body` in `spec.width` columns. Zero padding goes after any sign
/// or radix prefix at the front of `body`.
fn pad(out: &mut String, body: &str, spec: Spec, numeric: bool) {
    let len = body.chars().count();
    if len >= spec.width {
        out.push_str(body);
        return;
    }
    let fill = spec.width - len;
    if spec.left {
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if numeric && spec.zero {
        let prefix_len = numeric_prefix_len(body);
        out.push_str(&body[..prefix_len]);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(&body[prefix_len..]);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(body);
    }
}

fn numeric_prefix_len(body: &str) -> usize {
    let sign = usize::from(body.starts_with(['-', '+', ' ']));
    let rest = &body[sign..];
    if rest.starts_with("0x") || rest.starts_with("0X") {
        sign + 2
    } else {
        sign
    }
}

fn sign_prefix(negative: bool, spec: Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn format_signed(out: &mut String, number: i64, spec: Spec) {
    let mut digits = number.unsigned_abs().to_string();
    if let Some(precision) = spec.precision {
        if precision == 0 && number == 0 {
            digits.clear();
        }
        while digits.len() < precision {
            digits.insert(0, '0');
        }
    }
    let body = format!("{}{digits}", sign_prefix(number < 0, spec));
    let spec = Spec {
        zero: spec.zero && spec.precision.is_none(),
        ..spec
    };
    pad(out, &body, spec, true);
}

#[expect(
    clippy::cast_sign_loss,
    reason = "negative values print as their two's complement, like C"
)]
fn format_unsigned(out: &mut String, number: i64, spec: Spec, conversion: char) {
    let bits = number as u64;
    let mut digits = match conversion {
        'o' => format!("{bits:o}"),
        'x' => format!("{bits:x}"),
        'X' => format!("{bits:X}"),
        _ => bits.to_string(),
    };
    if let Some(precision) = spec.precision {
        if precision == 0 && bits == 0 {
            digits.clear();
        }
        while digits.len() < precision {
            digits.insert(0, '0');
        }
    }
    if spec.alternate && bits != 0 {
        match conversion {
            'o' if !digits.starts_with('0') => digits.insert(0, '0'),
            'x' => digits.insert_str(0, "0x"),
            'X' => digits.insert_str(0, "0X"),
            _ => {}
        }
    }
    let spec = Spec {
        zero: spec.zero && spec.precision.is_none(),
        ..spec
    };
    pad(out, &digits, spec, true);
}

fn format_real(out: &mut String, number: f64, spec: Spec, conversion: char) {
    let upper = conversion.is_ascii_uppercase();
    if !number.is_finite() {
        let text = if number.is_nan() {
            "nan"
        } else {
            "inf"
        };
        let text = if upper {
            text.to_ascii_uppercase()
        } else {
            text.to_string()
        };
        let body = format!(
            "{}{text}",
            sign_prefix(number.is_sign_negative() && !number.is_nan(), spec)
        );
        pad(out, &body, Spec { zero: false, ..spec }, false);
        return;
    }

    let precision = spec.precision.unwrap_or(6);
    let magnitude = number.abs();
    let digits = match conversion.to_ascii_lowercase() {
        'e' => exponent_form(magnitude, precision, spec.alternate),
        'g' => general_form(magnitude, precision, spec.alternate),
        _ => fixed_form(magnitude, precision, spec.alternate),
    };
    let digits = if upper {
        digits.to_ascii_uppercase()
    } else {
        digits
    };
    let body = format!("{}{digits}", sign_prefix(number.is_sign_negative(), spec));
    pad(out, &body, spec, true);
}

fn fixed_form(magnitude: f64, precision: usize, alternate: bool) -> String {
    let mut text = format!("{magnitude:.precision$}");
    if alternate && precision == 0 {
        text.push('.');
    }
    text
}

/// C-style `%e`: at least two exponent digits, always signed.
fn exponent_form(magnitude: f64, precision: usize, alternate: bool) -> String {
    let rust = format!("{magnitude:.precision$e}");
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((&rust, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mut mantissa = mantissa.to_string();
    if alternate && precision == 0 {
        mantissa.push('.');
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// C-style `%g`: the shorter of `%e` and `%f` by the exponent rule, with
/// trailing zeros removed unless `#` is given.
fn general_form(magnitude: f64, precision: usize, alternate: bool) -> String {
    let precision = precision.max(1);
    let probe = format!("{magnitude:.prec$e}", prec = precision - 1);
    let exponent: i64 = probe
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0);

    let precision_i = i64::try_from(precision).unwrap_or(i64::MAX);
    let text = if exponent < -4 || exponent >= precision_i {
        exponent_form(magnitude, precision - 1, alternate)
    } else {
        let decimals = usize::try_from(precision_i - 1 - exponent).unwrap_or(0);
        fixed_form(magnitude, decimals, alternate)
    };
    if alternate {
        return text;
    }
    strip_trailing_zeros(&text)
}

fn strip_trailing_zeros(text: &str) -> String {
    let (mantissa, exponent) = match text.find('e') {
        Some(at) => text.split_at(at),
        None => (text, ""),
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    format!("{mantissa}{exponent}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fmt(format: &str, args: &[&str]) -> String {
        let args: Vec<Value> = args.iter().map(|&a| Value::from(a)).collect();
        sprintf(format, &args)
    }

    #[test]
    fn strings_and_widths() {
        assert_eq!(fmt("[%s]", &["hi"]), "[hi]");
        assert_eq!(fmt("[%5s]", &["hi"]), "[   hi]");
        assert_eq!(fmt("[%-5s]", &["hi"]), "[hi   ]");
        assert_eq!(fmt("[%.2s]", &["hello"]), "[he]");
        assert_eq!(fmt("[%*s]", &["4", "x"]), "[   x]");
        assert_eq!(fmt("[%-*s]", &["3", "x"]), "[x  ]");
    }

    #[test]
    fn integers() {
        assert_eq!(fmt("%d", &["42"]), "42");
        assert_eq!(fmt("%d", &["3.9"]), "3");
        assert_eq!(fmt("%d", &["abc"]), "0");
        assert_eq!(fmt("%5d|%-5d|%05d", &["-42", "7", "-3"]), "  -42|7    |-0003");
        assert_eq!(fmt("%+d % d", &["5", "5"]), "+5  5");
        assert_eq!(fmt("%.3d", &["7"]), "007");
        assert_eq!(fmt("%i", &["12"]), "12");
    }

    #[test]
    fn unsigned_radixes() {
        assert_eq!(fmt("%x %X %o %u", &["255", "255", "8", "3"]), "ff FF 10 3");
        assert_eq!(fmt("%#x %#o", &["255", "8"]), "0xff 010");
        assert_eq!(fmt("%08x", &["255"]), "000000ff");
    }

    #[test]
    fn reals() {
        assert_eq!(fmt("%f", &["3.14159"]), "3.141590");
        assert_eq!(fmt("%.2f", &["3.14159"]), "3.14");
        assert_eq!(fmt("%8.3f|", &["-1.5"]), "  -1.500|");
        assert_eq!(fmt("%08.2f", &["-1.5"]), "-0001.50");
        assert_eq!(fmt("%e", &["12345.678"]), "1.234568e+04");
        assert_eq!(fmt("%.2E", &["0.000123"]), "1.23E-04");
    }

    #[test]
    fn general_form_picks_shorter() {
        assert_eq!(fmt("%g", &["100000"]), "100000");
        assert_eq!(fmt("%g", &["1000000"]), "1e+06");
        assert_eq!(fmt("%g", &["0.0001"]), "0.0001");
        assert_eq!(fmt("%g", &["0.00001"]), "1e-05");
        assert_eq!(fmt("%g", &["3.5"]), "3.5");
        assert_eq!(fmt("%.3g", &["3.14159"]), "3.14");
        assert_eq!(fmt("%G", &["1e-10"]), "1E-10");
        assert_eq!(fmt("%#g", &["1"]), "1.00000");
    }

    #[test]
    fn characters() {
        assert_eq!(fmt("%c", &["65"]), "A");
        assert_eq!(fmt("%c", &["hello"]), "h");
        assert_eq!(fmt("%3c", &["x"]), "  x");
    }

    #[test]
    fn percent_missing_args_and_unknown() {
        assert_eq!(fmt("100%%", &[]), "100%");
        assert_eq!(fmt("%s|%d", &[]), "|0");
        assert_eq!(fmt("%q", &["x"]), "%q");
        assert_eq!(fmt("trailing %", &[]), "trailing %");
    }

    #[test]
    fn oversized_precision_is_capped() {
        let expected = format!("1.{}|", "0".repeat(MAX_PRECISION));
        assert_eq!(fmt("%.70000f|", &["1"]), expected);
        assert_eq!(fmt("%.70000g|", &["0.5"]), "0.5|");
        assert!(fmt("%.99999e", &["2"]).starts_with("2.000"));
    }

    #[test]
    fn oversized_width_is_capped() {
        let huge = (1_i64 << 62).to_string();
        let text = fmt("%*d|", &[&huge, "1"]);
        assert_eq!(text.len(), MAX_WIDTH + 1);
        assert!(text.ends_with("1|"));

        let text = fmt("%99999999s|", &["x"]);
        assert_eq!(text.len(), MAX_WIDTH + 1);
    }
}
