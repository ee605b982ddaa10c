//! Escape processing for string and regex literals.

/// Decode the body of a string literal (quotes already stripped). Also
/// applied to command-line `var=value` assignments.
///
/// Unknown escapes keep the escaped character; `\` before a newline
/// joins the lines.
pub fn unescape_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '\n' => {}
            '0'..='7' => {
                let mut code = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            other => out.push(other),
        }
    }
    out
}

/// Scan a regex literal body from just after its opening `/`.
///
/// Returns the pattern text and the number of bytes consumed including
/// the closing `/`, or `None` if the line ends first. A `/` inside a
/// bracket expression does not close the literal.
pub(crate) fn scan_regex(rest: &str) -> Option<(String, usize)> {
    let mut pattern = String::new();
    let mut in_bracket = false;
    let mut chars = rest.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        match c {
            '\n' => return None,
            '\\' => match chars.next() {
                Some((_, '/')) => pattern.push('/'),
                Some((_, '\n')) | None => return None,
                Some((_, escaped)) => {
                    pattern.push('\\');
                    pattern.push(escaped);
                }
            },
            '/' if !in_bracket => return Some((pattern, offset + 1)),
            '[' if !in_bracket => {
                in_bracket = true;
                pattern.push('[');
                if let Some(&(_, '^')) = chars.peek() {
                    pattern.push('^');
                    chars.next();
                }
                if let Some(&(_, ']')) = chars.peek() {
                    pattern.push(']');
                    chars.next();
                }
            }
            ']' if in_bracket => {
                in_bracket = false;
                pattern.push(']');
            }
            other => pattern.push(other),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_escapes() {
        assert_eq!(unescape_string(r"a\tb\n"), "a\tb\n");
        assert_eq!(unescape_string(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_string(r"\101\60"), "A0");
        assert_eq!(unescape_string(r"\/\q"), "/q");
        assert_eq!(unescape_string("a\\\nb"), "ab");
    }

    #[test]
    fn regex_scanning() {
        assert_eq!(scan_regex("ab+/ rest"), Some(("ab+".to_string(), 4)));
        assert_eq!(scan_regex(r"a\/b/"), Some(("a/b".to_string(), 5)));
        assert_eq!(scan_regex("[/]x/"), Some(("[/]x".to_string(), 5)));
        assert_eq!(scan_regex("[]/]/"), Some(("[]/]".to_string(), 5)));
        assert_eq!(scan_regex(r"\./"), Some((r"\.".to_string(), 3)));
        assert_eq!(scan_regex("abc\n/"), None);
        assert_eq!(scan_regex("abc"), None);
    }
}
