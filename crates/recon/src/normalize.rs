//! Raw field cleanup shared by every source.
//!
//! Extract fields arrive decorated with BOMs, non-breaking spaces, doubled
//! whitespace, and numeric-as-text artifacts like `"123456.0"`. Everything
//! downstream assumes fields have been through [`clean`] first.

/// Strip BOM / zero-width-space characters, turn NBSP into plain space,
/// collapse internal whitespace runs to a single space, trim the ends.
/// Empty input yields empty output.
pub fn clean(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        let ch = match ch {
            '\u{FEFF}' | '\u{200B}' => continue,
            '\u{00A0}' => ' ',
            c => c,
        };
        if ch.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }
    out
}

/// Drop a trailing literal `".0"` left behind by spreadsheet exports that
/// serialize numeric cells as floats.
pub fn strip_trailing_dot_zero(raw: &str) -> String {
    let s = clean(raw);
    match s.strip_suffix(".0") {
        Some(base) => base.to_string(),
        None => s,
    }
}

/// Keep decimal digits only, preserving order.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Tolerant counter parse: `"123.0"` → 123, blank or garbage → 0.
pub fn parse_count(raw: &str) -> i64 {
    let s = strip_trailing_dot_zero(raw);
    if s.is_empty() {
        return 0;
    }
    s.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_invisibles() {
        assert_eq!(clean("\u{FEFF}Employee\u{00A0}ID"), "Employee ID");
        assert_eq!(clean("  North   Zone  "), "North Zone");
        assert_eq!(clean("a\u{200B}b"), "ab");
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn clean_collapses_tabs_and_newlines() {
        assert_eq!(clean("North\t\tZone\n1"), "North Zone 1");
    }

    #[test]
    fn dot_zero_suffix() {
        assert_eq!(strip_trailing_dot_zero("123456.0"), "123456");
        assert_eq!(strip_trailing_dot_zero(" 123456.0 "), "123456");
        assert_eq!(strip_trailing_dot_zero("123456"), "123456");
        assert_eq!(strip_trailing_dot_zero("123.50"), "123.50");
        assert_eq!(strip_trailing_dot_zero(".0"), "");
    }

    #[test]
    fn digits_only_discards_everything_else() {
        assert_eq!(digits_only("EMP-00123/456"), "00123456");
        assert_eq!(digits_only("no digits"), "");
    }

    #[test]
    fn count_parse_is_tolerant() {
        assert_eq!(parse_count("412"), 412);
        assert_eq!(parse_count("412.0"), 412);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("n/a"), 0);
        assert_eq!(parse_count("-3"), -3);
    }
}
