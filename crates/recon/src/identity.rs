//! Canonical identifier derivation.
//!
//! Person ids arrive as `"123456"`, `"123456.0"`, `" 123456 "`, or worse;
//! unit ids are embedded in composite `"<Name> - <ID>"` fields. Both resolve
//! to a digits-only canonical string so the same physical person or unit
//! joins to one record regardless of which source contributed a field.

use crate::normalize::{clean, digits_only, strip_trailing_dot_zero};

/// Canonical person id: strip a trailing ".0", then keep digits only.
/// Empty result means the id is unresolvable and the row must be skipped.
pub fn person_id(raw: &str) -> String {
    digits_only(&strip_trailing_dot_zero(raw))
}

/// Canonical unit id from a composite "name & id" field.
///
/// The final digit run wins when it has at least 5 digits (composite fields
/// are written `"<Name> - <ID>"` with trailing digits authoritative); if the
/// final run is shorter, the first run of 5+ digits anywhere in the text is
/// used instead. No 5+ run at all means no id.
pub fn unit_id(composite: &str) -> String {
    let s = clean(composite);

    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in s.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    if let Some(last) = runs.last() {
        if last.len() >= 5 {
            return last.clone();
        }
    }
    runs.into_iter().find(|r| r.len() >= 5).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_id_equivalent_forms() {
        for raw in ["123456", "123456.0", " 123456 ", "EMP 123456"] {
            assert_eq!(person_id(raw), "123456", "raw form: {raw:?}");
        }
    }

    #[test]
    fn person_id_unresolvable() {
        assert_eq!(person_id(""), "");
        assert_eq!(person_id("pending"), "");
    }

    #[test]
    fn unit_id_prefers_trailing_run() {
        assert_eq!(unit_id("North Public School - 000123456"), "000123456");
        assert_eq!(unit_id("School12 Annex - 98765"), "98765");
    }

    #[test]
    fn unit_id_falls_back_to_first_long_run() {
        // Final run is only 2 digits; the earlier 6-digit run is the id.
        assert_eq!(unit_id("Riverside 123456 Campus Block 12"), "123456");
    }

    #[test]
    fn unit_id_ignores_short_runs() {
        // 4-digit runs never qualify.
        assert_eq!(unit_id("Annex Block 1234"), "");
        assert_eq!(unit_id("Annex 1234 - 12345"), "12345");
    }

    #[test]
    fn unit_id_none() {
        assert_eq!(unit_id("Head Office"), "");
        assert_eq!(unit_id(""), "");
    }
}
