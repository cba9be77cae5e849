//! Flexible day/month/year date parsing and derived ages.
//!
//! Source extracts mix separators (`/`, `-`), month forms (zero-padded
//! number, three-letter abbreviation, full name, arbitrary case), and one-
//! or two-digit days. Parsing tries a fixed ordered pattern list and takes
//! the first hit. Evaluation dates are always explicit parameters so every
//! derivation is reproducible.

use chrono::{Datelike, NaiveDate};

use crate::normalize::clean;

/// Ordered pattern list; first successful parse wins. chrono accepts one- or
/// two-digit days and numbers for `%d`/`%m`, so the slash/hyphen and
/// abbreviated/full/numeric month variants cover the observed forms.
const FORMATS: &[&str] = &[
    "%d/%b/%Y",
    "%d-%b-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d/%B/%Y",
    "%d-%B-%Y",
];

/// Parse a heterogeneous d/m/y date. `None` when empty or no pattern matches.
pub fn parse_flexible(text: &str) -> Option<NaiveDate> {
    let s = clean(text);
    if s.is_empty() {
        return None;
    }
    let s = normalize_month_case(&s);
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&s, fmt).ok())
}

/// If the text splits into exactly three slash-separated parts and the middle
/// part is alphabetic, rewrite it to leading-capital form ("FEB"/"feb" →
/// "Feb") so abbreviation matching is case-insensitive in effect.
fn normalize_month_case(s: &str) -> String {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 || parts[1].is_empty() || !parts[1].chars().all(|c| c.is_alphabetic()) {
        return s.to_string();
    }
    let mut month = String::with_capacity(parts[1].len());
    for (i, ch) in parts[1].chars().enumerate() {
        if i == 0 {
            month.extend(ch.to_uppercase());
        } else {
            month.extend(ch.to_lowercase());
        }
    }
    format!("{}/{}/{}", parts[0], month, parts[2])
}

/// Completed years from `start` to `today`: the naive year difference,
/// decremented when the anniversary has not yet occurred this year, clamped
/// at zero.
pub fn years_between(start: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - start.year();
    if (today.month(), today.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Age on `today` for a textual date of birth; 0 when the text is unparsable.
pub fn age_on(dob: &str, today: NaiveDate) -> u32 {
    match parse_flexible(dob) {
        Some(d) => years_between(d, today),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_observed_forms() {
        for text in [
            "19/Feb/1969",
            "19-Feb-1969",
            "19/02/1969",
            "19-02-1969",
            "19/February/1969",
            "19/FEB/1969",
            "19/feb/1969",
            " 19/Feb/1969 ",
        ] {
            assert_eq!(parse_flexible(text), Some(ymd(1969, 2, 19)), "form: {text:?}");
        }
    }

    #[test]
    fn parses_one_digit_day() {
        assert_eq!(parse_flexible("9/Feb/1969"), Some(ymd(1969, 2, 9)));
        assert_eq!(parse_flexible("9/02/1969"), Some(ymd(1969, 2, 9)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_flexible(""), None);
        assert_eq!(parse_flexible("Feb 19 1969"), None);
        assert_eq!(parse_flexible("1969-02-19"), None);
        assert_eq!(parse_flexible("31/02/1990"), None);
    }

    #[test]
    fn age_before_and_after_birthday() {
        assert_eq!(age_on("15/Jun/1990", ymd(2026, 6, 14)), 35);
        assert_eq!(age_on("15/Jun/1990", ymd(2026, 6, 15)), 36);
        assert_eq!(age_on("15/Jun/1990", ymd(2026, 6, 16)), 36);
    }

    #[test]
    fn leap_day_anniversary() {
        // Day before the leap-day anniversary: one less than the naive diff.
        assert_eq!(age_on("29/Feb/1992", ymd(2024, 2, 28)), 31);
        // Exact anniversary: naive year difference.
        assert_eq!(age_on("29/Feb/1992", ymd(2024, 2, 29)), 32);
    }

    #[test]
    fn unparsable_dob_is_zero() {
        assert_eq!(age_on("unknown", ymd(2026, 1, 1)), 0);
        assert_eq!(age_on("", ymd(2026, 1, 1)), 0);
    }

    #[test]
    fn age_clamped_at_zero() {
        assert_eq!(age_on("15/Jun/2030", ymd(2026, 1, 1)), 0);
    }
}
