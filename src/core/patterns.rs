/// Pattern definitions for the incident report
///
/// This module holds the fixed tables the report is built from (input file
/// globs, organization names, the region lookup) and the regex helpers that
/// turn them into matchers.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// Filenames the RAND export is commonly saved under, tried in order
pub const INPUT_PATTERNS: &[&str] = &[
    "RAND_Database_of_Worldwide_Terrorism_Incidents.csv",
    "rdwti.csv",
    "terrorism-incidents*.csv",
    "rand_terrorism*.csv",
];

/// Organization names and aliases searched for in the perpetrator field
pub const ORGANIZATION_KEYWORDS: &[&str] = &[
    "Taliban",
    "Islamic State",
    "ISIL",
    "ISIS",
    "Al-Qaida",
    "Al Qaeda",
    "AQAP",
    "AQIM",
    "Boko Haram",
    "Al-Shabaab",
    "Hamas",
    "Hezbollah",
    "Hizballah",
    "Lashkar-e-Taiba",
    "LeT",
    "Jaish-e-Mohammed",
    "JEM",
    "Abu Sayyaf",
    "Jemaah Islamiyah",
    "Jemaah Islamiyyah",
    "Islamic Jihad",
    "Harakat ul-Mujahidin",
    "Jaishe-Mohammad",
];

/// Country to region lookup
pub const REGION_MAP: &[(&str, &str)] = &[
    ("Iraq", "Middle East"),
    ("Lebanon", "Middle East"),
    ("Israel", "Middle East"),
    ("Syria", "Middle East"),
    ("Afghanistan", "South Asia"),
    ("Pakistan", "South Asia"),
    ("India", "South Asia"),
    ("Nigeria", "Sub-Saharan Africa"),
    ("Somalia", "Sub-Saharan Africa"),
    ("Philippines", "Southeast Asia"),
    ("Indonesia", "Southeast Asia"),
];

pub const FALLBACK_REGION: &str = "Other";

/// Cell values read as missing rather than as text
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A year between 1900 and 2099 standing on its own
pub const YEAR_PATTERN: &str = r"\b(19|20)\d{2}\b";

lazy_static! {
    /// Precompiled year pattern
    pub static ref YEAR_REGEX: Regex = Regex::new(YEAR_PATTERN).expect("year pattern compiles");
}

/// Whether a raw cell value counts as missing
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Build one case-insensitive alternation out of the organization names.
///
/// Names are matched as plain substrings: a short alias such as `LeT` also
/// matches inside unrelated words.
pub fn build_keyword_regex<S: AsRef<str>>(keywords: &[S]) -> Result<Regex, regex::Error> {
    let alternation = keywords
        .iter()
        .map(|keyword| regex::escape(keyword.as_ref()))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation).case_insensitive(true).build()
}

/// Extract the first year found in a free-text date.
///
/// # Arguments
///
/// * `date` - Raw date text, or `None` when the cell is missing
///
/// # Returns
///
/// The leftmost year in 1900-2099, or `None`
pub fn extract_year(date: Option<&str>) -> Option<i32> {
    let text = date?.trim();
    YEAR_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

/// Translate a filename glob into an anchored regex.
///
/// Only `*` and `?` are special; everything else matches literally.
pub fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut translated = String::from("^");
    let mut literal = String::new();

    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                translated.push_str(&regex::escape(&literal));
                literal.clear();
                translated.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    translated.push_str(&regex::escape(&literal));
    translated.push('$');

    Regex::new(&translated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year(Some("14 APR 2003")), Some(2003));
        assert_eq!(extract_year(Some("1998-03-01")), Some(1998));
        assert_eq!(extract_year(None), None);
        assert_eq!(extract_year(Some("unknown")), None);
        assert_eq!(extract_year(Some("")), None);
    }

    #[test]
    fn test_extract_year_takes_leftmost() {
        assert_eq!(extract_year(Some("between 1985 and 2001")), Some(1985));
        assert_eq!(extract_year(Some("2001 or 1985")), Some(2001));
    }

    #[test]
    fn test_extract_year_range() {
        assert_eq!(extract_year(Some("12 JUL 1899")), None);
        assert_eq!(extract_year(Some("12 JUL 2100")), None);
        // No upper cap inside the pattern range
        assert_eq!(extract_year(Some("2045")), Some(2045));
        // Digits glued to other digits are not a year
        assert_eq!(extract_year(Some("ref 120034")), None);
    }

    #[test]
    fn test_keyword_regex_matching() {
        let regex = build_keyword_regex(ORGANIZATION_KEYWORDS).unwrap();
        assert!(regex.is_match("Al-Qaida in Iraq"));
        assert!(regex.is_match("taliban fighters"));
        assert!(regex.is_match("HAMAS"));
        assert!(!regex.is_match("Unknown"));
        // Substring semantics: the `LeT` alias fires inside other words
        assert!(regex.is_match("Bullet Brigade"));
    }

    #[test]
    fn test_keyword_regex_escapes_metacharacters() {
        let regex = build_keyword_regex(&["A.B"]).unwrap();
        assert!(regex.is_match("xa.bx"));
        assert!(!regex.is_match("axb"));
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("NA"));
        assert!(is_missing("null"));
        assert!(!is_missing("Unknown"));
        assert!(!is_missing(" NA"));
    }

    #[test]
    fn test_glob_to_regex() {
        let re = glob_to_regex("terrorism-incidents*.csv").unwrap();
        assert!(re.is_match("terrorism-incidents.csv"));
        assert!(re.is_match("terrorism-incidents-2009.csv"));
        assert!(!re.is_match("terrorism-incidents.csv.bak"));
        assert!(!re.is_match("terrorism-incidentsXcsv"));

        let re = glob_to_regex("rdwti.csv").unwrap();
        assert!(re.is_match("rdwti.csv"));
        assert!(!re.is_match("rdwtiXcsv"));

        let re = glob_to_regex("data?.csv").unwrap();
        assert!(re.is_match("data1.csv"));
        assert!(!re.is_match("data12.csv"));
    }
}
