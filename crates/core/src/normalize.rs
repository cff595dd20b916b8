//! Canonical forms for ZIP codes, cities, states and sheet prices.
//!
//! Ingestion and queries share these rules, so a query matches a row exactly
//! when both normalize to the same value. An empty string means "invalid".

use regex::Regex;
use std::sync::OnceLock;

fn digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

/// Price encoded in a sheet name: the first run of digits, with thousands
/// separators removed first.
///
/// `"200 dollars"` gives `Some(200)`, `"$1,025 tier"` gives `Some(1025)`,
/// `"Notes"` gives `None`.
#[must_use]
pub fn sheet_price(sheet_name: &str) -> Option<u32> {
    let without_commas = sheet_name.replace(',', "");
    digit_run()
        .find(&without_commas)
        .and_then(|m| m.as_str().parse().ok())
}

/// Normalize a raw ZIP to exactly five ASCII digits.
///
/// Trims, drops one trailing `.0`, keeps only digits, then left-pads short
/// values with zeros or keeps the first five digits of long ones (ZIP+4).
/// Returns an empty string when no digit remains.
#[must_use]
pub fn normalize_zip(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0 => String::new(),
        1..=5 => format!("{digits:0>5}"),
        _ => digits[..5].to_string(),
    }
}

/// Normalize a city for matching: trimmed, upper case.
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Title-case form of a city for display.
///
/// Each run of letters starts upper case and continues lower case, so
/// `"ST. LOUIS"` becomes `"St. Louis"` and `"O'FALLON"` becomes `"O'Fallon"`.
#[must_use]
pub fn display_city(city: &str) -> String {
    let mut out = String::with_capacity(city.len());
    let mut in_word = false;
    for c in city.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Normalize a state to its two-letter code.
///
/// A full state name maps through the name table; anything else keeps its
/// first two letters once non-letters are stripped (`"N.J."` gives `"NJ"`).
/// Returns an empty string when fewer than two letters remain.
#[must_use]
pub fn normalize_state(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if let Some(code) = state_code(&upper) {
        return code.to_string();
    }

    let letters: String = upper.chars().filter(char::is_ascii_alphabetic).take(2).collect();
    if letters.len() == 2 {
        letters
    } else {
        String::new()
    }
}

/// Two-letter code for an upper-case full state or territory name.
fn state_code(name: &str) -> Option<&'static str> {
    let code = match name {
        "ALABAMA" => "AL",
        "ALASKA" => "AK",
        "ARIZONA" => "AZ",
        "ARKANSAS" => "AR",
        "CALIFORNIA" => "CA",
        "COLORADO" => "CO",
        "CONNECTICUT" => "CT",
        "DELAWARE" => "DE",
        "FLORIDA" => "FL",
        "GEORGIA" => "GA",
        "HAWAII" => "HI",
        "IDAHO" => "ID",
        "ILLINOIS" => "IL",
        "INDIANA" => "IN",
        "IOWA" => "IA",
        "KANSAS" => "KS",
        "KENTUCKY" => "KY",
        "LOUISIANA" => "LA",
        "MAINE" => "ME",
        "MARYLAND" => "MD",
        "MASSACHUSETTS" => "MA",
        "MICHIGAN" => "MI",
        "MINNESOTA" => "MN",
        "MISSISSIPPI" => "MS",
        "MISSOURI" => "MO",
        "MONTANA" => "MT",
        "NEBRASKA" => "NE",
        "NEVADA" => "NV",
        "NEW HAMPSHIRE" => "NH",
        "NEW JERSEY" => "NJ",
        "NEW MEXICO" => "NM",
        "NEW YORK" => "NY",
        "NORTH CAROLINA" => "NC",
        "NORTH DAKOTA" => "ND",
        "OHIO" => "OH",
        "OKLAHOMA" => "OK",
        "OREGON" => "OR",
        "PENNSYLVANIA" => "PA",
        "RHODE ISLAND" => "RI",
        "SOUTH CAROLINA" => "SC",
        "SOUTH DAKOTA" => "SD",
        "TENNESSEE" => "TN",
        "TEXAS" => "TX",
        "UTAH" => "UT",
        "VERMONT" => "VT",
        "VIRGINIA" => "VA",
        "WASHINGTON" => "WA",
        "WEST VIRGINIA" => "WV",
        "WISCONSIN" => "WI",
        "WYOMING" => "WY",
        "DISTRICT OF COLUMBIA" => "DC",
        "PUERTO RICO" => "PR",
        "GUAM" => "GU",
        "AMERICAN SAMOA" => "AS",
        "NORTHERN MARIANA ISLANDS" => "MP",
        "VIRGIN ISLANDS" | "U.S. VIRGIN ISLANDS" => "VI",
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_pads_short_values() {
        assert_eq!(normalize_zip("1002"), "01002");
        assert_eq!(normalize_zip("7"), "00007");
    }

    #[test]
    fn test_zip_strips_float_suffix() {
        assert_eq!(normalize_zip("20855.0"), "20855");
        assert_eq!(normalize_zip(" 1002.0 "), "01002");
    }

    #[test]
    fn test_zip_plus_four_keeps_first_five_digits() {
        assert_eq!(normalize_zip("20855-1234"), "20855");
        assert_eq!(normalize_zip("208551234"), "20855");
    }

    #[test]
    fn test_zip_invalid_is_empty() {
        assert_eq!(normalize_zip(""), "");
        assert_eq!(normalize_zip("abc"), "");
        assert_eq!(normalize_zip("   "), "");
        assert_eq!(normalize_zip(".0"), "");
    }

    #[test]
    fn test_zip_only_one_float_suffix_is_stripped() {
        // "123.0.0" -> "123.0" -> digits "1230"
        assert_eq!(normalize_zip("123.0.0"), "01230");
    }

    #[test]
    fn test_state_full_name() {
        assert_eq!(normalize_state("New Jersey"), "NJ");
        assert_eq!(normalize_state("  west virginia "), "WV");
        assert_eq!(normalize_state("District of Columbia"), "DC");
    }

    #[test]
    fn test_state_fallback_letters() {
        assert_eq!(normalize_state("N.J."), "NJ");
        assert_eq!(normalize_state(" ma "), "MA");
        assert_eq!(normalize_state("Mass."), "MA");
    }

    #[test]
    fn test_state_too_short() {
        assert_eq!(normalize_state("X"), "");
        assert_eq!(normalize_state(""), "");
        assert_eq!(normalize_state("1.2"), "");
    }

    #[test]
    fn test_city() {
        assert_eq!(normalize_city("  Boston "), "BOSTON");
        assert_eq!(display_city("BOSTON"), "Boston");
        assert_eq!(display_city("ST. LOUIS"), "St. Louis");
        assert_eq!(display_city("O'FALLON"), "O'Fallon");
        assert_eq!(display_city("WINSTON-SALEM"), "Winston-Salem");
    }

    #[test]
    fn test_display_city_round_trips_to_canonical() {
        for city in ["MCALLEN", "ST. LOUIS", "NEW YORK"] {
            assert_eq!(normalize_city(&display_city(city)), city);
        }
    }

    #[test]
    fn test_sheet_price() {
        assert_eq!(sheet_price("175"), Some(175));
        assert_eq!(sheet_price("200 dollars"), Some(200));
        assert_eq!(sheet_price("Tier $1,025"), Some(1025));
        assert_eq!(sheet_price("999 (unexpected)"), Some(999));
        assert_eq!(sheet_price("Notes"), None);
        assert_eq!(sheet_price("99999999999999999999"), None);
    }
}
