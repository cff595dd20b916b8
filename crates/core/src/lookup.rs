//! Point and range queries against a [`PricingTable`].

use crate::normalize::{display_city, normalize_city, normalize_state, normalize_zip};
use crate::table::{PricingRow, PricingTable};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Find the row for a raw ZIP input.
///
/// The input goes through the ingestion ZIP rule first; input that holds no
/// digits returns `None` without touching the table.
#[must_use]
pub fn lookup_by_zip<'a>(table: &'a PricingTable, raw: &str) -> Option<&'a PricingRow> {
    let zip = normalize_zip(raw);
    if zip.is_empty() {
        return None;
    }
    let rows = table.rows();
    rows.binary_search_by(|row| row.zip.cmp(&zip))
        .ok()
        .map(|idx| &rows[idx])
}

/// All rows for a city/state pair, in ZIP order.
#[must_use]
pub fn lookup_by_city_state<'a>(
    table: &'a PricingTable,
    city: &str,
    state: &str,
) -> Vec<&'a PricingRow> {
    let city = normalize_city(city);
    let state = normalize_state(state);
    if city.is_empty() || state.is_empty() {
        return Vec::new();
    }
    table
        .iter()
        .filter(|row| row.city == city && row.state == state)
        .collect()
}

/// Distinct states in the table, sorted.
#[must_use]
pub fn states(table: &PricingTable) -> Vec<String> {
    table
        .iter()
        .map(|row| row.state.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct cities of a state in display form, sorted.
#[must_use]
pub fn cities_for_state(table: &PricingTable, state: &str) -> Vec<String> {
    let state = normalize_state(state);
    table
        .iter()
        .filter(|row| row.state == state)
        .map(|row| display_city(&row.city))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The quote shown for a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteSummary {
    NoMatch,
    Single { quote: u32 },
    Range { min: u32, max: u32 },
}

impl QuoteSummary {
    /// Summarize a set of quotes: one price when they all agree, else the
    /// min/max range.
    pub fn from_quotes<I: IntoIterator<Item = u32>>(quotes: I) -> Self {
        let mut bounds: Option<(u32, u32)> = None;
        for quote in quotes {
            bounds = Some(match bounds {
                None => (quote, quote),
                Some((min, max)) => (min.min(quote), max.max(quote)),
            });
        }

        match bounds {
            None => QuoteSummary::NoMatch,
            Some((min, max)) if min == max => QuoteSummary::Single { quote: min },
            Some((min, max)) => QuoteSummary::Range { min, max },
        }
    }

    /// Summarize the quotes of a result set
    pub fn from_rows<'a, I: IntoIterator<Item = &'a PricingRow>>(rows: I) -> Self {
        Self::from_quotes(rows.into_iter().map(|row| row.quote))
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, QuoteSummary::NoMatch)
    }
}

impl fmt::Display for QuoteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSummary::NoMatch => write!(f, "No match"),
            QuoteSummary::Single { quote } => write!(f, "${quote}"),
            QuoteSummary::Range { min, max } => write!(f, "${min}\u{2013}${max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(zip: &str, city: &str, state: &str, quote: u32) -> PricingRow {
        PricingRow {
            zip: zip.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            quote,
        }
    }

    fn table() -> PricingTable {
        PricingTable::from_rows(vec![
            row("02134", "BOSTON", "MA", 200),
            row("02215", "BOSTON", "MA", 225),
            row("02118", "BOSTON", "MA", 250),
            row("01002", "AMHERST", "MA", 175),
            row("07102", "NEWARK", "NJ", 200),
            row("07103", "NEWARK", "NJ", 200),
            row("63101", "ST. LOUIS", "MO", 325),
        ])
    }

    #[test]
    fn test_zip_exact_match() {
        let table = table();
        assert_eq!(lookup_by_zip(&table, "02134").unwrap().quote, 200);
        assert_eq!(lookup_by_zip(&table, " 1002 ").unwrap().city, "AMHERST");
        assert_eq!(lookup_by_zip(&table, "07102-0001").unwrap().state, "NJ");
    }

    #[test]
    fn test_zip_no_match_and_invalid() {
        let table = table();
        assert!(lookup_by_zip(&table, "99999").is_none());
        assert!(lookup_by_zip(&table, "abc").is_none());
        assert!(lookup_by_zip(&table, "").is_none());
    }

    #[test]
    fn test_city_state_range() {
        let table = table();
        let rows = lookup_by_city_state(&table, "boston", "Massachusetts");
        assert_eq!(rows.len(), 3);
        let summary = QuoteSummary::from_rows(rows);
        assert_eq!(summary, QuoteSummary::Range { min: 200, max: 250 });
        assert_eq!(summary.to_string(), "$200\u{2013}$250");
    }

    #[test]
    fn test_city_state_single_price() {
        let table = table();
        let rows = lookup_by_city_state(&table, "Newark", "N.J.");
        assert_eq!(rows.len(), 2);
        assert_eq!(QuoteSummary::from_rows(rows).to_string(), "$200");
    }

    #[test]
    fn test_city_state_no_match() {
        let table = table();
        let rows = lookup_by_city_state(&table, "Newark", "MA");
        assert!(rows.is_empty());
        let summary = QuoteSummary::from_rows(rows);
        assert!(!summary.is_match());
        assert_eq!(summary.to_string(), "No match");
    }

    #[test]
    fn test_states_sorted_distinct() {
        assert_eq!(states(&table()), vec!["MA", "MO", "NJ"]);
    }

    #[test]
    fn test_cities_for_state_display_form() {
        let table = table();
        assert_eq!(cities_for_state(&table, "MA"), vec!["Amherst", "Boston"]);
        assert_eq!(cities_for_state(&table, "missouri"), vec!["St. Louis"]);
        assert!(cities_for_state(&table, "TX").is_empty());
    }
}
