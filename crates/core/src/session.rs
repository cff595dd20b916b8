//! Per-user query state: the two history lists and the City/State selection.
//!
//! A session is passed by `&mut` into every query. Invalid input returns a
//! [`QueryError`] and leaves the histories untouched; a valid query that
//! matches nothing is recorded as `No match`.

use crate::config::HistoryConfig;
use crate::error::QueryError;
use crate::history::{CityStateKey, History};
use crate::lookup::{cities_for_state, lookup_by_city_state, lookup_by_zip, states, QuoteSummary};
use crate::normalize::{display_city, normalize_city, normalize_state, normalize_zip};
use crate::table::{PricingRow, PricingTable};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which history list a search belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Zip,
    CityState,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zip" | "zipcode" => Ok(SearchMode::Zip),
            "cs" | "city" | "citystate" | "city-state" => Ok(SearchMode::CityState),
            other => Err(format!("unknown search mode '{other}' (expected zip or cs)")),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Zip => write!(f, "ZIP"),
            SearchMode::CityState => write!(f, "City/State"),
        }
    }
}

/// Result of a ZIP search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZipOutcome {
    pub zip: String,
    pub row: Option<PricingRow>,
    pub summary: QuoteSummary,
}

/// Result of a City/State search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityStateOutcome {
    pub state: String,
    /// Display (title-case) form
    pub city: String,
    pub rows: Vec<PricingRow>,
    pub summary: QuoteSummary,
}

impl CityStateOutcome {
    /// `City, ST`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    zip_history: History<String>,
    city_state_history: History<CityStateKey>,
    selected_state: Option<String>,
    selected_city: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(config: &HistoryConfig) -> Self {
        Session {
            zip_history: History::new(config),
            city_state_history: History::new(config),
            selected_state: None,
            selected_city: None,
        }
    }

    /// Look up a ZIP and record the outcome in the ZIP history.
    ///
    /// # Errors
    ///
    /// `QueryError::InvalidZip` when the input holds no digits.
    pub fn search_zip(
        &mut self,
        table: &PricingTable,
        raw: &str,
    ) -> Result<ZipOutcome, QueryError> {
        let zip = normalize_zip(raw);
        if zip.is_empty() {
            return Err(QueryError::InvalidZip(raw.trim().to_string()));
        }

        let row = lookup_by_zip(table, &zip).cloned();
        let summary = QuoteSummary::from_rows(row.as_ref());
        self.zip_history
            .upsert(zip.clone(), zip.clone(), summary.to_string());

        Ok(ZipOutcome { zip, row, summary })
    }

    /// Select a state and return its city options.
    ///
    /// A selected city that is not offered for the new state is cleared.
    ///
    /// # Errors
    ///
    /// `QueryError::UnknownState` when no table row carries the state; the
    /// previous selection is kept in that case.
    pub fn select_state(
        &mut self,
        table: &PricingTable,
        raw: &str,
    ) -> Result<Vec<String>, QueryError> {
        let state = normalize_state(raw);
        if state.is_empty() || !states(table).contains(&state) {
            return Err(QueryError::UnknownState(raw.trim().to_string()));
        }

        let options = cities_for_state(table, &state);
        if self
            .selected_city
            .as_ref()
            .is_some_and(|city| !options.contains(city))
        {
            tracing::debug!(state = %state, "clearing city not offered for new state");
            self.selected_city = None;
        }
        self.selected_state = Some(state);
        Ok(options)
    }

    /// Select a city of the currently selected state.
    ///
    /// # Errors
    ///
    /// `QueryError::MissingSelection` without a selected state,
    /// `QueryError::UnknownCity` when the state has no such city.
    pub fn select_city(&mut self, table: &PricingTable, raw: &str) -> Result<(), QueryError> {
        let state = self
            .selected_state
            .clone()
            .ok_or(QueryError::MissingSelection)?;

        let city = display_city(&normalize_city(raw));
        if city.is_empty() || !cities_for_state(table, &state).contains(&city) {
            return Err(QueryError::UnknownCity {
                city: raw.trim().to_string(),
                state,
            });
        }

        self.selected_city = Some(city);
        Ok(())
    }

    /// Drop both selections.
    pub fn clear_selection(&mut self) {
        self.selected_state = None;
        self.selected_city = None;
    }

    /// City options for the selected state; empty without a state.
    #[must_use]
    pub fn city_options(&self, table: &PricingTable) -> Vec<String> {
        self.selected_state
            .as_deref()
            .map(|state| cities_for_state(table, state))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    #[must_use]
    pub fn selected_city(&self) -> Option<&str> {
        self.selected_city.as_deref()
    }

    /// Look up the selected city/state and record the outcome in the
    /// City/State history.
    ///
    /// # Errors
    ///
    /// `QueryError::MissingSelection` unless both state and city are selected.
    pub fn search_city_state(
        &mut self,
        table: &PricingTable,
    ) -> Result<CityStateOutcome, QueryError> {
        let (Some(state), Some(city)) = (self.selected_state.clone(), self.selected_city.clone())
        else {
            return Err(QueryError::MissingSelection);
        };

        let rows: Vec<PricingRow> = lookup_by_city_state(table, &city, &state)
            .into_iter()
            .cloned()
            .collect();
        let summary = QuoteSummary::from_rows(&rows);
        let outcome = CityStateOutcome {
            state,
            city,
            rows,
            summary,
        };

        self.city_state_history.upsert(
            CityStateKey {
                state: outcome.state.clone(),
                city: outcome.city.clone(),
            },
            outcome.label(),
            summary.to_string(),
        );

        Ok(outcome)
    }

    #[must_use]
    pub fn zip_history(&self) -> &History<String> {
        &self.zip_history
    }

    #[must_use]
    pub fn city_state_history(&self) -> &History<CityStateKey> {
        &self.city_state_history
    }

    /// `(label, summary)` pairs shown for a mode, most recent first.
    #[must_use]
    pub fn recent(&self, mode: SearchMode) -> Vec<(String, String)> {
        match mode {
            SearchMode::Zip => self
                .zip_history
                .recent()
                .map(|e| (e.label.clone(), e.summary.clone()))
                .collect(),
            SearchMode::CityState => self
                .city_state_history
                .recent()
                .map(|e| (e.label.clone(), e.summary.clone()))
                .collect(),
        }
    }

    pub fn clear_history(&mut self, mode: SearchMode) {
        match mode {
            SearchMode::Zip => self.zip_history.clear(),
            SearchMode::CityState => self.city_state_history.clear(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
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
            row("02215", "BOSTON", "MA", 250),
            row("01002", "AMHERST", "MA", 175),
            row("07102", "NEWARK", "NJ", 200),
            row("07030", "HOBOKEN", "NJ", 225),
            row("03101", "MANCHESTER", "NH", 325),
            row("06040", "MANCHESTER", "CT", 525),
        ])
    }

    #[test]
    fn test_search_zip_records_match() {
        let table = table();
        let mut session = Session::default();

        let outcome = session.search_zip(&table, "2134").unwrap();
        assert_eq!(outcome.zip, "02134");
        assert_eq!(outcome.row.as_ref().unwrap().city, "BOSTON");
        assert_eq!(outcome.summary.to_string(), "$200");
        assert_eq!(
            session.recent(SearchMode::Zip),
            vec![("02134".to_string(), "$200".to_string())]
        );
    }

    #[test]
    fn test_search_zip_records_no_match() {
        let table = table();
        let mut session = Session::default();

        let outcome = session.search_zip(&table, "99999").unwrap();
        assert!(outcome.row.is_none());
        assert_eq!(session.zip_history().get(0).unwrap().summary, "No match");
    }

    #[test]
    fn test_invalid_zip_writes_no_history() {
        let table = table();
        let mut session = Session::default();

        let err = session.search_zip(&table, "abc").unwrap_err();
        assert_eq!(err, QueryError::InvalidZip("abc".to_string()));
        assert!(session.zip_history().is_empty());
    }

    #[test]
    fn test_repeat_zip_search_refreshes_entry() {
        let table = table();
        let mut session = Session::default();
        session.search_zip(&table, "02134").unwrap();
        session.search_zip(&table, "07102").unwrap();
        session.search_zip(&table, "02134.0").unwrap();

        let recent = session.recent(SearchMode::Zip);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].0, "02134");
    }

    #[test]
    fn test_stale_city_clears_on_state_change() {
        let table = table();
        let mut session = Session::default();

        session.select_state(&table, "MA").unwrap();
        session.select_city(&table, "boston").unwrap();
        assert_eq!(session.selected_city(), Some("Boston"));

        let options = session.select_state(&table, "New Jersey").unwrap();
        assert_eq!(options, vec!["Hoboken", "Newark"]);
        assert_eq!(session.selected_state(), Some("NJ"));
        assert_eq!(session.selected_city(), None);
        assert_eq!(
            session.search_city_state(&table).unwrap_err(),
            QueryError::MissingSelection
        );
    }

    #[test]
    fn test_city_kept_when_valid_for_new_state() {
        let table = table();
        let mut session = Session::default();

        session.select_state(&table, "NH").unwrap();
        session.select_city(&table, "Manchester").unwrap();
        session.select_state(&table, "CT").unwrap();
        assert_eq!(session.selected_city(), Some("Manchester"));

        let outcome = session.search_city_state(&table).unwrap();
        assert_eq!(outcome.summary.to_string(), "$525");
    }

    #[test]
    fn test_city_state_search_records_range() {
        let table = table();
        let mut session = Session::default();
        session.select_state(&table, "ma").unwrap();
        session.select_city(&table, "BOSTON").unwrap();

        let outcome = session.search_city_state(&table).unwrap();
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.label(), "Boston, MA");
        assert_eq!(
            session.recent(SearchMode::CityState),
            vec![("Boston, MA".to_string(), "$200\u{2013}$250".to_string())]
        );

        session.search_city_state(&table).unwrap();
        assert_eq!(session.city_state_history().len(), 1);
    }

    #[test]
    fn test_unknown_selections_are_rejected() {
        let table = table();
        let mut session = Session::default();

        assert_eq!(
            session.select_city(&table, "Boston").unwrap_err(),
            QueryError::MissingSelection
        );
        assert!(matches!(
            session.select_state(&table, "TX"),
            Err(QueryError::UnknownState(_))
        ));
        session.select_state(&table, "MA").unwrap();
        assert!(matches!(
            session.select_city(&table, "Newark"),
            Err(QueryError::UnknownCity { .. })
        ));
        assert!(session.city_state_history().is_empty());
    }

    #[test]
    fn test_clear_history_per_mode() {
        let table = table();
        let mut session = Session::default();
        session.search_zip(&table, "02134").unwrap();
        session.select_state(&table, "MA").unwrap();
        session.select_city(&table, "Amherst").unwrap();
        session.search_city_state(&table).unwrap();

        session.clear_history(SearchMode::Zip);
        assert!(session.zip_history().is_empty());
        assert_eq!(session.city_state_history().len(), 1);

        session.clear_history(SearchMode::CityState);
        assert!(session.city_state_history().is_empty());
    }

    #[test]
    fn test_search_mode_parse() {
        assert_eq!("zip".parse::<SearchMode>(), Ok(SearchMode::Zip));
        assert_eq!("CS".parse::<SearchMode>(), Ok(SearchMode::CityState));
        assert!("other".parse::<SearchMode>().is_err());
    }
}
