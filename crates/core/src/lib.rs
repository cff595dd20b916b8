//! # zipquote-core
//!
//! Pickup quote lookup over a pricing workbook.
//!
//! This crate provides:
//! - Normalization rules for ZIP codes, cities, states and sheet prices
//! - The pricing table builder (one sheet per price tier, cheapest quote wins)
//! - ZIP and City/State lookups with quote range summaries
//! - Deduplicating, most-recent-first search history
//! - A path-keyed table cache and a per-user [`Session`]
//!
//! ```
//! use zipquote_core::{PricingRow, PricingTable, Session};
//!
//! let table = PricingTable::from_rows(vec![PricingRow {
//!     zip: "02134".into(),
//!     city: "BOSTON".into(),
//!     state: "MA".into(),
//!     quote: 175,
//! }]);
//!
//! let mut session = Session::default();
//! let outcome = session.search_zip(&table, "2134").unwrap();
//! assert_eq!(outcome.summary.to_string(), "$175");
//! ```

/// Path-keyed table memoization.
pub mod cache;
/// Tunables and fixed constants.
pub mod config;
/// Error types and result aliases.
pub mod error;
/// Search history lists.
pub mod history;
/// ZIP and City/State queries.
pub mod lookup;
/// Canonical field forms.
pub mod normalize;
/// Per-user query state.
pub mod session;
/// Pricing table construction.
pub mod table;

pub use cache::TableCache;
pub use config::{HistoryConfig, PricingConfig};
pub use error::{QueryError, QuoteError, QuoteResult};
pub use history::{CityStateKey, History, HistoryEntry};
pub use lookup::{cities_for_state, lookup_by_city_state, lookup_by_zip, states, QuoteSummary};
pub use normalize::{display_city, normalize_city, normalize_state, normalize_zip, sheet_price};
pub use session::{CityStateOutcome, SearchMode, Session, ZipOutcome};
pub use table::{build, BuildReport, PriceSheet, PricingRow, PricingTable, TableBuilder};
