//! Tunables for table building and history.

use std::collections::BTreeSet;

/// Sheet prices that are ingested; any other sheet is skipped.
pub const EXPECTED_PRICES: [u32; 6] = [175, 200, 225, 250, 325, 525];

/// Columns every price sheet must carry (compared case-insensitively).
pub const REQUIRED_COLUMNS: [&str; 3] = ["zipcode", "city", "state"];

/// Stored entries per history list.
pub const DEFAULT_HISTORY_LEN: usize = 25;

/// Entries shown per history list.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// Options for building a pricing table
#[derive(Debug, Clone)]
pub struct PricingConfig {
    expected_prices: BTreeSet<u32>,
}

impl PricingConfig {
    /// Replace the set of accepted sheet prices
    #[must_use]
    pub fn with_expected_prices<I: IntoIterator<Item = u32>>(mut self, prices: I) -> Self {
        self.expected_prices = prices.into_iter().collect();
        self
    }

    /// Whether a sheet with this price is ingested
    #[must_use]
    pub fn accepts(&self, price: u32) -> bool {
        self.expected_prices.contains(&price)
    }

    /// Accepted prices in ascending order
    pub fn expected_prices(&self) -> impl Iterator<Item = u32> + '_ {
        self.expected_prices.iter().copied()
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            expected_prices: EXPECTED_PRICES.into_iter().collect(),
        }
    }
}

/// Options for search history lists
#[derive(Debug, Clone, Copy)]
pub struct HistoryConfig {
    /// Maximum number of stored entries
    pub max_len: usize,
    /// Number of entries returned for display
    pub display_limit: usize,
}

impl HistoryConfig {
    /// Set the stored entry cap
    #[must_use]
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Set how many entries are shown
    #[must_use]
    pub fn with_display_limit(mut self, display_limit: usize) -> Self {
        self.display_limit = display_limit;
        self
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            max_len: DEFAULT_HISTORY_LEN,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}
