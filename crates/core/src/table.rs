//! Pricing table construction.
//!
//! A pricing workbook carries one sheet per price tier. Each sheet whose name
//! encodes an expected price contributes its rows at that price; the merged
//! rows are normalized and collapsed to the cheapest quote per ZIP.

use crate::config::{PricingConfig, REQUIRED_COLUMNS};
use crate::error::{QuoteError, QuoteResult};
use crate::normalize::{display_city, normalize_city, normalize_state, normalize_zip, sheet_price};
use serde::Serialize;
use std::path::Path;
use zipquote_sheet::{Book, CellValue, Sheet};

/// One normalized pricing record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PricingRow {
    /// Five ASCII digits
    pub zip: String,
    /// Upper case
    pub city: String,
    /// Two-letter upper-case code
    pub state: String,
    pub quote: u32,
}

impl PricingRow {
    /// Title-case city for display
    #[must_use]
    pub fn display_city(&self) -> String {
        display_city(&self.city)
    }

    fn is_complete(&self) -> bool {
        !self.zip.is_empty() && !self.city.is_empty() && !self.state.is_empty()
    }
}

/// A spreadsheet tab and the price derived from its name.
#[derive(Debug, Clone, Copy)]
pub struct PriceSheet<'a> {
    pub name: &'a str,
    pub derived_price: Option<u32>,
}

impl<'a> PriceSheet<'a> {
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        PriceSheet {
            name,
            derived_price: sheet_price(name),
        }
    }

    /// The price when it is one the config accepts
    #[must_use]
    pub fn accepted_price(&self, config: &PricingConfig) -> Option<u32> {
        self.derived_price.filter(|price| config.accepts(*price))
    }
}

/// Canonical pricing table: sorted by ZIP, at most one row per ZIP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PricingTable {
    rows: Vec<PricingRow>,
}

impl PricingTable {
    /// Build a table from already-normalized rows.
    ///
    /// Incomplete rows are dropped, then rows are stably sorted by
    /// `(zip, quote)` and only the first row per ZIP is kept.
    #[must_use]
    pub fn from_rows(rows: Vec<PricingRow>) -> Self {
        Self::collapse(rows).0
    }

    /// Returns the table, the invalid row count and the collapsed row count.
    fn collapse(mut rows: Vec<PricingRow>) -> (Self, usize, usize) {
        let before = rows.len();
        rows.retain(PricingRow::is_complete);
        let invalid = before - rows.len();

        rows.sort_by(|a, b| a.zip.cmp(&b.zip).then(a.quote.cmp(&b.quote)));
        let complete = rows.len();
        // one row per zip also leaves no exact duplicates behind
        rows.dedup_by(|later, first| later.zip == first.zip);
        let collapsed = complete - rows.len();

        (PricingTable { rows }, invalid, collapsed)
    }

    #[must_use]
    pub fn rows(&self) -> &[PricingRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricingRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// An empty table means "no pricing data", which is not a load failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a table build did with the workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// `(sheet name, price)` for every ingested sheet, in file order
    pub sheets_ingested: Vec<(String, u32)>,
    pub sheets_skipped: Vec<String>,
    pub rows_read: usize,
    /// Rows dropped for an empty zip, city or state
    pub rows_invalid: usize,
    /// Rows dropped because a cheaper (or earlier) row had the same ZIP
    pub duplicates_collapsed: usize,
}

/// Builds [`PricingTable`]s from pricing workbooks.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    config: PricingConfig,
}

impl TableBuilder {
    #[must_use]
    pub fn new(config: PricingConfig) -> Self {
        TableBuilder { config }
    }

    #[must_use]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Load a workbook from disk and build its table.
    ///
    /// # Errors
    ///
    /// `QuoteError::Load` for a missing file, `Unreadable`/`Engine` when the
    /// workbook cannot be opened, `Schema` when a price sheet lacks columns.
    pub fn build<P: AsRef<Path>>(&self, path: P) -> QuoteResult<PricingTable> {
        self.build_with_report(path).map(|(table, _)| table)
    }

    /// Like [`TableBuilder::build`], also returning the build statistics.
    pub fn build_with_report<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> QuoteResult<(PricingTable, BuildReport)> {
        let book = Book::from_path(path.as_ref())?;
        self.build_from_book(&book)
    }

    /// Build a table from a loaded workbook.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Schema` for the first price sheet that lacks a
    /// required column; the whole build fails in that case.
    pub fn build_from_book(&self, book: &Book) -> QuoteResult<(PricingTable, BuildReport)> {
        let mut report = BuildReport::default();
        let mut rows = Vec::new();

        for (name, sheet) in book.sheets() {
            let Some(price) = PriceSheet::new(name).accepted_price(&self.config) else {
                tracing::debug!(sheet = name, "skipping sheet without an expected price");
                report.sheets_skipped.push(name.to_string());
                continue;
            };

            let before = rows.len();
            read_price_sheet(sheet, price, &mut rows)?;
            report.rows_read += rows.len() - before;
            report.sheets_ingested.push((name.to_string(), price));
        }

        let (table, invalid, collapsed) = PricingTable::collapse(rows);
        report.rows_invalid = invalid;
        report.duplicates_collapsed = collapsed;

        tracing::debug!(
            ingested = report.sheets_ingested.len(),
            skipped = report.sheets_skipped.len(),
            rows_read = report.rows_read,
            rows_invalid = report.rows_invalid,
            duplicates = report.duplicates_collapsed,
            rows = table.len(),
            "built pricing table"
        );

        Ok((table, report))
    }
}

/// Build a table with the default expected prices.
///
/// # Errors
///
/// See [`TableBuilder::build`].
pub fn build<P: AsRef<Path>>(path: P) -> QuoteResult<PricingTable> {
    TableBuilder::default().build(path)
}

/// Normalize every data row of a price sheet into `out`.
fn read_price_sheet(sheet: &Sheet, price: u32, out: &mut Vec<PricingRow>) -> QuoteResult<()> {
    let positions = REQUIRED_COLUMNS.map(|column| sheet.column_position(column));
    let [Some(zip_col), Some(city_col), Some(state_col)] = positions else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .zip(positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(column, _)| (*column).to_string())
            .collect();
        return Err(QuoteError::Schema {
            sheet: sheet.name().to_string(),
            missing,
        });
    };

    for record in sheet.records() {
        let text = |col: usize| record.get(col).map(CellValue::as_str).unwrap_or_default();
        out.push(PricingRow {
            zip: normalize_zip(&text(zip_col)),
            city: normalize_city(&text(city_col)),
            state: normalize_state(&text(state_col)),
            quote: price,
        });
    }

    Ok(())
}
