//! Memoized table loading keyed by the pricing file's canonical path.
//!
//! Only a change of path triggers a rebuild. Edits to the file behind the
//! same path are not noticed until [`TableCache::invalidate`] is called.

use crate::error::{QuoteError, QuoteResult};
use crate::table::{BuildReport, PricingTable, TableBuilder};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
struct CachedTable {
    key: String,
    table: Arc<PricingTable>,
    report: BuildReport,
}

/// Holds at most one built table.
#[derive(Debug, Default)]
pub struct TableCache {
    builder: TableBuilder,
    cached: Option<CachedTable>,
}

impl TableCache {
    #[must_use]
    pub fn new(builder: TableBuilder) -> Self {
        TableCache {
            builder,
            cached: None,
        }
    }

    /// Return the table for `path`, building it when the canonical path
    /// differs from the cached one.
    ///
    /// # Errors
    ///
    /// `QuoteError::Load` when the path does not exist, plus any build error.
    /// A failed build leaves the previous entry in place.
    pub fn get_or_build<P: AsRef<Path>>(&mut self, path: P) -> QuoteResult<Arc<PricingTable>> {
        let path = path.as_ref();
        let key = cache_key(path)?;

        if let Some(cached) = self.cached.as_ref().filter(|c| c.key == key) {
            return Ok(Arc::clone(&cached.table));
        }

        tracing::info!(path = %key, "loading pricing table");
        let (table, report) = self.builder.build_with_report(&key)?;
        let table = Arc::new(table);
        self.cached = Some(CachedTable {
            key,
            table: Arc::clone(&table),
            report,
        });
        Ok(table)
    }

    /// Drop the cached table so the next call rebuilds it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Canonical path of the cached table
    #[must_use]
    pub fn cached_key(&self) -> Option<&str> {
        self.cached.as_ref().map(|c| c.key.as_str())
    }

    /// Statistics of the last successful build
    #[must_use]
    pub fn report(&self) -> Option<&BuildReport> {
        self.cached.as_ref().map(|c| &c.report)
    }
}

fn cache_key(path: &Path) -> QuoteResult<String> {
    let canonical = std::fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => QuoteError::Load {
            path: path.to_path_buf(),
        },
        _ => QuoteError::Unreadable { source: e },
    })?;
    Ok(canonical.to_string_lossy().into_owned())
}
