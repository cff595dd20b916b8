use crate::cell::CellValue;

/// A sheet representing a 2D grid of cells (row-major storage).
///
/// The first row is treated as the header row.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows, header included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Header cells as trimmed text. Empty for an empty sheet.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.data
            .first()
            .map(|row| row.iter().map(|c| c.as_str().trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Position of a header column, compared case-insensitively.
    ///
    /// When a name repeats, the first column wins.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.header()
            .iter()
            .position(|h| h.to_lowercase() == wanted)
    }

    /// Data rows (everything below the header row)
    pub fn records(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.data.iter().skip(1)
    }

    /// Get internal data reference
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable internal data reference
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
