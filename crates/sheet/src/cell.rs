/// Represents a cell value in a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Get the value as its raw text.
    ///
    /// Integral floats render without a fractional part, so a ZIP stored as
    /// the number `20855` reads back as `"20855"`, never `"20855.0"`.
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_float_has_no_fraction() {
        assert_eq!(CellValue::Float(20855.0).as_str(), "20855");
        assert_eq!(CellValue::Float(1002.0).as_str(), "1002");
    }

    #[test]
    fn test_fractional_float_keeps_fraction() {
        assert_eq!(CellValue::Float(2.5).as_str(), "2.5");
    }

    #[test]
    fn test_as_str_variants() {
        assert_eq!(CellValue::Null.as_str(), "");
        assert_eq!(CellValue::Int(2134).as_str(), "2134");
        assert_eq!(CellValue::Bool(true).as_str(), "true");
        assert_eq!(CellValue::from("02134").as_str(), "02134");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(2134_i64), CellValue::Int(2134));
        assert_eq!(CellValue::from(2.5), CellValue::Float(2.5));
        assert_eq!(CellValue::from(String::from("a")), CellValue::String("a".into()));
    }
}
