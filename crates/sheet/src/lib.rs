//! Workbook module for zipquote
//!
//! Loads every sheet of a spreadsheet (xlsx, xlsm, xlsb, xls, ods) in file
//! order and exposes the cells as text, the way a pricing table expects them:
//! ZIP codes stay strings and never pick up float artifacts such as `20855.0`.
//!
//! # Examples
//!
//! ## Building a book in memory
//!
//! ```
//! use zipquote_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet(
//!     "175",
//!     Sheet::from_data(vec![
//!         vec!["Zipcode", "City", "State"],
//!         vec!["02134", "Boston", "MA"],
//!     ]),
//! )
//! .unwrap();
//!
//! let (_, sheet) = book.sheets().next().unwrap();
//! assert_eq!(sheet.column_position("zipcode"), Some(0));
//! assert_eq!(sheet.records().count(), 1);
//! ```
//!
//! ## Loading from disk
//!
//! ```no_run
//! use zipquote_sheet::Book;
//!
//! let book = Book::from_path("pricing.xlsx").unwrap();
//! for name in book.sheet_names() {
//!     println!("{name}");
//! }
//! ```

mod book;
mod cell;
mod error;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
