use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs;
use std::io;
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

fn engine_error(path: &Path, err: impl std::fmt::Display) -> SheetError {
    SheetError::Engine {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn write_error(err: impl std::fmt::Display) -> SheetError {
    SheetError::Write(err.to_string())
}

impl Book {
    /// Load every sheet of a workbook, in file order.
    ///
    /// The format (xlsx, xlsm, xlsb, xls, ods) is picked from the file
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::NotFound` when the path does not exist,
    /// `SheetError::Io` when it cannot be read or is a directory, and
    /// `SheetError::Engine` when the workbook engine rejects the file
    /// (unknown format, corrupt data).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SheetError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(SheetError::Io(e)),
        };
        if metadata.is_dir() {
            return Err(SheetError::Io(io::Error::other(format!(
                "{} is a directory",
                path.display()
            ))));
        }

        let mut workbook = open_workbook_auto(path).map_err(|e| match e {
            calamine::Error::Io(io) => SheetError::Io(io),
            other => engine_error(path, other),
        })?;

        let book_name = path
            .file_stem()
            .map_or_else(|| "Book1".to_string(), |s| s.to_string_lossy().into_owned());
        let mut book = Book::with_name(&book_name);

        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| engine_error(path, e))?;

            let mut sheet = Sheet::with_name(&sheet_name);
            *sheet.data_mut() = range
                .rows()
                .map(|row| row.iter().map(data_to_cell_value).collect())
                .collect();

            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Save the book to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name).map_err(write_error)?;
            write_to_worksheet(sheet, worksheet)?;
        }

        workbook.save(path.as_ref()).map_err(write_error)?;
        Ok(())
    }
}

/// Write sheet data to a worksheet
fn write_to_worksheet(sheet: &Sheet, worksheet: &mut Worksheet) -> Result<()> {
    for (row_idx, row) in sheet.data().iter().enumerate() {
        let row_num = u32::try_from(row_idx).map_err(|_| write_error("Row index overflow"))?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num =
                u16::try_from(col_idx).map_err(|_| write_error("Column index overflow"))?;

            match cell {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(row_num, col_num, *b)
                        .map_err(write_error)?;
                }
                CellValue::Int(i) => {
                    // Excel stores all numbers as f64
                    worksheet
                        .write_number(row_num, col_num, *i as f64)
                        .map_err(write_error)?;
                }
                CellValue::Float(f) => {
                    worksheet
                        .write_number(row_num, col_num, *f)
                        .map_err(write_error)?;
                }
                CellValue::String(s) => {
                    worksheet
                        .write_string(row_num, col_num, s)
                        .map_err(write_error)?;
                }
            }
        }
    }

    Ok(())
}
