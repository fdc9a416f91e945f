//! Spreadsheet tables: reading, column access and writing results back.
//!
//! Excel and OpenDocument workbooks are read with `calamine` (first worksheet
//! only), CSV files with `csv`. Output goes to `.xlsx` through
//! `rust_xlsxwriter` or to `.csv`.

mod reader;
mod table;
mod writer;

pub use reader::read_table;
pub use table::Table;
pub use writer::write_table;

use crate::{ItemcodeError, Result};
use std::path::{Path, PathBuf};

/// File formats understood by the reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`
    Workbook,
    /// Comma-separated values
    Csv,
}

impl SpreadsheetFormat {
    /// Format implied by the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SpreadsheetFormat::Workbook),
            "csv" => Ok(SpreadsheetFormat::Csv),
            _ => Err(ItemcodeError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Output path next to `input`: the input stem plus `suffix`, as `.csv` for
/// CSV input and `.xlsx` otherwise.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = match SpreadsheetFormat::from_path(input) {
        Ok(SpreadsheetFormat::Csv) => "csv",
        _ => "xlsx",
    };
    input.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SpreadsheetFormat::from_path(Path::new("codes.XLSX")).unwrap(),
            SpreadsheetFormat::Workbook
        );
        assert_eq!(
            SpreadsheetFormat::from_path(Path::new("codes.csv")).unwrap(),
            SpreadsheetFormat::Csv
        );
        assert!(matches!(
            SpreadsheetFormat::from_path(Path::new("codes.txt")),
            Err(ItemcodeError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/titles.xls"), "_抽出結果"),
            PathBuf::from("/data/titles_抽出結果.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("titles.csv"), "_out"),
            PathBuf::from("titles_out.csv")
        );
    }
}
