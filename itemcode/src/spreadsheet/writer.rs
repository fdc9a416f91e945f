//! Writing tables to `.xlsx` and `.csv`.

use super::{SpreadsheetFormat, Table};
use crate::{ItemcodeError, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Write `table` to `path`, choosing the format from the extension.
///
/// Workbook output is always `.xlsx`; other workbook extensions are rejected.
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match SpreadsheetFormat::from_path(path)? {
        SpreadsheetFormat::Csv => write_csv(table, path)?,
        SpreadsheetFormat::Workbook => {
            let is_xlsx = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
            if !is_xlsx {
                return Err(ItemcodeError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
            write_xlsx(table, path)?;
        }
    }

    tracing::info!(path = %path.display(), rows = table.len(), "Wrote spreadsheet");
    Ok(())
}

fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col_index, header) in table.headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, column(col_index)?, header, &header_format)
            .map_err(|err| {
                ItemcodeError::Spreadsheet(format!("Unable to write the header row: {}", err))
            })?;
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        let row_number = u32::try_from(row_index + 1)
            .map_err(|_| ItemcodeError::Spreadsheet("Too many rows".to_string()))?;
        for (col_index, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .write_string(row_number, column(col_index)?, value)
                .map_err(|err| {
                    ItemcodeError::Spreadsheet(format!("Unable to write row {}: {}", row_number, err))
                })?;
        }
    }

    workbook.save(path).map_err(|err| {
        ItemcodeError::Spreadsheet(format!("Unable to save {}: {}", path.display(), err))
    })
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| {
        ItemcodeError::Spreadsheet(format!("Unable to create {}: {}", path.display(), err))
    })?;

    writer
        .write_record(&table.headers)
        .and_then(|_| table.rows.iter().try_for_each(|row| writer.write_record(row)))
        .map_err(|err| ItemcodeError::Spreadsheet(format!("Unable to write rows: {}", err)))?;
    writer.flush()?;
    Ok(())
}

fn column(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| ItemcodeError::Spreadsheet("Too many columns".to_string()))
}
