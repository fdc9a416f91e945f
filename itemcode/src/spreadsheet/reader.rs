//! Reading tables from workbooks and CSV files.

use super::{SpreadsheetFormat, Table};
use crate::{ItemcodeError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Read the first worksheet (or the CSV file) at `path`.
///
/// The first row is the header. Fully blank rows are skipped.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let table = match SpreadsheetFormat::from_path(path)? {
        SpreadsheetFormat::Workbook => read_workbook(path)?,
        SpreadsheetFormat::Csv => read_csv(path)?,
    };

    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.len(),
        "Read spreadsheet"
    );
    Ok(table)
}

fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|err| {
        ItemcodeError::Spreadsheet(format!("Unable to open {}: {}", path.display(), err))
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            ItemcodeError::Spreadsheet(format!("{} contains no worksheets", path.display()))
        })?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|err| {
        ItemcodeError::Spreadsheet(format!("Unable to read worksheet '{}': {}", sheet_name, err))
    })?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(Table::default());
    };

    let headers = header_row.iter().map(cell_to_string).collect();
    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| !is_blank(row))
        .collect();

    Ok(Table::new(headers, rows))
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| {
            ItemcodeError::Spreadsheet(format!("Unable to open {}: {}", path.display(), err))
        })?;

    let headers = reader
        .headers()
        .map_err(|err| ItemcodeError::Spreadsheet(format!("Unable to read headers: {}", err)))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|err| ItemcodeError::Spreadsheet(format!("Unable to read rows: {}", err)))?;
        let values: Vec<String> = record.iter().map(|value| value.trim().to_string()).collect();
        if !is_blank(&values) {
            rows.push(values);
        }
    }

    Ok(Table::new(headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|value| value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::write_table;

    #[test]
    fn test_read_csv_skips_blank_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.csv");
        std::fs::write(&path, "品番,備考\n AB1234 ,a\n,\nCD5678\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["品番", "備考"]);
        assert_eq!(table.column_values("品番").unwrap(), vec!["AB1234", "CD5678"]);
        assert_eq!(table.rows[1], vec!["CD5678", ""]);
    }

    #[test]
    fn test_xlsx_written_table_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.xlsx");
        let table = Table::new(
            vec!["商品名".to_string(), "抽出品番".to_string()],
            vec![
                vec!["NIKE AB1234 AIR".to_string(), "AB1234".to_string()],
                vec!["PUMA".to_string(), String::new()],
            ],
        );
        write_table(&table, &path).unwrap();

        let read = read_table(&path).unwrap();
        assert_eq!(read, table);
    }

    #[test]
    fn test_missing_file_is_a_spreadsheet_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_table(dir.path().join("absent.xlsx"));
        assert!(matches!(result, Err(ItemcodeError::Spreadsheet(_))));
    }
}
