//! Loader for bank operations exports (XLSX/XLS/ODS via calamine, CSV via csv)
//!
//! Every source is first read into a [`RawSheet`] of loosely typed cells and
//! then normalized into a [`TransactionTable`]. Normalization never fails on
//! individual rows: unparseable dates drop the row, unparseable numbers
//! become zero and missing text becomes an empty string.

use std::fs;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{columns, Transaction, TransactionTable, OPERATION_DATE_FORMAT};

/// A cell as read from the source, before normalization
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

/// Header row plus data rows of the first sheet
#[derive(Debug, Default)]
struct RawSheet {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Load transactions from a file, absorbing every failure
///
/// Missing, unreadable or malformed sources yield an empty table; the cause
/// is logged. Use [`try_load_transactions`] to see the error instead.
pub fn load_transactions(path: &Path) -> TransactionTable {
    match try_load_transactions(path) {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to load transactions from {}: {}", path.display(), e);
            TransactionTable::empty()
        }
    }
}

/// Load transactions from a file, reporting why a source could not be used
pub fn try_load_transactions(path: &Path) -> Result<TransactionTable> {
    let sheet = if is_csv(path) {
        read_csv(fs::File::open(path)?)?
    } else {
        read_workbook(path)?
    };

    let table = normalize(&sheet)?;
    info!(
        "Loaded {} transactions from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV data with the export's headers into transactions
pub fn parse_csv<R: Read>(reader: R) -> Result<TransactionTable> {
    normalize(&read_csv(reader)?)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Pick the CSV delimiter from the header line
///
/// Russian bank exports are usually `;`-separated because `,` is the
/// decimal separator.
fn detect_delimiter(header: &str) -> u8 {
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn read_csv<R: Read>(mut reader: R) -> Result<RawSheet> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let content = content.trim_start_matches('\u{feff}');

    let Some(header_line) = content.lines().next() else {
        return Ok(RawSheet::default());
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(detect_delimiter(header_line))
        .from_reader(content.as_bytes());

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|value| {
                    if value.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(value.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawSheet { headers, rows })
}

fn read_workbook(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptySource(format!("{} has no worksheets", path.display())))??;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(RawSheet::default());
    };

    let headers = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let rows = rows_iter
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            data.as_datetime().map_or(Cell::Empty, Cell::DateTime)
        }
        _ => Cell::Empty,
    }
}

fn normalize(sheet: &RawSheet) -> Result<TransactionTable> {
    if sheet.rows.is_empty() {
        debug!("Source has no data rows");
        return Ok(TransactionTable::empty());
    }

    let column = |name: &str| sheet.headers.iter().position(|h| h == name);
    let date_col = column(columns::OPERATION_DATE)
        .ok_or_else(|| Error::MissingColumn(columns::OPERATION_DATE.to_string()))?;
    let amount_col = column(columns::AMOUNT)
        .ok_or_else(|| Error::MissingColumn(columns::AMOUNT.to_string()))?;
    let category_col = column(columns::CATEGORY);
    let description_col = column(columns::DESCRIPTION);
    let cashback_col = column(columns::CASHBACK);

    let mut transactions = Vec::with_capacity(sheet.rows.len());
    let mut dropped = 0usize;

    for (index, row) in sheet.rows.iter().enumerate() {
        let cell = |col: Option<usize>| col.and_then(|i| row.get(i)).unwrap_or(&Cell::Empty);

        let Some(operation_date) = parse_operation_date(cell(Some(date_col))) else {
            // +2: one-based, after the header row
            debug!("Dropping row {} with unparseable operation date", index + 2);
            dropped += 1;
            continue;
        };

        transactions.push(Transaction {
            operation_date,
            amount: coerce_number(cell(Some(amount_col))),
            category: coerce_text(cell(category_col)),
            description: coerce_text(cell(description_col)),
            cashback: coerce_number(cell(cashback_col)),
        });
    }

    if dropped > 0 {
        debug!("Dropped {} rows without a valid operation date", dropped);
    }

    Ok(TransactionTable::new(transactions))
}

fn parse_operation_date(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => NaiveDateTime::parse_from_str(s.trim(), OPERATION_DATE_FORMAT).ok(),
        Cell::Number(_) | Cell::Empty => None,
    }
}

/// Coerce a cell to a finite number, zero when that is impossible
fn coerce_number(cell: &Cell) -> f64 {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => parse_amount(s).unwrap_or(0.0),
        Cell::DateTime(_) | Cell::Empty => 0.0,
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse an amount string, accepting a decimal comma and space grouping
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok()
}

fn coerce_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => n.to_string(),
        Cell::DateTime(dt) => dt.format(OPERATION_DATE_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, temp_file};
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    const HEADER: &str = "Дата операции,Сумма операции,Категория,Описание,Бонусы (включая кэшбэк)";

    /// First sheet holds five rows: text dates, one typed date cell, one
    /// unparseable date, a text amount with a decimal comma and a text bonus.
    fn workbook_fixture() -> &'static Path {
        Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/operations.xlsx"
        ))
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-1500.50"), Some(-1500.5));
        assert_eq!(parse_amount("-1 500,50"), Some(-1500.5));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("single"), b',');
    }

    #[test]
    fn test_parse_csv() {
        let csv = format!(
            "{HEADER}\n\
             31.12.2021 16:44:00,-1500.50,Супермаркеты,Покупка,15.05\n\
             15.05.2023 10:30:00,-2500.00,Услуги,Оплата,0\n\
             20.05.2023 18:15:00,10000.00,Переводы,Перевод,\n"
        );

        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.rows()[0];
        assert_eq!(first.operation_date, at(2021, 12, 31, 16, 44, 0));
        assert_eq!(first.amount, -1500.50);
        assert_eq!(first.category, "Супермаркеты");
        assert_eq!(first.description, "Покупка");
        assert_eq!(first.cashback, 15.05);

        // Missing cashback defaults to zero
        assert_eq!(table.rows()[2].cashback, 0.0);
    }

    #[test]
    fn test_parse_csv_drops_bad_dates() {
        let csv = format!(
            "{HEADER}\n\
             2023-05-15,-100,Кафе,Обед,0\n\
             ,-200,Кафе,Ужин,0\n\
             16.05.2023 12:00:00,-300,Кафе,Завтрак,0\n"
        );

        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].amount, -300.0);
    }

    #[test]
    fn test_parse_csv_coerces_bad_numbers_and_missing_text() {
        let csv = format!(
            "{HEADER}\n\
             15.05.2023 10:00:00,n/a,,,bonus\n\
             15.05.2023 11:00:00,NaN,Кафе,Кофе,1\n"
        );

        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.amount, 0.0);
        assert_eq!(first.cashback, 0.0);
        assert_eq!(first.category, "");
        assert_eq!(first.description, "");

        // NaN parses as a float but is not a usable amount
        assert_eq!(table.rows()[1].amount, 0.0);
    }

    #[test]
    fn test_parse_csv_semicolon_export() {
        let csv = "Дата операции;Сумма операции;Категория;Описание\n\
                   15.05.2023 10:00:00;-1 234,56;Супермаркеты;Магазин\n";

        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].amount, -1234.56);
        assert_eq!(table.rows()[0].cashback, 0.0);
    }

    #[test]
    fn test_parse_csv_missing_required_column() {
        let csv = "Категория,Описание\nКафе,Обед\n";
        let result = parse_csv(csv.as_bytes());
        assert!(matches!(result, Err(Error::MissingColumn(_))));
    }

    #[test]
    fn test_parse_csv_header_only() {
        let table = parse_csv(HEADER.as_bytes()).unwrap();
        assert!(table.is_empty());

        let table = parse_csv("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_transactions_from_csv_file() {
        let file = temp_file(
            &format!("{HEADER}\n15.05.2023 10:30:00,-2500.00,Услуги,Оплата,0\n"),
            "csv",
        );
        let table = load_transactions(file.path());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].category, "Услуги");
    }

    #[test]
    fn test_load_transactions_missing_file() {
        let path = Path::new("/nonexistent/operations.xlsx");
        assert!(load_transactions(path).is_empty());
        assert!(try_load_transactions(path).is_err());
    }

    #[test]
    fn test_load_transactions_corrupt_workbook() {
        let file = temp_file("this is not a spreadsheet", "xlsx");
        assert!(load_transactions(file.path()).is_empty());
        assert!(try_load_transactions(file.path()).is_err());
    }

    #[test]
    fn test_load_transactions_from_workbook() {
        let table = try_load_transactions(workbook_fixture()).unwrap();

        // The row dated "вчера" is dropped
        assert_eq!(table.len(), 3);

        let first = &table.rows()[0];
        assert_eq!(first.operation_date, at(2023, 5, 15, 10, 30, 0));
        assert_eq!(first.amount, -1500.5);
        assert_eq!(first.category, "Супермаркеты");
        assert_eq!(first.description, "Покупка +7 (912) 345-67-89");
        assert_eq!(first.cashback, 15.0);

        // Date-formatted cell read as a timestamp, absent bonus cell is zero
        let second = &table.rows()[1];
        assert_eq!(second.operation_date, at(2023, 5, 16, 12, 0, 0));
        assert_eq!(second.amount, -2500.0);
        assert_eq!(second.category, "Услуги");
        assert_eq!(second.cashback, 0.0);

        // Text amount with a decimal comma, text bonus coerced to zero
        let third = &table.rows()[2];
        assert_eq!(third.operation_date, at(2023, 5, 20, 18, 15, 0));
        assert_eq!(third.amount, -3000.5);
        assert_eq!(third.description, "Кино");
        assert_eq!(third.cashback, 0.0);
    }

    #[test]
    fn test_load_transactions_workbook_fail_soft_matches() {
        assert_eq!(
            load_transactions(workbook_fixture()),
            try_load_transactions(workbook_fixture()).unwrap()
        );
    }

    #[test]
    fn test_load_transactions_missing_column_is_empty() {
        let file = temp_file("A,B\n1,2\n3,4\n", "csv");
        assert!(load_transactions(file.path()).is_empty());
        assert!(matches!(
            try_load_transactions(file.path()),
            Err(Error::MissingColumn(_))
        ));
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Int(5)), Cell::Number(5.0));
        assert_eq!(cell_from_data(&Data::Float(-1500.5)), Cell::Number(-1500.5));
        assert_eq!(
            cell_from_data(&Data::DateTime(ExcelDateTime::new(
                45062.5,
                ExcelDateTimeType::DateTime,
                false
            ))),
            Cell::DateTime(at(2023, 5, 16, 12, 0, 0))
        );
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2023-05-16T12:00:00".into())),
            Cell::DateTime(at(2023, 5, 16, 12, 0, 0))
        );
        assert_eq!(
            cell_from_data(&Data::String("Кафе".into())),
            Cell::Text("Кафе".into())
        );
    }
}
