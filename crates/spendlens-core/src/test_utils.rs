//! Test fixtures shared by spendlens-core unit tests

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

use crate::models::{Transaction, TransactionTable};

/// Build a timestamp, panicking on invalid components
pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Monday, Tuesday and Saturday of one week in May 2023
pub fn week_of_may() -> TransactionTable {
    TransactionTable::new(vec![
        Transaction::new(at(2023, 5, 15, 0, 0, 0), -1500.50).with_category("Супермаркеты"),
        Transaction::new(at(2023, 5, 16, 0, 0, 0), -2500.00).with_category("Услуги"),
        Transaction::new(at(2023, 5, 20, 0, 0, 0), -3000.00).with_category("Развлечения"),
    ])
}

/// A purchase with a phone number in its description and a personal transfer
pub fn purchase_and_transfer() -> TransactionTable {
    TransactionTable::new(vec![
        Transaction::new(at(2023, 5, 15, 0, 0, 0), -1500.50)
            .with_category("Супермаркеты")
            .with_description("Покупка +7(123)456-78-90")
            .with_cashback(15.05),
        Transaction::new(at(2023, 5, 16, 0, 0, 0), 10000.00)
            .with_category("Переводы")
            .with_description("Перевод Ивану Иванову"),
    ])
}

/// Write `contents` to a temp file with the given extension
pub fn temp_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
