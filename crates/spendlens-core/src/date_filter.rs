//! Date-range windows over a transaction table

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::models::TransactionTable;

/// Window kind around a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Day,
    /// Monday through Sunday of the reference week
    Week,
    Month,
    Year,
    /// No filtering
    All,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::Week => "W",
            Self::Month => "M",
            Self::Year => "Y",
            Self::All => "ALL",
        }
    }

    /// Inclusive calendar bounds of the window, `None` for [`DateRange::All`]
    ///
    /// A window that would leave the supported calendar is an
    /// [`Error::InvalidArgument`].
    pub fn bounds(&self, reference: NaiveDate) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let window = match self {
            Self::All => return Ok(None),
            Self::Day => Some((reference, reference)),
            Self::Week => week_bounds(reference),
            Self::Month => month_bounds(reference),
            Self::Year => NaiveDate::from_ymd_opt(reference.year(), 1, 1)
                .zip(NaiveDate::from_ymd_opt(reference.year(), 12, 31)),
        };
        window.map(Some).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} window around {} is out of range",
                self, reference
            ))
        })
    }
}

fn week_bounds(reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let offset = Days::new(u64::from(reference.weekday().num_days_from_monday()));
    let start = reference.checked_sub_days(offset)?;
    Some((start, start.checked_add_days(Days::new(6))?))
}

fn month_bounds(reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = reference.with_day(1)?;
    let next_month = if reference.month() == 12 {
        NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

impl std::str::FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" => Ok(Self::Day),
            "w" | "week" => Ok(Self::Week),
            "m" | "month" => Ok(Self::Month),
            "y" | "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown date range: {} (valid: D, W, M, Y, ALL)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keep the transactions whose calendar date falls in the window
///
/// Fails only when the window around `reference` cannot be represented.
pub fn filter_transactions_by_date(
    table: &TransactionTable,
    reference: NaiveDate,
    range: DateRange,
) -> Result<TransactionTable> {
    let bounds = range.bounds(reference)?;
    if table.is_empty() {
        return Ok(table.clone());
    }

    Ok(match bounds {
        Some((start, end)) => table.filtered(|t| {
            let date = t.date();
            date >= start && date <= end
        }),
        None => table.clone(),
    })
}

/// String-argument form of [`filter_transactions_by_date`]
///
/// An unknown range, an unparseable reference date or a window outside the
/// calendar returns [`Error::InvalidArgument`], even for an empty table.
pub fn filter_transactions_by_date_str(
    table: &TransactionTable,
    reference: &str,
    range: &str,
) -> Result<TransactionTable> {
    let range: DateRange = range.parse()?;
    let reference = parse_reference_date(reference)?;
    filter_transactions_by_date(table, reference, range)
}

/// Parse a reference date given as a date or a timestamp
pub fn parse_reference_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d.%m.%Y %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(Error::InvalidArgument(format!("Unable to parse date: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::test_utils::{at, date};

    fn spread_table() -> TransactionTable {
        TransactionTable::new(vec![
            Transaction::new(at(2021, 12, 31, 16, 44, 0), -1500.50),
            Transaction::new(at(2023, 5, 15, 10, 30, 0), -2500.00),
            Transaction::new(at(2023, 5, 20, 18, 15, 0), 10000.00),
            Transaction::new(at(2023, 5, 31, 23, 59, 59), -10.00),
            Transaction::new(at(2023, 6, 1, 0, 0, 0), -20.00),
        ])
    }

    #[test]
    fn test_parse_date_range() {
        assert_eq!("M".parse::<DateRange>().unwrap(), DateRange::Month);
        assert_eq!("all".parse::<DateRange>().unwrap(), DateRange::All);
        assert_eq!("Week".parse::<DateRange>().unwrap(), DateRange::Week);
        assert!(matches!(
            "INVALID".parse::<DateRange>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_week_bounds_start_monday() {
        // Thursday 2023-05-18 -> Monday 15th .. Sunday 21st
        assert_eq!(
            DateRange::Week.bounds(date(2023, 5, 18)).unwrap(),
            Some((date(2023, 5, 15), date(2023, 5, 21)))
        );
        // A Monday is the start of its own week
        assert_eq!(
            DateRange::Week.bounds(date(2023, 5, 15)).unwrap(),
            Some((date(2023, 5, 15), date(2023, 5, 21)))
        );
        // Weeks can span a year boundary
        assert_eq!(
            DateRange::Week.bounds(date(2021, 1, 1)).unwrap(),
            Some((date(2020, 12, 28), date(2021, 1, 3)))
        );
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            DateRange::Month.bounds(date(2023, 5, 17)).unwrap(),
            Some((date(2023, 5, 1), date(2023, 5, 31)))
        );
        assert_eq!(
            DateRange::Month.bounds(date(2024, 2, 10)).unwrap(),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            DateRange::Month.bounds(date(2023, 12, 25)).unwrap(),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
    }

    #[test]
    fn test_year_and_day_bounds() {
        assert_eq!(
            DateRange::Year.bounds(date(2023, 5, 17)).unwrap(),
            Some((date(2023, 1, 1), date(2023, 12, 31)))
        );
        assert_eq!(
            DateRange::Day.bounds(date(2023, 5, 17)).unwrap(),
            Some((date(2023, 5, 17), date(2023, 5, 17)))
        );
        assert_eq!(DateRange::All.bounds(date(2023, 5, 17)).unwrap(), None);
    }

    #[test]
    fn test_filter_month_ignores_time_of_day() {
        let filtered =
            filter_transactions_by_date(&spread_table(), date(2023, 5, 1), DateRange::Month)
                .unwrap();
        assert_eq!(filtered.len(), 3);
        // Last second of the month is still inside
        assert_eq!(filtered.rows()[2].operation_date, at(2023, 5, 31, 23, 59, 59));
    }

    #[test]
    fn test_filter_year_and_day() {
        let table = spread_table();
        assert_eq!(
            filter_transactions_by_date(&table, date(2021, 6, 1), DateRange::Year).unwrap().len(),
            1
        );
        assert_eq!(
            filter_transactions_by_date(&table, date(2023, 5, 20), DateRange::Day).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_filter_all_returns_input_unchanged() {
        let table = spread_table();
        let filtered =
            filter_transactions_by_date(&table, date(2000, 1, 1), DateRange::All).unwrap();
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_filter_str_month() {
        let filtered = filter_transactions_by_date_str(&spread_table(), "2023-05-01", "M").unwrap();
        assert_eq!(filtered.len(), 3);

        let filtered = filter_transactions_by_date_str(&spread_table(), "2023-05-15", "W").unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_str_invalid_range_fails_loud() {
        let result = filter_transactions_by_date_str(&spread_table(), "2023-05-01", "INVALID");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result =
            filter_transactions_by_date_str(&TransactionTable::empty(), "2023-05-01", "INVALID");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_filter_str_invalid_reference_date() {
        let result = filter_transactions_by_date_str(&spread_table(), "not a date", "M");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_filter_empty_table() {
        let empty = TransactionTable::empty();
        let filtered =
            filter_transactions_by_date(&empty, date(2023, 5, 1), DateRange::Week).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_window_past_calendar_end_is_invalid() {
        assert!(matches!(
            DateRange::Week.bounds(NaiveDate::MAX),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            DateRange::Month.bounds(NaiveDate::MAX),
            Err(Error::InvalidArgument(_))
        ));
        // Year and day windows still fit
        assert!(DateRange::Year.bounds(NaiveDate::MAX).unwrap().is_some());
        assert!(DateRange::Day.bounds(NaiveDate::MAX).unwrap().is_some());
    }

    #[test]
    fn test_filter_out_of_range_window_does_not_widen_to_all() {
        let reference = NaiveDate::from_ymd_opt(262142, 12, 15).unwrap();
        let result = filter_transactions_by_date(&spread_table(), reference, DateRange::Month);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        // Validated before the empty-table shortcut
        let result =
            filter_transactions_by_date(&TransactionTable::empty(), reference, DateRange::Month);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_filter_str_week_at_calendar_end() {
        let result = filter_transactions_by_date_str(&spread_table(), "+262142-12-31", "W");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_reference_date_formats() {
        assert_eq!(parse_reference_date("2023-05-15").unwrap(), date(2023, 5, 15));
        assert_eq!(parse_reference_date("15.05.2023").unwrap(), date(2023, 5, 15));
        assert_eq!(
            parse_reference_date("2023-05-15 14:30:00").unwrap(),
            date(2023, 5, 15)
        );
    }
}
