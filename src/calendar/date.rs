use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::calendar::navigation::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    #[error("Malformed date key '{0}': expected year-month-day")]
    Malformed(String),
    #[error("Date key '{0}' does not name a calendar day")]
    OutOfRange(String),
}

/// A single calendar day.
///
/// Months are 0-based in memory (`0` = January). The only 1-based form is the
/// serialized key produced by [`CalendarDate::key`], e.g. `"2024-1-15"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateKeyError> {
        month
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(year, month, day))
            .map(Self)
            .ok_or_else(|| DateKeyError::OutOfRange(format!("{}-[month {}]-{}", year, month, day)))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }

    pub fn view(&self) -> ViewState {
        ViewState::containing(self.0)
    }

    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.year(), self.month() + 1, self.day())
    }

    /// Parses `year-month-day` with a 1-based month. Zero padding is accepted,
    /// so ISO dates such as `2024-01-15` parse to the same day as `2024-1-15`.
    pub fn parse_key(key: &str) -> Result<Self, DateKeyError> {
        let malformed = || DateKeyError::Malformed(key.to_string());

        // The year may carry its own sign, so split from the right.
        let parts: Vec<&str> = key.trim().rsplitn(3, '-').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(malformed());
        };

        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let day: u32 = day.parse().map_err(|_| malformed())?;

        month
            .checked_sub(1)
            .and_then(|month0| CalendarDate::new(year, month0, day).ok())
            .ok_or_else(|| DateKeyError::OutOfRange(key.to_string()))
    }

    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for CalendarDate {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_key(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::navigation::Direction;

    #[test]
    fn key_uses_one_based_month_without_padding() {
        let date = CalendarDate::new(2024, 0, 15).unwrap();

        assert_eq!(date.key(), "2024-1-15");
        assert_eq!(date.month(), 0);
    }

    #[test]
    fn december_key_is_twelve() {
        let date = CalendarDate::new(2023, 11, 31).unwrap();

        assert_eq!(date.key(), "2023-12-31");
    }

    #[test]
    fn parse_key_restores_zero_based_month() {
        let date = CalendarDate::parse_key("2024-1-15").unwrap();

        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 0);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn parse_key_accepts_iso_padding() {
        let padded = CalendarDate::parse_key("2024-01-05").unwrap();
        let plain = CalendarDate::parse_key("2024-1-5").unwrap();

        assert_eq!(padded, plain);
        assert_eq!(padded.key(), "2024-1-5");
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert!(matches!(CalendarDate::parse_key("not a date"), Err(DateKeyError::Malformed(_))));
        assert!(matches!(CalendarDate::parse_key("2024-1"), Err(DateKeyError::Malformed(_))));
        assert!(matches!(CalendarDate::parse_key("2024-01-15T00:00:00Z"), Err(DateKeyError::Malformed(_))));
    }

    #[test]
    fn parse_key_rejects_impossible_days() {
        assert!(matches!(CalendarDate::parse_key("2023-2-29"), Err(DateKeyError::OutOfRange(_))));
        assert!(matches!(CalendarDate::parse_key("2024-0-10"), Err(DateKeyError::OutOfRange(_))));
        assert!(matches!(CalendarDate::parse_key("2024-13-1"), Err(DateKeyError::OutOfRange(_))));
    }

    #[test]
    fn years_before_one_round_trip() {
        let date = ViewState::new(0, 0)
            .unwrap()
            .advance(Direction::Backward)
            .date(15)
            .unwrap();

        assert_eq!(date.key(), "-1-12-15");
        assert_eq!(CalendarDate::parse_key(&date.key()), Ok(date));
        assert_eq!(CalendarDate::parse_key(&date.iso()), Ok(date));
    }

    #[test]
    fn sign_only_year_is_malformed() {
        assert!(matches!(CalendarDate::parse_key("-12-15"), Err(DateKeyError::Malformed(_))));
        assert!(matches!(CalendarDate::parse_key("2024--1-5"), Err(DateKeyError::Malformed(_))));
    }

    #[test]
    fn new_rejects_month_twelve() {
        assert!(CalendarDate::new(2024, 12, 1).is_err());
    }

    #[test]
    fn weekday_index_is_monday_first() {
        let monday = CalendarDate::new(2024, 0, 1).unwrap();
        let sunday = CalendarDate::new(2024, 0, 7).unwrap();

        assert_eq!(monday.weekday_index(), 0);
        assert_eq!(sunday.weekday_index(), 6);
    }

    #[test]
    fn dates_order_chronologically() {
        let early = CalendarDate::parse_key("2023-12-31").unwrap();
        let late = CalendarDate::parse_key("2024-1-2").unwrap();

        assert!(early < late);
    }

    #[test]
    fn iso_is_zero_padded() {
        let date = CalendarDate::new(2024, 2, 9).unwrap();
        assert_eq!(date.iso(), "2024-03-09");
    }
}
