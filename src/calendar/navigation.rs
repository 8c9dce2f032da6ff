use chrono::{Datelike, NaiveDate};

use crate::calendar::date::CalendarDate;
use crate::calendar::date_grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn step(self) -> i32 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// The (month, year) pair on screen. `month` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewState {
    first: NaiveDate,
}

impl ViewState {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
        // The last day must exist too, otherwise the grid cannot be built.
        NaiveDate::from_ymd_opt(year, month + 1, date_grid::days_in_month(month, year))?;
        Some(Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Moves one month in `direction`, rolling the year over between December
    /// and January. At the edge of the representable range the view stays put.
    pub fn advance(self, direction: Direction) -> Self {
        let month = (self.month() as i32 + direction.step() + 12).rem_euclid(12) as u32;
        let year = match direction {
            Direction::Forward if month == 0 => self.year() + 1,
            Direction::Backward if month == 11 => self.year() - 1,
            _ => self.year(),
        };

        Self::new(month, year).unwrap_or(self)
    }

    pub fn days_in_month(&self) -> u32 {
        date_grid::days_in_month(self.month(), self.year())
    }

    pub fn first_weekday(&self) -> u32 {
        date_grid::first_weekday(self.month(), self.year())
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn date(&self, day: u32) -> Option<CalendarDate> {
        self.first.with_day(day).map(CalendarDate::from_naive)
    }

    pub fn clamped_date(&self, day: u32) -> CalendarDate {
        let day = day.clamp(1, self.days_in_month().max(1));
        CalendarDate::from_naive(self.first.with_day(day).unwrap_or(self.first))
    }

    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::from_naive(self.first)
    }

    pub fn last_day(&self) -> CalendarDate {
        self.clamped_date(self.days_in_month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn view(month: u32, year: i32) -> ViewState {
        ViewState::new(month, year).unwrap()
    }

    #[test]
    fn december_forward_rolls_into_january_of_next_year() {
        let next = view(11, 2023).advance(Direction::Forward);

        assert_eq!((next.month(), next.year()), (0, 2024));
    }

    #[test]
    fn january_backward_rolls_into_december_of_previous_year() {
        let previous = view(0, 2024).advance(Direction::Backward);

        assert_eq!((previous.month(), previous.year()), (11, 2023));
    }

    #[test]
    fn november_forward_stays_in_the_same_year() {
        let next = view(10, 2023).advance(Direction::Forward);

        assert_eq!((next.month(), next.year()), (11, 2023));
    }

    #[test]
    fn february_backward_stays_in_the_same_year() {
        let previous = view(1, 2024).advance(Direction::Backward);

        assert_eq!((previous.month(), previous.year()), (0, 2024));
    }

    #[test]
    fn new_rejects_month_out_of_range() {
        assert!(ViewState::new(12, 2024).is_none());
    }

    #[test]
    fn containing_uses_the_dates_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let state = ViewState::containing(date);

        assert_eq!((state.month(), state.year()), (2, 2024));
    }

    #[test]
    fn clamped_date_never_overflows_the_month() {
        let february = view(1, 2023);

        assert_eq!(february.clamped_date(31).day(), 28);
        assert_eq!(february.clamped_date(0).day(), 1);
    }

    #[test]
    fn contains_checks_month_and_year() {
        let january = view(0, 2024);

        assert!(january.contains(CalendarDate::new(2024, 0, 31).unwrap()));
        assert!(!january.contains(CalendarDate::new(2023, 0, 31).unwrap()));
        assert!(!january.contains(CalendarDate::new(2024, 1, 1).unwrap()));
    }

    proptest! {
        #[test]
        fn twelve_steps_forward_add_one_year(month in 0u32..12, year in -5000i32..5000) {
            let start = view(month, year);
            let end = (0..12).fold(start, |state, _| state.advance(Direction::Forward));

            prop_assert_eq!(end, view(month, year + 1));
        }

        #[test]
        fn backward_undoes_forward(month in 0u32..12, year in -5000i32..5000) {
            let start = view(month, year);

            prop_assert_eq!(start.advance(Direction::Forward).advance(Direction::Backward), start);
            prop_assert_eq!(start.advance(Direction::Backward).advance(Direction::Forward), start);
        }

        #[test]
        fn every_reachable_day_key_parses_back(month in 0u32..12, year in -5000i32..5000, day in 1u32..=31) {
            let date = view(month, year).clamped_date(day);

            prop_assert_eq!(CalendarDate::parse_key(&date.key()), Ok(date));
        }
    }
}
