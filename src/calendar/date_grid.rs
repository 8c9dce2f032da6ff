use chrono::{Datelike, NaiveDate};

use crate::calendar::navigation::ViewState;

const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEKDAYS_ES: [&str; 7] = ["Lun", "Mar", "Mie", "Jue", "Vie", "Sab", "Dom"];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
const MONTHS_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
    "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
];

/// Number of days in a 0-based `month`: day 0 of the following month.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    let (next_year, next_month) = if month >= 11 {
        (year + 1, 1)
    } else {
        (year, month + 2)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Monday-first weekday (Monday = 0) of the 1st of a 0-based `month`. This is
/// also the number of blank cells before day 1 in the grid.
pub fn first_weekday(month: u32, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|first| first.weekday().num_days_from_monday())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "es" | "spanish" | "español" => Locale::Spanish,
            _ => Locale::English,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }

    pub fn weekday_labels(self) -> &'static [&'static str; 7] {
        match self {
            Locale::English => &WEEKDAYS_EN,
            Locale::Spanish => &WEEKDAYS_ES,
        }
    }

    pub fn weekday_label(self, weekday: u32) -> &'static str {
        self.weekday_labels()[weekday as usize % 7]
    }

    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Locale::English => &MONTHS_EN,
            Locale::Spanish => &MONTHS_ES,
        };
        names[month as usize % 12]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub view: ViewState,
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.weeks
            .first()
            .map(|week| week.iter().take_while(|cell| cell.is_none()).count())
            .unwrap_or(0)
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().flatten().copied())
    }
}

pub fn month_grid(view: ViewState) -> MonthGrid {
    let leading = view.first_weekday() as usize;
    let cells = leading + view.days_in_month() as usize;

    let mut weeks = Vec::with_capacity(cells.div_ceil(7));
    let mut week = [None; 7];

    for cell in 0..cells {
        if cell >= leading {
            week[cell % 7] = Some((cell - leading + 1) as u32);
        }
        if cell % 7 == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }

    if cells % 7 != 0 {
        weeks.push(week);
    }

    MonthGrid { view, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn view(month: u32, year: i32) -> ViewState {
        ViewState::new(month, year).unwrap()
    }

    #[test]
    fn february_has_29_days_in_leap_years() {
        assert_eq!(days_in_month(1, 2000), 29);
        assert_eq!(days_in_month(1, 2024), 29);
    }

    #[test]
    fn february_has_28_days_otherwise() {
        assert_eq!(days_in_month(1, 1900), 28);
        assert_eq!(days_in_month(1, 2023), 28);
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(days_in_month(11, 2023), 31);
    }

    #[test]
    fn thirty_day_months() {
        for month in [3, 5, 8, 10] {
            assert_eq!(days_in_month(month, 2024), 30);
        }
    }

    #[test]
    fn january_2024_starts_on_monday() {
        assert_eq!(first_weekday(0, 2024), 0);
        assert_eq!(days_in_month(0, 2024), 31);
    }

    #[test]
    fn month_starting_on_sunday_gets_six_blanks() {
        // September 2024 starts on a Sunday.
        let grid = month_grid(view(8, 2024));

        assert_eq!(first_weekday(8, 2024), 6);
        assert_eq!(grid.leading_blanks(), 6);
        assert_eq!(grid.weeks[0][6], Some(1));
    }

    #[test]
    fn month_starting_on_monday_has_no_blanks() {
        let grid = month_grid(view(0, 2024));

        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.weeks[0][0], Some(1));
    }

    #[test]
    fn grid_lists_every_day_once() {
        let grid = month_grid(view(1, 2024));
        let days: Vec<u32> = grid.days().collect();

        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn february_2021_fits_in_four_weeks() {
        // Starts on Monday and has 28 days.
        let grid = month_grid(view(1, 2021));
        assert_eq!(grid.weeks.len(), 4);
    }

    #[test]
    fn weekday_labels_are_monday_first() {
        assert_eq!(Locale::English.weekday_label(0), "Mon");
        assert_eq!(Locale::English.weekday_label(6), "Sun");
        assert_eq!(Locale::Spanish.weekday_label(0), "Lun");
        assert_eq!(Locale::Spanish.weekday_label(6), "Dom");
    }

    #[test]
    fn month_names_are_zero_based() {
        assert_eq!(Locale::English.month_name(0), "January");
        assert_eq!(Locale::Spanish.month_name(11), "Diciembre");
    }

    #[test]
    fn locale_from_code_defaults_to_english() {
        assert_eq!(Locale::from_code("es"), Locale::Spanish);
        assert_eq!(Locale::from_code("ES"), Locale::Spanish);
        assert_eq!(Locale::from_code("fr"), Locale::English);
    }

    proptest! {
        #[test]
        fn days_in_month_is_the_last_valid_day(month in 0u32..12, year in 1i32..4000) {
            let days = days_in_month(month, year);

            prop_assert!(NaiveDate::from_ymd_opt(year, month + 1, days).is_some());
            prop_assert!(NaiveDate::from_ymd_opt(year, month + 1, days + 1).is_none());
        }

        #[test]
        fn grid_rows_are_full_weeks(month in 0u32..12, year in 1i32..4000) {
            let grid = month_grid(view(month, year));

            prop_assert_eq!(grid.leading_blanks() as u32, first_weekday(month, year));
            prop_assert_eq!(grid.days().count() as u32, days_in_month(month, year));
        }
    }
}
