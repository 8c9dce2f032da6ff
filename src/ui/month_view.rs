use crate::app::{self, AppState};
use crate::calendar::{month_grid, CalendarDate};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub title: String,
    pub weekday_labels: [&'static str; 7],
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

/// One grid slot. Leading and trailing slots have no date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Option<CalendarDate>,
    pub is_selected: bool,
    pub is_today: bool,
    pub activity_count: usize,
}

impl DayCell {
    pub fn new(date: Option<CalendarDate>) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            activity_count: 0,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_activities(mut self, count: usize) -> Self {
        self.activity_count = count;
        self
    }

    pub fn has_activities(&self) -> bool {
        self.activity_count > 0
    }
}

pub fn calculate_layout(state: &AppState) -> MonthLayout {
    calculate_layout_on(state, app::today())
}

pub fn calculate_layout_on(state: &AppState, today: CalendarDate) -> MonthLayout {
    let grid = month_grid(state.view);

    let weeks = grid
        .weeks
        .iter()
        .map(|slots| Week {
            days: slots
                .iter()
                .map(|slot| {
                    let date = slot.and_then(|day| state.view.date(day));
                    match date {
                        Some(date) => DayCell::new(Some(date))
                            .with_selected(date == state.selected)
                            .with_today(date == today)
                            .with_activities(state.activities.activities(date).len()),
                        None => DayCell::new(None),
                    }
                })
                .collect(),
        })
        .collect();

    MonthLayout {
        title: format!(
            "{} {}",
            state.locale.month_name(state.view.month()),
            state.view.year()
        ),
        weekday_labels: *state.locale.weekday_labels(),
        weeks,
    }
}
