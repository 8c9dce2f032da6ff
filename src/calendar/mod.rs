pub mod date;
pub mod date_grid;
pub mod navigation;
pub mod activity_index;

pub use date::{CalendarDate, DateKeyError};
pub use date_grid::{Locale, MonthGrid, days_in_month, first_weekday, month_grid};
pub use navigation::{Direction, ViewState};
pub use activity_index::ActivityIndex;
