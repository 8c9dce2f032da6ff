pub mod calendar;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod export;
pub mod server;
pub mod app;

pub use calendar::{ActivityIndex, CalendarDate, Direction, Locale, ViewState};
pub use app::{AppState, Effect, LoadTicket, Mode, SyncStatus};
pub use sync::activity_store::ActivityStore;
pub use export::ExportPaginator;

pub use input::{command_mode, insert_mode, normal_mode};
