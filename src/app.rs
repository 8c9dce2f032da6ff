use std::path::PathBuf;

use chrono::{Days, Local};

use crate::calendar::{ActivityIndex, CalendarDate, Direction, Locale, ViewState};
use crate::export::{ExportError, ExportSummary};
use crate::sync::activity_store::{FetchError, PersistError};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Loading,
    Saving,
    Exporting,
    Exported(PathBuf),
    Error(String),
}

/// Tags an issued load with the view it is for and the number of appends
/// confirmed before it went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub view: ViewState,
    appends_seen: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Load(LoadTicket),
    Append { date: CalendarDate, text: String },
    Export(Option<PathBuf>),
    Quit,
}

pub struct AppState {
    pub mode: Mode,
    pub view: ViewState,
    pub selected: CalendarDate,
    pub activities: ActivityIndex,
    pub sync_status: SyncStatus,
    pub command_buffer: String,
    pub input_buffer: String,
    /// Set while an append is in flight; the input field ignores keys.
    pub input_locked: bool,
    appends_confirmed: u64,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub locale: Locale,
}

impl AppState {
    pub fn new() -> Self {
        Self::starting_at(today())
    }

    pub fn starting_at(date: CalendarDate) -> Self {
        Self {
            mode: Mode::Normal,
            view: date.view(),
            selected: date,
            activities: ActivityIndex::new(),
            sync_status: SyncStatus::Synced,
            command_buffer: String::new(),
            input_buffer: String::new(),
            input_locked: false,
            appends_confirmed: 0,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            locale: Locale::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn reload(&mut self) -> LoadTicket {
        self.sync_status = SyncStatus::Loading;
        LoadTicket {
            view: self.view,
            appends_seen: self.appends_confirmed,
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> LoadTicket {
        self.view = self.view.advance(direction);
        self.selected = self.view.clamped_date(self.selected.day());
        self.reload()
    }

    pub fn go_to_month(&mut self, view: ViewState) -> LoadTicket {
        self.view = view;
        self.selected = view.clamped_date(self.selected.day());
        self.reload()
    }

    pub fn select_date(&mut self, date: CalendarDate) -> Option<LoadTicket> {
        self.selected = date;
        if self.view.contains(date) {
            return None;
        }
        self.view = date.view();
        Some(self.reload())
    }

    pub fn move_days(&mut self, days: i64) -> Option<LoadTicket> {
        let current = self.selected.naive();
        let moved = if days >= 0 {
            current.checked_add_days(Days::new(days as u64))
        } else {
            current.checked_sub_days(Days::new(days.unsigned_abs()))
        }?;
        self.select_date(CalendarDate::from_naive(moved))
    }

    /// A load that predates a confirmed append may miss it; it is dropped and
    /// a fresh ticket is returned in its place.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ActivityIndex, FetchError>,
    ) -> Option<LoadTicket> {
        let issued_for = ticket.view;
        if issued_for != self.view {
            tracing::warn!(
                "Discarding activities for {}/{}, now showing {}/{}",
                issued_for.month() + 1,
                issued_for.year(),
                self.view.month() + 1,
                self.view.year()
            );
            return None;
        }

        if ticket.appends_seen < self.appends_confirmed {
            tracing::info!(
                "Reloading {}/{}: an append was confirmed while it loaded",
                issued_for.month() + 1,
                issued_for.year()
            );
            return Some(self.reload());
        }

        match result {
            Ok(activities) => {
                tracing::info!(
                    "Loaded {} activities for {}/{}",
                    activities.activity_count(),
                    issued_for.month() + 1,
                    issued_for.year()
                );
                self.activities = activities;
                self.sync_status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.sync_status = SyncStatus::Error(e.to_string());
            }
        }
        None
    }

    pub fn enter_insert(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn cancel_insert(&mut self) {
        if self.input_locked {
            return;
        }
        self.input_buffer.clear();
        self.mode = Mode::Normal;
    }

    pub fn begin_append(&mut self) -> Option<(CalendarDate, String)> {
        if self.input_locked {
            return None;
        }

        let text = self.input_buffer.trim();
        if text.is_empty() {
            return None;
        }

        let text = text.to_string();
        self.input_locked = true;
        self.sync_status = SyncStatus::Saving;
        Some((self.selected, text))
    }

    pub fn finish_append(
        &mut self,
        date: CalendarDate,
        text: String,
        result: Result<i64, PersistError>,
    ) {
        self.input_locked = false;

        match result {
            Ok(id) => {
                tracing::info!("Saved activity {} on {}", id, date);
                self.appends_confirmed += 1;
                if self.view.contains(date) {
                    self.activities.push(date, text);
                }
                self.input_buffer.clear();
                self.mode = Mode::Normal;
                self.sync_status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.sync_status = SyncStatus::Error(e.to_string());
            }
        }
    }

    pub fn begin_export(&mut self) {
        self.sync_status = SyncStatus::Exporting;
    }

    pub fn finish_export(&mut self, result: Result<ExportSummary, ExportError>) {
        self.sync_status = match result {
            Ok(summary) => SyncStatus::Exported(summary.path),
            Err(e) => {
                tracing::error!("{}", e);
                SyncStatus::Error(e.to_string())
            }
        };
    }

    pub fn selected_activities(&self) -> &[String] {
        self.activities.activities(self.selected)
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
        self.help_scroll = 0;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn today() -> CalendarDate {
    CalendarDate::from_naive(Local::now().date_naive())
}
