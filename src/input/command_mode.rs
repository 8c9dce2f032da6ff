use std::path::PathBuf;

use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppState, Effect, Mode, SyncStatus};
use crate::calendar::{CalendarDate, ViewState};
use crate::ui::theme::{THEME_NAMES, Theme};

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    GotoMonth(ViewState),
    GotoDate(CalendarDate),
    Export(Option<PathBuf>),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "w" | "write" | "r" | "reload" => Command::Reload,
        "help" => Command::Help,
        "goto" => match parts.get(1) {
            None => Command::Error("goto requires a date argument".to_string()),
            Some(arg) => parse_goto(arg),
        },
        "export" => {
            if parts.len() < 2 {
                Command::Export(None)
            } else {
                Command::Export(Some(PathBuf::from(parts[1..].join(" "))))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

/// `YYYY-MM-DD` selects a day, `YYYY-MM` a month.
fn parse_goto(arg: &str) -> Command {
    if let Ok(date) = NaiveDate::parse_from_str(arg, "%Y-%m-%d") {
        return Command::GotoDate(CalendarDate::from_naive(date));
    }

    let month = arg.split_once('-').and_then(|(year, month)| {
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        ViewState::new(month.checked_sub(1)?, year)
    });

    match month {
        Some(view) => Command::GotoMonth(view),
        None => Command::Error(format!("Invalid date format: {}", arg)),
    }
}

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Effect> {
    match key {
        KeyCode::Esc => leave_command_mode(state),
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
        }
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            leave_command_mode(state);
            return execute(command, state);
        }
        KeyCode::Char(c) => state.command_buffer.push(c),
        _ => {}
    }
    None
}

fn leave_command_mode(state: &mut AppState) {
    state.command_buffer.clear();
    state.mode = Mode::Normal;
}

fn execute(command: Command, state: &mut AppState) -> Option<Effect> {
    match command {
        Command::Quit => Some(Effect::Quit),
        Command::Reload => Some(Effect::Load(state.reload())),
        Command::GotoMonth(view) => Some(Effect::Load(state.go_to_month(view))),
        Command::GotoDate(date) => state.select_date(date).map(Effect::Load),
        Command::Export(path) => {
            state.begin_export();
            Some(Effect::Export(path))
        }
        Command::Theme(name) => {
            match Theme::named(&name) {
                Some(theme) => {
                    state.theme = theme;
                    tracing::info!("Switched to theme {}", state.theme.name);
                }
                None => {
                    state.sync_status = SyncStatus::Error(format!(
                        "Unknown theme '{}' (available: {})",
                        name,
                        THEME_NAMES.join(", ")
                    ));
                }
            }
            None
        }
        Command::Help => {
            state.open_help();
            None
        }
        Command::Error(message) => {
            state.sync_status = SyncStatus::Error(message);
            None
        }
    }
}
