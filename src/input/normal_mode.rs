use crossterm::event::KeyCode;

use crate::app::{self, AppState, Effect, Mode};
use crate::calendar::Direction;

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Effect> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_days(-1).map(Effect::Load),
        KeyCode::Char('l') | KeyCode::Right => state.move_days(1).map(Effect::Load),
        KeyCode::Char('j') | KeyCode::Down => state.move_days(7).map(Effect::Load),
        KeyCode::Char('k') | KeyCode::Up => state.move_days(-7).map(Effect::Load),
        KeyCode::Char('t') => state.select_date(app::today()).map(Effect::Load),
        KeyCode::Char('g') => state.select_date(state.view.first_day()).map(Effect::Load),
        KeyCode::Char('G') => state.select_date(state.view.last_day()).map(Effect::Load),
        KeyCode::Char('{') | KeyCode::PageUp => {
            Some(Effect::Load(state.navigate(Direction::Backward)))
        }
        KeyCode::Char('}') | KeyCode::PageDown => {
            Some(Effect::Load(state.navigate(Direction::Forward)))
        }
        KeyCode::Char('a') | KeyCode::Enter => {
            state.enter_insert();
            None
        }
        KeyCode::Char('r') => Some(Effect::Load(state.reload())),
        KeyCode::Char('e') => {
            state.begin_export();
            Some(Effect::Export(None))
        }
        KeyCode::Char(':') => {
            enter_command_mode(state);
            None
        }
        KeyCode::Char('?') => {
            state.open_help();
            None
        }
        KeyCode::Char('q') => Some(Effect::Quit),
        _ => None,
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}
