use crossterm::event::KeyCode;

use crate::app::{AppState, Effect};

/// Keys typed into the activity field. Nothing gets through while a save is
/// in flight.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Effect> {
    if state.input_locked {
        return None;
    }

    match key {
        KeyCode::Esc => state.cancel_insert(),
        KeyCode::Enter => {
            return state
                .begin_append()
                .map(|(date, text)| Effect::Append { date, text });
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Char(c) => state.input_buffer.push(c),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::calendar::CalendarDate;
    use pretty_assertions::assert_eq;

    fn insert_state() -> AppState {
        let mut state = AppState::starting_at(CalendarDate::parse_key("2024-1-15").unwrap());
        state.enter_insert();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(KeyCode::Char(c), state);
        }
    }

    #[test]
    fn typing_fills_the_input_buffer() {
        let mut state = insert_state();

        type_text(&mut state, "Dentist");

        assert_eq!(state.input_buffer, "Dentist");
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut state = insert_state();
        type_text(&mut state, "Dentistx");

        handle_key(KeyCode::Backspace, &mut state);

        assert_eq!(state.input_buffer, "Dentist");
    }

    #[test]
    fn enter_sends_the_activity_for_the_selected_day() {
        let mut state = insert_state();
        type_text(&mut state, "Dentist");

        let effect = handle_key(KeyCode::Enter, &mut state);

        assert_eq!(
            effect,
            Some(Effect::Append {
                date: CalendarDate::parse_key("2024-1-15").unwrap(),
                text: "Dentist".to_string(),
            })
        );
        assert!(state.input_locked);
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut state = insert_state();

        assert_eq!(handle_key(KeyCode::Enter, &mut state), None);
        assert!(!state.input_locked);
    }

    #[test]
    fn keys_are_ignored_while_locked() {
        let mut state = insert_state();
        type_text(&mut state, "Dentist");
        handle_key(KeyCode::Enter, &mut state);

        type_text(&mut state, "more");
        let second = handle_key(KeyCode::Enter, &mut state);
        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(second, None);
        assert_eq!(state.input_buffer, "Dentist");
        assert_eq!(state.mode, Mode::Insert);
    }

    #[test]
    fn escape_discards_input() {
        let mut state = insert_state();
        type_text(&mut state, "Dentist");

        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.input_buffer.is_empty());
    }
}
