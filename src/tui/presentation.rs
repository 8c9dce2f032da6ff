use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use activity_calendar::app::{AppState, Mode, SyncStatus};
use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    let title_text = format!("activity-calendar - {:?} Mode", app.mode);

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::month::render(f, app, content_chunks[0]);
    calendar_views::activity_list::render(f, app, content_chunks[1]);

    let (status_text, status_color) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.to_string(), app.theme.input)
    } else {
        let color = match app.sync_status {
            SyncStatus::Error(_) => app.theme.error,
            SyncStatus::Loading | SyncStatus::Saving | SyncStatus::Exporting => app.theme.pending,
            SyncStatus::Exported(_) => app.theme.success,
            SyncStatus::Synced => app.theme.status_bar,
        };
        let text = format!(
            "Activities this month: {} | {} | Press 'q' to quit, '?' for help",
            app.activities.activity_count(),
            status_label(&app.sync_status)
        );
        (text, color)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if matches!(app.mode, Mode::Insert) {
        dialogs::activity_form::render(f, app);
    }

    if app.show_help {
        dialogs::help::render(f, app);
    }
}

fn status_label(status: &SyncStatus) -> String {
    match status {
        SyncStatus::Synced => "Synced".to_string(),
        SyncStatus::Loading => "Loading...".to_string(),
        SyncStatus::Saving => "Saving...".to_string(),
        SyncStatus::Exporting => "Exporting...".to_string(),
        SyncStatus::Exported(path) => format!("Exported to {}", path.display()),
        SyncStatus::Error(message) => format!("Error: {}", message),
    }
}
