use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use activity_calendar::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let form_width = area.width.min(70);
    let form_height = area.height.min(9);
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let date = app.selected;
    let inactive_color = Color::DarkGray;

    let hint = if app.input_locked {
        Span::styled("Saving...", Style::default().fg(app.theme.pending))
    } else {
        Span::styled("Enter = Save | Esc = Cancel", Style::default().fg(inactive_color))
    };

    let form_text = vec![
        Line::from(vec![Span::styled("Add Activity", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date: ", Style::default().fg(inactive_color)),
            Span::raw(format!(
                "{} {} {} {}",
                app.locale.weekday_label(date.weekday_index()),
                date.day(),
                app.locale.month_name(date.month()),
                date.year()
            )),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Activity: ", Style::default().fg(app.theme.selected_bg)),
            Span::styled(app.input_buffer.as_str(), Style::default().fg(app.theme.input)),
            Span::styled(if app.input_locked { "" } else { "_" }, Style::default().fg(app.theme.input)),
        ]),
        Line::from(""),
        Line::from(vec![hint]),
    ];

    let form = Paragraph::new(form_text)
        .wrap(Wrap { trim: false })
        .block(Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form, form_area);
}
