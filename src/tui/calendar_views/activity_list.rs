use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use activity_calendar::app::AppState;

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let activities = app.selected_activities();
    let date = app.selected;

    let title = format!(
        "{} {} {} {}",
        app.locale.weekday_label(date.weekday_index()),
        date.day(),
        app.locale.month_name(date.month()),
        date.year()
    );

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if activities.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("No activities", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        for (idx, activity) in activities.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(app.theme.activity_marker)),
                Span::raw(activity.as_str()),
            ]));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
