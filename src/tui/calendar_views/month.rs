use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use activity_calendar::{app::AppState, ui::month_view};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(layout.title.clone(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(
            layout
                .weekday_labels
                .iter()
                .map(|label| Span::styled(format!(" {:<3} ", label), Style::default().fg(app.theme.weekday_header)))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for day_cell in &week.days {
            let Some(date) = day_cell.date else {
                day_spans.push(Span::styled("  .  ", Style::default().fg(app.theme.blank_cell)));
                continue;
            };

            let marker = if day_cell.has_activities() { '*' } else { ' ' };
            let day_text = format!(" {:>2}{} ", date.day(), marker);

            let mut style = Style::default();

            if day_cell.is_selected {
                style = style.bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD);
            } else if day_cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            } else if day_cell.has_activities() {
                style = style.fg(app.theme.activity_marker);
            }

            if day_cell.has_activities() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(day_text, style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Navigate | "),
        Span::styled("{ }", Style::default().fg(Color::Cyan)),
        Span::raw(" = Month | "),
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" = Add activity | "),
        Span::styled("e", Style::default().fg(Color::Magenta)),
        Span::raw(" = Export PDF"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
