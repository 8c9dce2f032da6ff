use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use activity_calendar::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = area.width.min(60);
    let help_height = area.height.min(23);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.help_section);
    let help_text = vec![
        Line::from(vec![Span::styled("activity-calendar Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Next/previous week"),
        Line::from("  t        - Jump to today"),
        Line::from("  g/G      - First/last day of month"),
        Line::from("  { / }    - Previous/next month"),
        Line::from(""),
        Line::from(vec![Span::styled("Activities:", section)]),
        Line::from("  a/Enter  - Add activity to selected day"),
        Line::from("  Enter    - Save (in the activity field)"),
        Line::from("  Esc      - Discard (in the activity field)"),
        Line::from("  r        - Reload month from the service"),
        Line::from("  e        - Export all activities to PDF"),
        Line::from(""),
        Line::from(vec![Span::styled("Commands:", section)]),
        Line::from("  :q       - Quit"),
        Line::from("  :w / :r  - Reload month"),
        Line::from("  :goto    - Jump (:goto 2025-12 or :goto 2025-12-25)"),
        Line::from("  :export  - Export PDF (:export [PATH])"),
        Line::from("  :theme   - Change theme (teal, contrast)"),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
