use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let attach_status = if app.attached {
        Span::styled(
            "Tracker: ATTACHED",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "Tracker: DETACHED",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
    };

    let release_status = if app.release_events {
        Span::styled("Releases: reported", Style::default().fg(Color::Green))
    } else {
        Span::styled("Releases: synthesized", Style::default().fg(Color::Yellow))
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        attach_status,
        Span::raw("  │  "),
        flag_span("Suppress repeat", app.suppress_repeat),
        Span::raw("  │  "),
        flag_span("Prevent default", app.prevent_default),
        Span::raw("  │  "),
        release_status,
    ]);

    let paragraph = Paragraph::new(status_line).block(block);

    frame.render_widget(paragraph, area);
}

fn flag_span(name: &str, on: bool) -> Span<'static> {
    if on {
        Span::styled(format!("{}: ON", name), Style::default().fg(Color::Cyan))
    } else {
        Span::styled(format!("{}: off", name), Style::default().fg(Color::DarkGray))
    }
}
