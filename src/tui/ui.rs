use crate::tui::app::App;
use crate::tui::widgets::{
    event_log::render_event_log, held_keys::render_held_keys, help_overlay::render_help,
    stats_panel::render_stats, status_bar::render_status_bar,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function for the TUI
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main layout: Header, Content, Status Bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    draw_header(frame, main_chunks[0]);

    // Content: held keys + stats on the left, listener log on the right
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(65),
        ])
        .split(main_chunks[1]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),     // Held keys
            Constraint::Length(10), // Stats
        ])
        .split(content_chunks[0]);

    render_held_keys(frame, left_chunks[0], app);
    render_stats(frame, left_chunks[1], app);
    render_event_log(frame, content_chunks[1], app);

    render_status_bar(frame, main_chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = vec![
        Span::styled(
            " KEYTRACK ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled("Press any keys to get the keycode", Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled("[F1] Help  [Ctrl+C] Quit", Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(Line::from(title)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}
