use crate::keys::label_or_code;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the counters panel
pub fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let count_line = |name: &'static str, value: usize, color: Color| {
        Line::from(vec![
            Span::styled(name, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:>6}", value),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let last = app
        .last_pressed()
        .map(label_or_code)
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        count_line("Key downs:  ", app.stats.key_downs, Color::Green),
        count_line("Key ups:    ", app.stats.key_ups, Color::Yellow),
        count_line("Focus lost: ", app.stats.focus_losses, Color::Magenta),
        Line::from(""),
        count_line("Held now:   ", app.pressed.len(), Color::White),
        count_line("Most held:  ", app.stats.max_held, Color::White),
        Line::from(""),
        Line::from(vec![
            Span::styled("Last key:   ", Style::default().fg(Color::Yellow)),
            Span::styled(last, Style::default().fg(Color::Cyan)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
