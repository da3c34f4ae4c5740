use crate::keys::KeyCodes;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Render the held keys table, oldest press first
pub fn render_held_keys(frame: &mut Frame, area: Rect, app: &App) {
    let border_color = if app.attached { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Held Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.pressed.is_empty() {
        let hint = if app.attached {
            "Press any keys to get the keycode"
        } else {
            "Detached - press F4 to attach"
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header_cells = ["Code", "Key"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let last = app.last_pressed();
    let rows: Vec<Row> = app
        .pressed
        .iter()
        .map(|&code| {
            let label = if app.show_labels {
                KeyCodes::get(code).unwrap_or("?")
            } else {
                ""
            };

            let style = if Some(code) == last {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Row::new(vec![Cell::from(code.to_string()), Cell::from(label)])
                .style(style)
                .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(6), // Code
        Constraint::Min(10),   // Label
    ];

    let table = Table::new(rows, widths).header(header).block(block);

    frame.render_widget(table, area);

    // Show held count
    let count_str = format!(" {} held ", app.pressed.len());
    let count_len = count_str.len() as u16;
    let count_x = area.x + area.width.saturating_sub(count_len + 2);

    if count_x > area.x {
        frame.render_widget(
            Paragraph::new(count_str).style(Style::default().fg(Color::DarkGray)),
            Rect::new(count_x, area.y, count_len, 1),
        );
    }
}
