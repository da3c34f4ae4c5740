use crate::event::EventKind;
use crate::keys::label_or_code;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the listener event log, newest at the bottom
pub fn render_event_log(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Listener Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_height = area.height.saturating_sub(2) as usize;
    let total_entries = app.event_log.len();

    let entries: Vec<&_> = app.event_log.iter().rev().take(inner_height).collect();

    let items: Vec<ListItem> = entries
        .iter()
        .rev()
        .map(|entry| {
            let (kind_str, kind_color) = match entry.kind {
                EventKind::KeyDown => ("DOWN", Color::Green),
                EventKind::KeyUp => ("UP  ", Color::Yellow),
                EventKind::Blur => ("BLUR", Color::Magenta),
            };

            let code_str = entry
                .code
                .map(|c| format!("{:>3}", c))
                .unwrap_or_else(|| "  -".to_string());

            let key_str = match entry.code {
                Some(code) if app.show_labels => label_or_code(code),
                Some(_) => String::new(),
                None => "all keys released".to_string(),
            };

            let spans = vec![
                Span::styled(
                    format!("[{}] ", entry.at.format("%H:%M:%S%.3f")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{} ", kind_str), Style::default().fg(kind_color)),
                Span::styled(format!("{} ", code_str), Style::default().fg(Color::White)),
                Span::styled(truncate_str(&key_str, 22), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  held: {}", entry.pressed.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block);

    frame.render_widget(list, area);

    if total_entries > inner_height {
        let scroll_info = format!(" {}/{} ", inner_height, total_entries);
        let scroll_len = scroll_info.len() as u16;
        let scroll_x = area.x + area.width.saturating_sub(scroll_len + 2);

        if scroll_x > area.x {
            frame.render_widget(
                Paragraph::new(scroll_info).style(Style::default().fg(Color::DarkGray)),
                Rect::new(scroll_x, area.y, scroll_len, 1),
            );
        }
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
