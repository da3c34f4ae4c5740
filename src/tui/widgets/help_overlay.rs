use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the help overlay
pub fn render_help(frame: &mut Frame, area: Rect) {
    // Center the help popup
    let popup_width = 54.min(area.width.saturating_sub(4));
    let popup_height = 17.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Yellow);

    let help_text = vec![
        Line::from(Span::styled(
            "Controls",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Every other key is tracked and shown with its code."),
        Line::from(""),
        Line::from(vec![
            Span::styled("  F1           ", key_style),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("  F2           ", key_style),
            Span::raw("Toggle repeat suppression"),
        ]),
        Line::from(vec![
            Span::styled("  F3           ", key_style),
            Span::raw("Toggle prevent default"),
        ]),
        Line::from(vec![
            Span::styled("  F4           ", key_style),
            Span::raw("Detach / attach the tracker"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Esc          ", key_style),
            Span::raw("Quit (unless default is prevented)"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+C       ", key_style),
            Span::raw("Quit application"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press F1 to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_popup = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(help_popup, popup_area);
}
