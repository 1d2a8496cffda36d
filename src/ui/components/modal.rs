//! Modal dialog helpers.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::state::{Alert, AlertKind};
use crate::ui::theme::theme;

/// Compute a rectangle centered in `area`, sized in percent of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Compute a rectangle of fixed size centered in `area`, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render a blocking alert over everything else.
pub fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let t = theme();

    let (title, color) = match alert.kind {
        AlertKind::Info => (" Done ", t.success),
        AlertKind::Warning => (" Attention ", t.warning),
    };

    let width = (alert.message.chars().count() as u16 + 6).clamp(30, 70);
    let dialog = centered_rect_fixed(width, 7, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            alert.message.clone(),
            Style::default().fg(t.fg),
        )),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(t.dim))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, dialog);
}
