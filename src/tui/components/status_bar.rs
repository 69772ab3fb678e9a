// Status bar component
//
// Renders the active section, keybind hints for the focused panel, and the
// most recent warning from the log buffer.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.palette();
    let bp = Breakpoint::from_width(area.width);

    let hint = if app.search.is_some() {
        "type to filter · Enter open first match · Esc cancel"
    } else {
        app.focus_hint()
    };

    let mut left = vec![
        Span::styled(
            format!(" {} ", app.active_section()),
            Style::default().fg(theme.selection_fg).bg(theme.selection),
        ),
        Span::styled(
            format!(" {}", hint),
            Style::default().fg(theme.status_bar),
        ),
    ];
    if !bp.sidebar_docked() && app.search.is_none() {
        left.push(Span::styled(" · m menu", Style::default().fg(theme.status_bar)));
    }
    let left = Line::from(left);

    let warning = app.log_buffer.latest_warning().map(|entry| {
        let max = (area.width as usize / 2).max(10);
        let at = entry.timestamp.with_timezone(&Local).format("%H:%M:%S");
        let mut message = format!("⚠ {} {} ", at, entry.message);
        if message.width() > max {
            message = message.chars().take(max.saturating_sub(2)).collect();
            message.push_str("… ");
        }
        Line::from(Span::styled(message, Style::default().fg(theme.warning)))
    });

    let right_width = warning.as_ref().map_or(0, |w| w.width() as u16);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    f.render_widget(
        Paragraph::new(left).style(Style::default().bg(theme.background)),
        chunks[0],
    );
    if let Some(warning) = warning {
        f.render_widget(
            Paragraph::new(warning)
                .right_aligned()
                .style(Style::default().bg(theme.background)),
            chunks[1],
        );
    }
}
