// Header component
//
// Renders the logo, the search box, and the theme indicator.

use crate::theme::ThemeMode;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const LOGO: &str = "◆ API Docs";
const SEARCH_PLACEHOLDER: &str = "Search docs…";
const SEARCH_WIDTH: u16 = 36;

/// Render the header bar at the top of the screen
///
/// Search box is hidden on compact terminals; the menu hint only shows
/// while the sidebar is an overlay.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.palette();
    let bp = Breakpoint::from_width(area.width);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.title))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Left: menu hint + logo
    let mut left = Vec::new();
    if !bp.sidebar_docked() {
        let menu = if app.sidebar_open() { "✕ " } else { "≡ " };
        left.push(Span::styled(menu, Style::default().fg(theme.muted)));
    }
    left.push(Span::styled(
        LOGO,
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    ));
    let left = Line::from(left);

    // Right: theme indicator + help hint
    let (icon, label) = match app.theme.mode() {
        ThemeMode::Dark => ("☾", "Dark"),
        ThemeMode::Light => ("☀", "Light"),
    };
    let right = Line::from(vec![
        Span::styled(
            format!("{} {}", icon, label),
            Style::default().fg(theme.highlight),
        ),
        Span::styled("  ? help ", Style::default().fg(theme.muted)),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(left.width() as u16 + 1),
            Constraint::Min(0),
            Constraint::Length(right.width() as u16),
        ])
        .split(inner);

    f.render_widget(Paragraph::new(left), chunks[0]);
    f.render_widget(Paragraph::new(right).right_aligned(), chunks[2]);

    if bp.shows_search() {
        render_search(f, chunks[1], app);
    }
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.palette();
    let width = SEARCH_WIDTH.min(area.width);
    if width < 8 {
        return;
    }
    let x = area.x + (area.width - width) / 2;
    let box_area = Rect::new(x, area.y, width, 1);

    let line = match &app.search {
        Some(query) => {
            let matches = app.search_matches().len();
            let count = format!(" ({})", matches);
            // Keep the tail of long queries visible
            let room = (width as usize).saturating_sub(count.width() + 4);
            let shown: String = if query.width() > room {
                let skip = query.chars().count().saturating_sub(room);
                query.chars().skip(skip).collect()
            } else {
                query.clone()
            };
            Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme.highlight)),
                Span::styled(shown, Style::default().fg(theme.foreground)),
                Span::styled("▏", Style::default().fg(theme.highlight)),
                Span::styled(count, Style::default().fg(theme.muted)),
            ])
        }
        None => Line::from(vec![
            Span::styled(" / ", Style::default().fg(theme.muted)),
            Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(theme.muted)),
        ]),
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.selection)),
        box_area,
    );
}
