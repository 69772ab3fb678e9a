// Views module - screen-level rendering logic
//
// One screen: header on top, status bar at the bottom, sidebar and content
// pane in between. Below the docking breakpoint the sidebar is drawn as an
// overlay on top of the content instead of beside it.

mod modal;

use super::app::App;
use crate::tui::components::{header, status_bar};
use crate::tui::traits::{Component, RenderContext};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.set_width(area.width);

    let bg_block = Block::default().style(Style::default().bg(app.theme.palette().background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, chunks[0], app);
    render_body(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    // Render modal overlay (on top of everything)
    if let Some(modal_state) = app.modal {
        modal::render(f, &modal_state, app);
    }

    // Render toast notification (on top of modal too)
    if let Some(ref toast) = app.toast {
        toast.render(f, area, app.theme.palette());
    }

    app.clear_expired_toast();
}

/// Sidebar and content, docked side by side or as an overlay
fn render_body(f: &mut Frame, area: Rect, app: &mut App) {
    let bp = app.breakpoint();
    let sidebar_width = bp.sidebar_width(area.width);
    let ctx = RenderContext::new(app.theme.palette(), app.focused, &app.active_section);

    if bp.sidebar_docked() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(area);
        app.sidebar.render(f, chunks[0], &ctx);
        app.content.render(f, chunks[1], &ctx);
        return;
    }

    app.content.render(f, area, &ctx);
    if app.sidebar_open() {
        let overlay = Rect {
            width: sidebar_width.min(area.width),
            ..area
        };
        f.render_widget(Clear, overlay);
        app.sidebar.render(f, overlay, &ctx);
    }
}
