//! Sidebar panel - the navigation outline
//!
//! Wraps a [`NavTree`] with a list widget. The tree owns expansion and the
//! cursor; this panel only turns rows into styled lines and keys into tree
//! operations. Selections are queued as [`NavEvent`]s for the App to drain.

use crate::nav::{NavEvent, NavRow, NavTree};
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct SidebarPanel {
    tree: NavTree,
    list_state: ListState,
    pending: Option<NavEvent>,
}

impl SidebarPanel {
    pub fn new(tree: NavTree) -> Self {
        Self {
            tree,
            list_state: ListState::default(),
            pending: None,
        }
    }

    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut NavTree {
        &mut self.tree
    }

    /// Selection made since the last call, if any
    pub fn take_event(&mut self) -> Option<NavEvent> {
        self.pending.take()
    }

    fn row_line(&self, row: NavRow, ctx: &RenderContext) -> Line<'static> {
        let theme = ctx.theme;
        match row {
            NavRow::Group(g) => {
                let Some(group) = self.tree.group(g) else {
                    return Line::default();
                };
                let arrow = if self.tree.is_expanded(group.title) {
                    "▾"
                } else {
                    "▸"
                };
                Line::from(vec![
                    Span::styled(format!("{} ", arrow), Style::default().fg(theme.muted)),
                    Span::raw(format!("{} ", group.icon)),
                    Span::styled(
                        group.title.to_string(),
                        Style::default()
                            .fg(theme.heading)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            }
            NavRow::Entry { group, entry } => {
                let Some(entry) = self.tree.entry(group, entry) else {
                    return Line::default();
                };
                let (marker, style) = if entry.id == ctx.active_section {
                    (
                        "● ",
                        Style::default()
                            .fg(theme.highlight)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default().fg(theme.foreground))
                };
                Line::from(vec![
                    Span::raw("   "),
                    Span::styled(marker, Style::default().fg(theme.highlight)),
                    Span::styled(entry.title.to_string(), style),
                ])
            }
        }
    }
}

impl Component for SidebarPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Sidebar
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());

        let items: Vec<ListItem> = self
            .tree
            .visible_rows()
            .into_iter()
            .map(|row| ListItem::new(self.row_line(row, ctx)))
            .collect();

        let highlight = if focused {
            Style::default().bg(theme.selection).fg(theme.selection_fg)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.panel_border(focused)))
                    .title(" Contents "),
            )
            .style(Style::default().bg(theme.background))
            .highlight_style(highlight);

        self.list_state.select(Some(self.tree.cursor()));
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Interactive for SidebarPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.tree.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.tree.cursor_down(),
            KeyCode::Home | KeyCode::Char('g') => self.tree.cursor_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.tree.cursor_to_bottom(),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') => {
                if let Some(event) = self.tree.activate_cursor() {
                    self.pending = Some(event);
                }
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓ move · Enter open/select · Tab content"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(panel: &mut SidebarPanel, code: KeyCode) -> Handled {
        panel.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn enter_on_entry_queues_selection() {
        let mut panel = SidebarPanel::new(NavTree::new());
        // Row 0 is "Getting Started", row 1 "Introduction", row 2 "Quick Start"
        press(&mut panel, KeyCode::Down);
        press(&mut panel, KeyCode::Down);
        assert_eq!(press(&mut panel, KeyCode::Enter), Handled::Yes);
        assert_eq!(
            panel.take_event(),
            Some(NavEvent::SectionSelected("quickstart".to_string()))
        );
        assert_eq!(panel.take_event(), None);
    }

    #[test]
    fn enter_on_group_toggles_without_selection() {
        let mut panel = SidebarPanel::new(NavTree::new());
        assert!(panel.tree().is_expanded("Getting Started"));
        press(&mut panel, KeyCode::Enter);
        assert!(!panel.tree().is_expanded("Getting Started"));
        assert_eq!(panel.take_event(), None);
    }

    #[test]
    fn unrelated_keys_bubble_up() {
        let mut panel = SidebarPanel::new(NavTree::new());
        assert_eq!(press(&mut panel, KeyCode::Char('t')), Handled::No);
    }
}
