//! Core component trait - the foundation of the UI system
//!
//! Every UI element that can be rendered implements `Component`.

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Unique identifier for a component
///
/// Used for focus tracking and key routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Navigation outline
    Sidebar,
    /// Documentation panel
    Content,
}

impl ComponentId {
    /// Cycle to the other focusable component (Tab behavior)
    pub fn next_focus(self) -> Self {
        match self {
            Self::Sidebar => Self::Content,
            Self::Content => Self::Sidebar,
        }
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need - no access to mutable app state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,
    /// Section shown in the content pane
    pub active_section: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId, active_section: &'a str) -> Self {
        Self {
            theme,
            focus,
            active_section,
        }
    }

    /// Check if a component is currently focused
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }
}

/// Base trait for all UI components
///
/// Rendering takes `&mut self` so components can record viewport sizes
/// (scroll clamping) while drawing.
pub trait Component {
    /// Unique identifier for this component
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_between_panels() {
        assert_eq!(ComponentId::Sidebar.next_focus(), ComponentId::Content);
        assert_eq!(ComponentId::Content.next_focus(), ComponentId::Sidebar);
    }
}
