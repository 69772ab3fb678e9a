//! Component trait system for TUI architecture
//!
//! Components declare their own capabilities through traits instead of
//! App knowing how to render/scroll/copy for every panel.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (orchestrator: routes keys, owns active section/theme)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                      ┌───────┴───────┐
//!                      ▼               ▼
//!                ┌──────────┐   ┌──────────┐
//!                │ Sidebar  │   │ Content  │
//!                │  Panel   │   │   Pane   │
//!                └──────────┘   └──────────┘
//! ```
//!
//! - [`Component`] - Base trait: render + identity
//! - [`Scrollable`] - Components with scrollable content
//! - [`Interactive`] - Components that handle keyboard input

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
