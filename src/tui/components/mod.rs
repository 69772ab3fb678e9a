// Components module - reusable UI building blocks
//
// Shell components are rendered every frame:
// - Header: logo, search box, theme indicator
// - Sidebar: navigation outline
// - Content pane: the active documentation section
// - Status bar: active section, key hints, latest warning
//
// Each component is a focused, single-responsibility module.

pub mod content_pane;
pub mod header;
pub mod scrollbar;
pub mod sidebar;
pub mod status_bar;
pub mod toast;

pub use content_pane::{ContentPane, SampleKey};
pub use sidebar::SidebarPanel;
pub use toast::Toast;
