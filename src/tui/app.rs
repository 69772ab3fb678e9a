// App state - the shell that wires header, sidebar and content together
//
// App is the single owner of the active section, the sidebar overlay flag
// and the theme. Components report what the user did (a NavEvent, a copy
// request) and App decides what changes.

use super::clipboard::{ClipboardSink, CopyTicket};
use super::components::{ContentPane, SampleKey, SidebarPanel, Toast};
use super::layout::Breakpoint;
use super::modal::Modal;
use super::traits::{ComponentId, Handled, Interactive};
use crate::config::Config;
use crate::content::ContentRegistry;
use crate::logging::LogBuffer;
use crate::nav::{NavEntry, NavEvent, NavTree};
use crate::theme::ThemeState;
use crossterm::event::KeyEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Result of a clipboard write, sent back to the event loop
#[derive(Debug)]
pub struct CopyOutcome {
    pub key: SampleKey,
    pub ticket: CopyTicket,
    pub result: anyhow::Result<()>,
}

pub struct App {
    registry: &'static ContentRegistry,

    pub sidebar: SidebarPanel,
    pub content: ContentPane,

    /// Section shown in the content pane
    pub(crate) active_section: String,

    /// Sidebar overlay visibility; ignored while the sidebar is docked
    sidebar_open: bool,

    pub theme: ThemeState,

    /// Component receiving keys not handled globally
    pub focused: ComponentId,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,

    /// Search query while the search box is open
    pub search: Option<String>,

    pub log_buffer: LogBuffer,
    pub should_quit: bool,

    clipboard: Arc<dyn ClipboardSink>,
    copy_tx: mpsc::UnboundedSender<CopyOutcome>,

    /// Width of the last drawn frame
    width: u16,
}

impl App {
    pub fn new(
        config: &Config,
        theme: ThemeState,
        log_buffer: LogBuffer,
        clipboard: Arc<dyn ClipboardSink>,
        copy_tx: mpsc::UnboundedSender<CopyOutcome>,
    ) -> Self {
        let registry = ContentRegistry::builtin();
        let descriptor = registry.lookup(&config.default_section);
        if !registry.contains(&config.default_section) {
            tracing::warn!(
                section = %config.default_section,
                "Unknown startup section, showing {}",
                descriptor.id
            );
        }

        let mut tree = NavTree::with_expanded(
            crate::nav::NAVIGATION,
            config.expanded_groups.iter().cloned(),
        );
        tree.focus_entry(&config.default_section);

        Self {
            registry,
            sidebar: SidebarPanel::new(tree),
            content: ContentPane::new(descriptor, Duration::from_millis(config.copy_reset_ms)),
            active_section: config.default_section.clone(),
            sidebar_open: false,
            theme,
            focused: ComponentId::Content,
            modal: None,
            toast: None,
            search: None,
            log_buffer,
            should_quit: false,
            clipboard,
            copy_tx,
            width: 0,
        }
    }

    pub fn active_section(&self) -> &str {
        &self.active_section
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    // ─────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────

    /// Record the frame width; called at the start of every draw
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        if self.focused == ComponentId::Sidebar && !self.sidebar_visible() {
            self.focused = ComponentId::Content;
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width)
    }

    pub fn sidebar_docked(&self) -> bool {
        self.breakpoint().sidebar_docked()
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_docked() || self.sidebar_open
    }

    /// The `m` key; a docked sidebar ignores it
    pub fn toggle_sidebar(&mut self) {
        if self.sidebar_docked() {
            tracing::debug!("Sidebar is docked, ignoring menu toggle");
            return;
        }
        self.sidebar_open = !self.sidebar_open;
        self.focused = if self.sidebar_open {
            ComponentId::Sidebar
        } else {
            ComponentId::Content
        };
    }

    pub fn close_sidebar(&mut self) -> bool {
        let was_open = self.sidebar_open;
        self.sidebar_open = false;
        if was_open && !self.sidebar_docked() {
            self.focused = ComponentId::Content;
        }
        was_open
    }

    /// Tab: cycle focus among visible components
    pub fn focus_next(&mut self) {
        let next = self.focused.next_focus();
        if next == ComponentId::Sidebar && !self.sidebar_visible() {
            return;
        }
        self.focused = next;
    }

    pub fn focus_hint(&self) -> &'static str {
        match self.focused {
            ComponentId::Sidebar => self.sidebar.focus_hint(),
            ComponentId::Content => self.content.focus_hint(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────

    /// React to the navigation tree
    pub fn handle_nav_event(&mut self, event: NavEvent) {
        match event {
            NavEvent::SectionSelected(id) => {
                let descriptor = self.registry.lookup(&id);
                if descriptor.id != id {
                    tracing::debug!(
                        section = %id,
                        "No page for section, showing {}",
                        descriptor.id
                    );
                }
                self.content.show(descriptor);
                self.sidebar.tree_mut().focus_entry(&id);
                self.active_section = id;
                self.close_sidebar();
                tracing::info!(section = %self.active_section, "Section selected");
            }
        }
    }

    /// Select `id` as if it had been picked in the tree
    pub fn select_section(&mut self, id: &str) {
        let event = self.sidebar.tree().select_entry(id);
        self.handle_nav_event(event);
    }

    /// Route a key to the focused component, draining any selection it made
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focused {
            ComponentId::Sidebar => {
                let handled = self.sidebar.handle_key(key);
                if let Some(event) = self.sidebar.take_event() {
                    self.handle_nav_event(event);
                }
                handled
            }
            ComponentId::Content => self.content.handle_key(key),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────

    pub fn open_search(&mut self) {
        self.search = Some(String::new());
    }

    pub fn cancel_search(&mut self) {
        self.search = None;
    }

    pub fn search_push(&mut self, c: char) {
        if let Some(query) = self.search.as_mut() {
            query.push(c);
        }
    }

    pub fn search_pop(&mut self) {
        if let Some(query) = self.search.as_mut() {
            query.pop();
        }
    }

    pub fn search_matches(&self) -> Vec<&'static NavEntry> {
        match &self.search {
            Some(query) => self.sidebar.tree().search(query),
            None => Vec::new(),
        }
    }

    /// Enter in the search box: open the first match, if any
    pub fn submit_search(&mut self) {
        let first = self.search_matches().first().map(|entry| entry.id);
        self.search = None;
        match first {
            Some(id) => self.select_section(id),
            None => self.show_toast("No matching section"),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) {
        let dark = self.theme.toggle();
        tracing::info!(mode = self.theme.mode().as_str(), dark, "Theme toggled");
    }

    // ─────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────

    /// Copy the focused (or first visible) code sample
    ///
    /// The write runs on a blocking thread; its outcome comes back through
    /// the copy channel and lands in [`finish_copy`](Self::finish_copy).
    pub fn copy_sample(&mut self) {
        let Some(pending) = self.content.begin_copy() else {
            self.show_toast("Nothing to copy here");
            return;
        };

        let clipboard = Arc::clone(&self.clipboard);
        let tx = self.copy_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = clipboard.write_text(&pending.text);
            // Receiver gone means the app is shutting down
            let _ = tx.send(CopyOutcome {
                key: pending.key,
                ticket: pending.ticket,
                result,
            });
        });
    }

    /// Apply a clipboard outcome; the toast follows the sample's badge
    pub fn finish_copy(&mut self, outcome: CopyOutcome) {
        let failed = outcome.result.is_err();
        let applied = self
            .content
            .finish_copy(outcome.key, outcome.ticket, outcome.result);
        if applied {
            self.show_toast("✓ Copied to clipboard");
        } else if failed {
            self.show_toast("✗ Failed to copy");
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Toast
    // ─────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryPreferenceStore;
    use crate::tui::clipboard::MemoryClipboard;
    use crate::tui::views;
    use ratatui::{backend::TestBackend, Terminal};

    fn app_with(
        clipboard: Arc<MemoryClipboard>,
    ) -> (App, mpsc::UnboundedReceiver<CopyOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut theme = ThemeState::new(Box::new(MemoryPreferenceStore::new()));
        theme.initialize(false);
        let app = App::new(
            &Config::default(),
            theme,
            LogBuffer::new(),
            clipboard,
            tx,
        );
        (app, rx)
    }

    fn app() -> App {
        app_with(Arc::new(MemoryClipboard::default())).0
    }

    #[test]
    fn starts_on_default_section() {
        let app = app();
        assert_eq!(app.active_section(), "introduction");
        assert_eq!(app.content.title(), "Introduction");
        assert!(!app.sidebar_open());
    }

    #[test]
    fn selecting_users_updates_section_and_closes_overlay() {
        let mut app = app();
        app.set_width(80);
        app.toggle_sidebar();
        assert!(app.sidebar_open());
        assert_eq!(app.focused, ComponentId::Sidebar);

        let event = app.sidebar.tree().select_entry("users");
        app.handle_nav_event(event);

        assert_eq!(app.active_section(), "users");
        assert!(!app.sidebar_open());
        assert_eq!(app.content.title(), "Users API");
        assert_eq!(app.focused, ComponentId::Content);
    }

    #[test]
    fn entry_without_page_shows_introduction() {
        let mut app = app();
        app.select_section("posts");
        assert_eq!(app.active_section(), "posts");
        assert_eq!(app.content.title(), "Introduction");
    }

    #[test]
    fn menu_toggle_is_ignored_when_docked() {
        let mut app = app();
        app.set_width(120);
        app.toggle_sidebar();
        assert!(!app.sidebar_open());
        assert!(app.sidebar_visible());
    }

    #[test]
    fn tab_skips_hidden_sidebar() {
        let mut app = app();
        app.set_width(80);
        app.focus_next();
        assert_eq!(app.focused, ComponentId::Content);

        app.set_width(120);
        app.focus_next();
        assert_eq!(app.focused, ComponentId::Sidebar);

        // Shrinking hides the sidebar, focus falls back to content
        app.set_width(80);
        assert_eq!(app.focused, ComponentId::Content);
    }

    #[test]
    fn search_opens_first_match() {
        let mut app = app();
        app.open_search();
        for c in "auth".chars() {
            app.search_push(c);
        }
        assert_eq!(app.search_matches()[0].id, "authentication");
        app.submit_search();
        assert!(app.search.is_none());
        assert_eq!(app.active_section(), "authentication");
    }

    #[test]
    fn toggle_theme_flips_palette() {
        let mut app = app();
        assert!(!app.theme.is_dark());
        app.toggle_theme();
        assert!(app.theme.is_dark());
        assert_eq!(app.theme.palette().name, "Dark");
    }

    #[tokio::test]
    async fn copy_round_trips_through_channel() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let (mut app, mut rx) = app_with(Arc::clone(&clipboard));
        app.select_section("users");

        app.copy_sample();
        let outcome = rx.recv().await.unwrap();
        app.finish_copy(outcome);

        assert!(app.content.is_copied(0));
        assert_eq!(
            clipboard.contents(),
            [app.content.samples()[0].code.clone()]
        );
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("✓ Copied to clipboard")
        );
    }

    #[tokio::test]
    async fn failed_copy_shows_error_toast() {
        let (mut app, mut rx) = app_with(Arc::new(MemoryClipboard::failing()));
        app.select_section("users");

        app.copy_sample();
        app.finish_copy(rx.recv().await.unwrap());

        assert!(!app.content.is_copied(0));
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("✗ Failed to copy")
        );
    }

    #[tokio::test]
    async fn stale_copy_outcome_shows_no_toast() {
        let mut app = app();
        app.select_section("users");
        let first = app.content.begin_copy().unwrap();
        let second = app.content.begin_copy().unwrap();

        app.finish_copy(CopyOutcome {
            key: second.key,
            ticket: second.ticket,
            result: Ok(()),
        });
        assert!(app.toast.is_some());
        app.toast = None;

        // The older write resolving late changes neither badge nor toast
        app.finish_copy(CopyOutcome {
            key: first.key,
            ticket: first.ticket,
            result: Ok(()),
        });
        assert!(app.toast.is_none());
        assert!(app.content.is_copied(0));
    }

    #[test]
    fn draws_at_every_breakpoint() {
        for width in [50, 80, 120, 160] {
            let mut app = app();
            app.select_section("users");
            let mut terminal = Terminal::new(TestBackend::new(width, 30)).unwrap();
            terminal.draw(|f| views::draw(f, &mut app)).unwrap();
            assert_eq!(app.breakpoint(), Breakpoint::from_width(width));
        }
    }
}
