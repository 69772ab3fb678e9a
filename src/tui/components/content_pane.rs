//! Content pane - renders the active documentation section
//!
//! Owns the scroll position, which code sample has focus, and one
//! [`CopyControl`] per code sample. Controls are keyed by section id and
//! sample index, so a "copied" badge survives switching away and back.

use crate::content::{CodeSample, ContentDescriptor};
use crate::tui::clipboard::{CopyControl, CopyTicket};
use crate::tui::components::scrollbar::render_scrollbar;
use crate::tui::markdown::{self, SampleBadge};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext, Scrollable};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashMap;
use std::time::Duration;

/// Identifies a code sample across sections
pub type SampleKey = (&'static str, usize);

/// A clipboard write that has been started but not yet resolved
#[derive(Debug)]
pub struct PendingCopy {
    pub key: SampleKey,
    pub ticket: CopyTicket,
    pub text: String,
}

pub struct ContentPane {
    descriptor: &'static ContentDescriptor,
    samples: Vec<CodeSample>,
    focused_sample: Option<usize>,
    scroll: ScrollState,
    copies: HashMap<SampleKey, CopyControl>,
    copy_delay: Duration,
    /// Header line of each sample from the last render
    sample_lines: Vec<usize>,
}

impl ContentPane {
    pub fn new(descriptor: &'static ContentDescriptor, copy_delay: Duration) -> Self {
        Self {
            descriptor,
            samples: descriptor.code_samples(),
            focused_sample: None,
            scroll: ScrollState::new(),
            copies: HashMap::new(),
            copy_delay,
            sample_lines: Vec::new(),
        }
    }

    /// Swap in another section, back at the top with no sample focused
    pub fn show(&mut self, descriptor: &'static ContentDescriptor) {
        self.descriptor = descriptor;
        self.samples = descriptor.code_samples();
        self.focused_sample = None;
        self.sample_lines.clear();
        self.scroll.scroll_to_top();
    }

    #[cfg(test)]
    pub fn title(&self) -> &'static str {
        self.descriptor.title
    }

    #[cfg(test)]
    pub fn samples(&self) -> &[CodeSample] {
        &self.samples
    }

    #[cfg(test)]
    pub fn focused_sample(&self) -> Option<usize> {
        self.focused_sample
    }

    /// Whether sample `index` of the current section shows "copied"
    #[cfg(test)]
    pub fn is_copied(&self, index: usize) -> bool {
        self.copies
            .get(&(self.descriptor.id, index))
            .is_some_and(CopyControl::is_copied)
    }

    // ─────────────────────────────────────────────────────────────
    // Sample focus
    // ─────────────────────────────────────────────────────────────

    pub fn focus_next_sample(&mut self) -> bool {
        let count = self.samples.len();
        if count == 0 {
            return false;
        }
        let next = match self.focused_sample {
            Some(i) => (i + 1) % count,
            None => self.first_visible_sample().unwrap_or(0),
        };
        self.focus_sample(next);
        true
    }

    pub fn focus_prev_sample(&mut self) -> bool {
        let count = self.samples.len();
        if count == 0 {
            return false;
        }
        let prev = match self.focused_sample {
            Some(0) => count - 1,
            Some(i) => i - 1,
            None => self.first_visible_sample().unwrap_or(0),
        };
        self.focus_sample(prev);
        true
    }

    /// Returns whether a sample had focus
    pub fn clear_sample_focus(&mut self) -> bool {
        self.focused_sample.take().is_some()
    }

    fn focus_sample(&mut self, index: usize) {
        self.focused_sample = Some(index);
        if let Some(&line) = self.sample_lines.get(index) {
            self.scroll.reveal(line);
        }
    }

    /// First sample whose header is at or below the top of the viewport
    fn first_visible_sample(&self) -> Option<usize> {
        let top = self.scroll.offset();
        self.sample_lines.iter().position(|&line| line >= top)
    }

    /// Sample `y` acts on: the focused one, else the first one in view
    fn copy_target(&self) -> Option<usize> {
        if self.samples.is_empty() {
            return None;
        }
        self.focused_sample
            .or_else(|| self.first_visible_sample())
            .or(Some(0))
    }

    // ─────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────

    /// Start copying the target sample; the caller performs the write
    pub fn begin_copy(&mut self) -> Option<PendingCopy> {
        let index = self.copy_target()?;
        let text = self.samples.get(index)?.code.clone();
        let key = (self.descriptor.id, index);
        let delay = self.copy_delay;
        let ticket = self
            .copies
            .entry(key)
            .or_insert_with(|| CopyControl::with_delay(delay))
            .begin();
        self.focused_sample = Some(index);
        Some(PendingCopy { key, ticket, text })
    }

    /// Record the outcome of a write started by [`begin_copy`](Self::begin_copy)
    pub fn finish_copy(
        &mut self,
        key: SampleKey,
        ticket: CopyTicket,
        result: Result<()>,
    ) -> bool {
        match self.copies.get_mut(&key) {
            Some(control) => control.finish(ticket, result),
            None => false,
        }
    }
}

impl Component for ContentPane {
    fn id(&self) -> ComponentId {
        ComponentId::Content
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(focused)))
            .title(Line::styled(
                format!(" {} ", self.descriptor.title),
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        // One column of padding on the left, one for the scrollbar
        let text_area = Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let id = self.descriptor.id;
        let copies = &self.copies;
        let focused_sample = self.focused_sample;
        let doc = markdown::render_document(
            self.descriptor.body,
            (text_area.width as usize).max(10),
            theme,
            &|i| SampleBadge {
                focused: focused_sample == Some(i),
                copied: copies.get(&(id, i)).is_some_and(CopyControl::is_copied),
            },
        );
        self.sample_lines = doc.sample_lines;

        self.scroll
            .update_dimensions(doc.lines.len(), inner.height as usize);
        let (start, end) = self.scroll.visible_range();
        let visible: Vec<Line> = doc
            .lines
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect();

        f.render_widget(
            Paragraph::new(visible).style(Style::default().fg(theme.foreground)),
            text_area,
        );
        render_scrollbar(f, inner, self.scroll_state(), theme);
    }
}

impl Scrollable for ContentPane {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for ContentPane {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::Char(']') => return self.focus_next_sample().into(),
            KeyCode::Char('[') => return self.focus_prev_sample().into(),
            KeyCode::Esc => return self.clear_sample_focus().into(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> &'static str {
        if self.samples.is_empty() {
            "j/k scroll · PgUp/PgDn page · Tab contents"
        } else {
            "j/k scroll · [ ] sample · y copy · Tab contents"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn pane(id: &str) -> ContentPane {
        ContentPane::new(
            ContentRegistry::builtin().lookup(id),
            Duration::from_millis(2000),
        )
    }

    fn draw(pane: &mut ContentPane, width: u16, height: u16) -> String {
        let theme = Theme::light();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(&theme, ComponentId::Content, "users");
                pane.render(f, f.area(), &ctx);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn sample_focus_cycles() {
        let mut pane = pane("users");
        let count = pane.samples().len();
        assert!(count > 1);

        assert!(pane.focus_next_sample());
        assert_eq!(pane.focused_sample(), Some(0));
        assert!(pane.focus_prev_sample());
        assert_eq!(pane.focused_sample(), Some(count - 1));
        assert!(pane.focus_next_sample());
        assert_eq!(pane.focused_sample(), Some(0));
    }

    #[test]
    fn show_resets_scroll_and_focus() {
        let mut pane = pane("users");
        draw(&mut pane, 80, 20);
        pane.scroll_down();
        pane.focus_next_sample();

        pane.show(ContentRegistry::builtin().lookup("errors"));
        assert_eq!(pane.scroll_state().offset(), 0);
        assert_eq!(pane.focused_sample(), None);
        assert_eq!(pane.title(), "Error Handling");
    }

    #[test]
    fn copy_defaults_to_first_sample() {
        let mut pane = pane("users");
        let pending = pane.begin_copy().unwrap();
        assert_eq!(pending.key, ("users", 0));
        assert_eq!(pending.text, pane.samples()[0].code);
        assert_eq!(pane.focused_sample(), Some(0));
    }

    #[test]
    fn nothing_to_copy_without_samples() {
        static PROSE: ContentDescriptor = ContentDescriptor {
            id: "prose",
            title: "Prose",
            body: "Just text.",
        };
        let mut pane = ContentPane::new(&PROSE, Duration::from_millis(2000));
        assert!(pane.samples().is_empty());
        assert!(pane.begin_copy().is_none());
    }

    #[test]
    fn render_shows_title_and_copy_badge() {
        let mut pane = pane("users");
        let screen = draw(&mut pane, 80, 40);
        assert!(screen.contains("Users API"));
        assert!(screen.contains(markdown::COPY_LABEL));
    }

    #[tokio::test(start_paused = true)]
    async fn copy_marks_only_that_sample() {
        let mut pane = pane("users");
        pane.focus_next_sample();
        pane.focus_next_sample();

        let pending = pane.begin_copy().unwrap();
        assert_eq!(pending.key, ("users", 1));
        assert_eq!(pending.text, pane.samples()[1].code);
        assert!(pane.finish_copy(pending.key, pending.ticket, Ok(())));

        assert!(pane.is_copied(1));
        assert!(!pane.is_copied(0));

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(!pane.is_copied(1));
    }
}
