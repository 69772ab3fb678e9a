//! Clipboard copy with transient "copied" feedback
//!
//! Uses `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The clipboard is created fresh each time to avoid holding resources.
//!
//! Each code sample owns a [`CopyControl`]. A successful copy sets its
//! "copied" flag and arms a reset timer; copying again before the timer
//! fires aborts it and starts a fresh one, so the flag always clears exactly
//! one delay after the most recent copy.

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long the "copied" indicator stays up
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Copy text to the system clipboard
///
/// Returns Ok(()) on success, or an error if clipboard access fails.
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Somewhere copied text can be written
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Identifies one copy attempt; later attempts have larger tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CopyTicket(u64);

/// State shared with the reset timer
#[derive(Debug, Default)]
struct CopyCell {
    copied: bool,
    /// Ticket of the copy that armed the current timer
    generation: u64,
    resets: usize,
}

/// Copy state for a single code sample
#[derive(Debug)]
pub struct CopyControl {
    cell: Arc<Mutex<CopyCell>>,
    pending_reset: Option<JoinHandle<()>>,
    next_ticket: u64,
    delay: Duration,
}

impl CopyControl {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_RESET_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            cell: Arc::default(),
            pending_reset: None,
            next_ticket: 0,
            delay,
        }
    }

    /// Write `text` through `sink` and record the outcome
    ///
    /// Must be called from within a Tokio runtime.
    pub fn copy(&mut self, text: &str, sink: &dyn ClipboardSink) -> bool {
        let ticket = self.begin();
        let result = sink.write_text(text);
        self.finish(ticket, result)
    }

    /// Start a copy whose clipboard write happens elsewhere
    pub fn begin(&mut self) -> CopyTicket {
        self.next_ticket += 1;
        CopyTicket(self.next_ticket)
    }

    /// Record the outcome of the write started by `ticket`
    ///
    /// Success sets the flag and (re)arms the reset timer. Failure leaves the
    /// state untouched. An outcome older than the one that armed the current
    /// timer is ignored. Returns whether the state changed.
    pub fn finish(&mut self, ticket: CopyTicket, result: Result<()>) -> bool {
        if let Err(e) = result {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            return false;
        }

        {
            let mut cell = self.cell();
            if ticket.0 < cell.generation {
                tracing::debug!(ticket = ticket.0, "Ignoring stale copy outcome");
                return false;
            }
            cell.copied = true;
            cell.generation = ticket.0;
        }

        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }

        let cell = Arc::clone(&self.cell);
        let delay = self.delay;
        let generation = ticket.0;
        self.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut cell = cell.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer copy owns the flag now
            if cell.generation == generation && cell.copied {
                cell.copied = false;
                cell.resets += 1;
                tracing::trace!(generation, resets = cell.resets, "Copy indicator reset");
            }
        }));

        true
    }

    pub fn is_copied(&self) -> bool {
        self.cell().copied
    }

    /// Number of times the flag has been cleared by a timer
    #[cfg(test)]
    pub fn reset_count(&self) -> usize {
        self.cell().resets
    }

    fn cell(&self) -> MutexGuard<'_, CopyCell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CopyControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CopyControl {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }
}

/// In-memory clipboard for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub writes: Mutex<Vec<String>>,
    pub fail: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("no display server");
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
