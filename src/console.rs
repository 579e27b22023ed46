//! Console presentation
//!
//! A [`PresentationPort`] that prints cards as text lines, used by the CLI to
//! walk a feed from the terminal.

use std::io::Write;

use crate::feed::{PresentationPort, RenderMode, RenderedItem};

/// Prints one line per render / remove / observe event
pub struct ConsolePort<W> {
    out: W,
    mode: RenderMode,
    verbose: bool,
}

impl<W: Write> ConsolePort<W> {
    pub fn new(out: W, mode: RenderMode) -> Self {
        Self {
            out,
            mode,
            verbose: false,
        }
    }

    /// Builder method: also print removals and observation changes
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: String) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write card");
        }
    }
}

impl<W: Write> PresentationPort for ConsolePort<W> {
    fn render(&mut self, item: &RenderedItem) {
        let kind = match self.mode {
            RenderMode::Frame => "frame",
            RenderMode::Image => "cover",
        };
        let author = item
            .game
            .author
            .as_deref()
            .map(|a| format!(" by {}", a))
            .unwrap_or_default();
        self.line(format!(
            "[#{:>3}] {}{} ({}: {})",
            item.index, item.game.title, author, kind, item.game.location
        ));
    }

    fn remove(&mut self, item: &RenderedItem) {
        if self.verbose {
            self.line(format!("  - pruned {}", item.game.title));
        }
    }

    fn observe_last(&mut self, item: &RenderedItem) {
        if self.verbose {
            self.line(format!("  ~ watching {}", item.game.title));
        }
    }
}
