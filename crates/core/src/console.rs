//! Terminal output surface
//!
//! The log view shared by the build/run dispatcher and the shell. Background
//! units append fully-computed output only; they never read or modify lines
//! already present. A widget layer drains `lines()` to render the view.

use parking_lot::Mutex;

/// Named colors for notice lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageColor {
    Red,
    Green,
    Blue,
    White,
    Yellow,
    Cyan,
    Magenta,
    Black,
}

impl MessageColor {
    /// Display color for the terminal widget.
    pub fn hex(&self) -> &'static str {
        match self {
            MessageColor::Red => "#FF0000",
            MessageColor::Green => "#00FF00",
            MessageColor::Blue => "#0000FF",
            MessageColor::White => "#FFFFFF",
            MessageColor::Yellow => "#FFFF00",
            MessageColor::Cyan => "#00FFFF",
            MessageColor::Magenta => "#FF00FF",
            MessageColor::Black => "#000000",
        }
    }
}

/// One line of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    /// Notice color; plain process output carries none.
    pub color: Option<MessageColor>,
}

/// Append-only output surface shared by all dispatched work.
#[derive(Default)]
pub struct Console {
    lines: Mutex<Vec<ConsoleLine>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append captured process output. Multi-line chunks are split so the
    /// view stays line-addressable; empty chunks append nothing.
    pub fn append(&self, text: &str) {
        let mut lines = self.lines.lock();
        for line in text.lines() {
            lines.push(ConsoleLine {
                text: line.to_string(),
                color: None,
            });
        }
    }

    /// Append a blank separator line.
    pub fn append_blank(&self) {
        self.lines.lock().push(ConsoleLine {
            text: String::new(),
            color: None,
        });
    }

    /// Print a colored notice line.
    pub fn print_message(&self, message: &str, color: MessageColor) {
        self.lines.lock().push(ConsoleLine {
            text: message.to_string(),
            color: Some(color),
        });
    }

    /// Drop all output.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    /// Snapshot of the current line list.
    pub fn lines(&self) -> Vec<ConsoleLine> {
        self.lines.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// The whole view as one newline-joined string.
    pub fn text(&self) -> String {
        let lines = self.lines.lock();
        lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
