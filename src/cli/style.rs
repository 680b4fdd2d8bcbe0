use std::io::IsTerminal;

use colored::{Color, Colorize};

use crate::schedule::Urgency;

/// Terminal styling decisions for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStyle {
    pub use_color: bool,
    pub plain_mode: bool,
    pub horizontal: char,
}

impl UiStyle {
    /// Colors only when stdout is a terminal, the config allows it, and
    /// `NO_COLOR` is unset.
    pub fn detect(color_enabled: bool, plain_mode: bool) -> Self {
        let stdout_tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self {
            use_color: stdout_tty && color_enabled && !plain_mode && !no_color,
            plain_mode,
            horizontal: if plain_mode { '-' } else { '─' },
        }
    }

    pub fn plain() -> Self {
        Self {
            use_color: false,
            plain_mode: true,
            horizontal: '-',
        }
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(20))
    }

    pub fn header(&self, text: &str) -> String {
        if self.use_color {
            text.color(Color::BrightBlue).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Paints an already padded badge cell.
    pub fn badge(&self, text: &str, urgency: Option<Urgency>) -> String {
        let color = match (self.use_color, urgency) {
            (true, Some(Urgency::High)) => Color::Red,
            (true, Some(Urgency::Medium)) => Color::Yellow,
            (true, Some(Urgency::Low)) => Color::Green,
            _ => return text.to_string(),
        };
        text.color(color).bold().to_string()
    }
}
