//! Output rendering for the chat application.
//!
//! The conversation controller calls into a [`Renderer`] after every change to
//! the transcript or the typing flag, so the screen is always a function of
//! the controller's state.

use std::io::{self, Stdout, Write};

use crate::types::{MessageRecord, Role};

/// ANSI escape code for dim text (used for timestamps and the typing line).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for the quote banner).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for bot messages).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for the quote banner).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for user messages).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Carriage return plus erase-line, used to remove the typing indicator.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Show one transcript record; called once per append.
    fn render_record(&mut self, record: &MessageRecord);

    /// Show or hide the typing indicator.
    fn set_typing(&mut self, typing: bool);

    /// Give the input control focus back once a turn ends.
    fn focus_input(&mut self) {}

    /// Show the decorative quote banner.
    fn print_banner(&mut self, quote: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    typing: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            typing: false,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn clear_typing(&mut self) {
        if self.typing {
            if self.use_color {
                print!("{ANSI_CLEAR_LINE}");
            } else {
                println!();
            }
            self.typing = false;
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn render_record(&mut self, record: &MessageRecord) {
        self.clear_typing();
        println!("{}", format_record(record, self.use_color));
        self.flush();
    }

    fn set_typing(&mut self, typing: bool) {
        if typing == self.typing {
            return;
        }
        if typing {
            if self.use_color {
                print!("{ANSI_DIM}🤖 escribiendo…{ANSI_RESET}");
            } else {
                print!("🤖 escribiendo…");
            }
            self.typing = true;
        } else {
            self.clear_typing();
        }
        self.flush();
    }

    fn print_banner(&mut self, quote: &str) {
        self.clear_typing();
        if self.use_color {
            println!("{ANSI_YELLOW}{ANSI_ITALIC}💬 {quote}{ANSI_RESET}");
        } else {
            println!("💬 {quote}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.clear_typing();
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn print_info(&mut self, info: &str) {
        self.clear_typing();
        println!("{info}");
    }
}

/// Formats a record as a single chat line: avatar, text, then the clock label.
pub fn format_record(record: &MessageRecord, use_color: bool) -> String {
    let (avatar, color) = match record.role() {
        Role::Bot => ("🤖", ANSI_CYAN),
        Role::User => ("😊", ANSI_GREEN),
    };
    if use_color {
        format!(
            "{avatar} {color}{}{ANSI_RESET} {ANSI_DIM}{}{ANSI_RESET}",
            record.text(),
            record.time()
        )
    } else {
        format!("{avatar} {} [{}]", record.text(), record.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn plain_record_line() {
        let record = MessageRecord::at(Role::User, "hola", datetime!(2024-01-01 08:15 UTC));
        assert_eq!(format_record(&record, false), "😊 hola [08:15]");

        let record = MessageRecord::at(Role::Bot, "¡Vamos!", datetime!(2024-01-01 08:16 UTC));
        assert_eq!(format_record(&record, false), "🤖 ¡Vamos! [08:16]");
    }

    #[test]
    fn colored_record_line_contains_text_and_time() {
        let record = MessageRecord::at(Role::Bot, "¡Vamos!", datetime!(2024-01-01 08:16 UTC));
        let line = format_record(&record, true);
        assert!(line.starts_with("🤖 "));
        assert!(line.contains("¡Vamos!"));
        assert!(line.contains("08:16"));
        assert!(line.contains(ANSI_CYAN));
    }

    #[test]
    fn typing_toggles_state() {
        let mut renderer = PlainTextRenderer::with_color(false);
        renderer.set_typing(true);
        assert!(renderer.typing);
        renderer.set_typing(false);
        assert!(!renderer.typing);
    }
}
