//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation uses ANSI
//! escape codes to distinguish citations and notices from answer text.

use std::io::{self, Stdout, Write};

use crate::conversation::Message;

/// ANSI escape code for dim text (used for recency labels).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for links).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for the facts-only notice).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for healthy status).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors and unhealthy status).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Recording renderers for tests
pub trait Renderer: Send {
    /// Print the welcome card with the suggested questions.
    fn print_welcome(&mut self, questions: &[&str]);

    /// Echo a user question that was dispatched on the user's behalf
    /// (e.g., a suggested question).
    fn print_user(&mut self, text: &str);

    /// Called after a question is dispatched, before its settlement.
    fn print_waiting(&mut self);

    /// Print an assistant message: the answer text, the education link for
    /// refusals, and the citation block for grounded answers.
    fn print_answer(&mut self, message: &Message);

    /// Print the outcome of a liveness probe.
    fn print_health(&mut self, healthy: bool);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn link(&self, url: &str) -> String {
        if self.use_color {
            format!("{ANSI_CYAN}{url}{ANSI_RESET}")
        } else {
            url.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            format!("{ANSI_DIM}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_welcome(&mut self, questions: &[&str]) {
        println!("Facts-Only MF Assistant (Nippon India Edition)");
        println!("Get factual information about Nippon India Mutual Fund schemes.");
        println!("Every answer includes a citation to official sources.");
        if self.use_color {
            println!("{ANSI_YELLOW}Facts-only. No investment advice.{ANSI_RESET}");
        } else {
            println!("Facts-only. No investment advice.");
        }
        if !questions.is_empty() {
            println!();
            println!("Try asking (/ask <n>):");
            for (i, question) in questions.iter().enumerate() {
                println!("  {}. {}", i + 1, question);
            }
        }
        println!();
        self.flush();
    }

    fn print_user(&mut self, text: &str) {
        println!("You: {text}");
        self.flush();
    }

    fn print_waiting(&mut self) {
        println!("{}", self.dim("Thinking..."));
        self.flush();
    }

    fn print_answer(&mut self, message: &Message) {
        println!("Assistant: {}", message.text);
        if message.is_refusal
            && let Some(link) = &message.educational_link
        {
            println!(
                "    Learn more about investor education: {}",
                self.link(link)
            );
        }
        if let Some(source) = &message.source_url {
            println!("    Source: {}", self.link(source));
            if let Some(last_updated) = &message.last_updated {
                println!(
                    "    {}",
                    self.dim(&format!("Last updated from sources: {last_updated}"))
                );
            }
        }
        println!();
        self.flush();
    }

    fn print_health(&mut self, healthy: bool) {
        if self.use_color {
            if healthy {
                println!("Service status: {ANSI_GREEN}healthy{ANSI_RESET}");
            } else {
                println!("Service status: {ANSI_RED}unreachable{ANSI_RESET}");
            }
        } else if healthy {
            println!("Service status: healthy");
        } else {
            println!("Service status: unreachable");
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("\nError: {error}");
    }
}
