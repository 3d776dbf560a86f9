use colored::Colorize;
use std::fmt;

use crate::core::reporter::{MessageKind, Reporter};

/// Disables ANSI styling, used when stdout is consumed by another program.
pub fn set_plain(plain: bool) {
    if plain {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

fn apply_style(kind: MessageKind, text: &str) -> String {
    match kind {
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => text.bright_yellow().to_string(),
        MessageKind::Error => text.bright_red().to_string(),
        MessageKind::Section => text.bold().to_string(),
        MessageKind::Info => text.to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let text = message.to_string();
    let formatted = apply_style(kind, &text);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

/// Writes reported lines to stdout, styled by message kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&mut self, kind: MessageKind, line: String) {
        print(kind, line);
    }
}
