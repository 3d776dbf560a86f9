//! Sinks for the user-facing lines produced by the tracker.

use std::fmt;

/// Message categories attached to each reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

/// Accepts ordered lines of text.
pub trait Reporter {
    fn emit(&mut self, kind: MessageKind, line: String);

    fn info(&mut self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.emit(MessageKind::Info, message.to_string());
    }

    fn success(&mut self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.emit(MessageKind::Success, message.to_string());
    }

    fn warning(&mut self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.emit(MessageKind::Warning, message.to_string());
    }

    fn error(&mut self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.emit(MessageKind::Error, message.to_string());
    }

    fn section(&mut self, title: impl fmt::Display)
    where
        Self: Sized,
    {
        self.emit(MessageKind::Section, title.to_string());
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn emit(&mut self, kind: MessageKind, line: String) {
        (**self).emit(kind, line);
    }
}

/// Captures every line in memory. Useful for tests and for embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    entries: Vec<(MessageKind, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, line)| line.as_str()).collect()
    }

    pub fn entries(&self) -> &[(MessageKind, String)] {
        &self.entries
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|(_, line)| line.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Reporter for MemoryReporter {
    fn emit(&mut self, kind: MessageKind, line: String) {
        self.entries.push((kind, line));
    }
}
