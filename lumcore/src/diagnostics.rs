//! Compiler message channel.
//!
//! Every diagnostic a compilation produces goes through a
//! [`MessageCollector`]. A message of [`CompilerMessageSeverity::Error`]
//! fails the compilation.
use std::fmt::Display;

use parking_lot::Mutex;
use strum::EnumIs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
pub enum CompilerMessageSeverity {
    Info,
    Warning,
    Error,
}

impl Display for CompilerMessageSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CompilerMessageSeverity::Info => "info",
            CompilerMessageSeverity::Warning => "warning",
            CompilerMessageSeverity::Error => "error",
        })
    }
}

/// Location of a message in a source file, as a byte range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompilerMessageSourceLocation {
    pub file: Option<String>,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompilerMessage {
    pub severity: CompilerMessageSeverity,
    pub message: String,
    pub location: Option<CompilerMessageSourceLocation>,
}

impl CompilerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: CompilerMessageSeverity::Error,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<CompilerMessageSourceLocation>) -> Self {
        self.location = location;
        self
    }
}

impl Display for CompilerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(location) = &self.location {
            write!(
                f,
                " ({}:{}..{})",
                location.file.as_deref().unwrap_or("<unnamed>"),
                location.start,
                location.end
            )?;
        }
        Ok(())
    }
}

/// Sink for compiler messages.
pub trait MessageCollector: Send + Sync {
    fn report(&self, message: CompilerMessage);

    /// Whether an error has been reported so far.
    fn has_errors(&self) -> bool;
}

/// Collector discarding every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageCollectorNone;

impl MessageCollector for MessageCollectorNone {
    fn report(&self, _message: CompilerMessage) {}

    fn has_errors(&self) -> bool {
        false
    }
}

/// Collector keeping every message in report order.
#[derive(Debug, Default)]
pub struct CollectingMessageCollector {
    messages: Mutex<Vec<CompilerMessage>>,
}

impl CollectingMessageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<CompilerMessage> {
        self.messages.lock().clone()
    }

    pub fn count(&self, severity: CompilerMessageSeverity) -> usize {
        self.messages
            .lock()
            .iter()
            .filter(|message| message.severity == severity)
            .count()
    }

    pub fn errors(&self) -> Vec<CompilerMessage> {
        self.messages
            .lock()
            .iter()
            .filter(|message| message.severity.is_error())
            .cloned()
            .collect()
    }
}

impl MessageCollector for CollectingMessageCollector {
    fn report(&self, message: CompilerMessage) {
        self.messages.lock().push(message);
    }

    fn has_errors(&self) -> bool {
        self.messages
            .lock()
            .iter()
            .any(|message| message.severity.is_error())
    }
}
