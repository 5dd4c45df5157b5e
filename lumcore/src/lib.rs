//! Core of the Lumen compiler plugin host.
//!
//! The crate owns everything between the typed IR ([`lumir`]) and a front
//! end driving a compilation: instance creation and logging
//! ([`base::InstanceContext`]), plugin registration ([`base::ext`]), the
//! transformation phase ([`session::CompilationSession`]) and its message
//! channel ([`diagnostics`]). The screen lifecycle instrumentation plugin
//! ([`screen`]) is registered by default.

pub mod base;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod ext;
pub mod magic;
pub mod screen;
pub mod session;
#[cfg(any(test, feature = "test-utils"))]
pub mod tests_utils;
pub mod utils;

pub extern crate chrono;
pub extern crate inventory;
