use std::sync::Arc;

use semver::Version;

use crate::diagnostics::{MessageCollector, MessageCollectorNone};

/// What the host front end reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendInfo {
    pub language_version: Version,
}

/// Configuration handed to plugin registrars for one compilation session.
#[derive(Clone)]
pub struct CompilerConfiguration {
    pub frontend: FrontendInfo,
    pub messages: Arc<dyn MessageCollector>,
}

impl CompilerConfiguration {
    pub fn new(language_version: Version, messages: Arc<dyn MessageCollector>) -> Self {
        Self {
            frontend: FrontendInfo { language_version },
            messages,
        }
    }

    /// Configuration that drops every message.
    pub fn silent(language_version: Version) -> Self {
        Self::new(language_version, Arc::new(MessageCollectorNone))
    }
}
