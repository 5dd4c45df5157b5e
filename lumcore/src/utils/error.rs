use semver::{Version, VersionReq};
use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, Error, EnumIs)]
pub enum LmError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse manifest file '{file}': {source}")]
    ManifestParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error(transparent)]
    IrError(#[from] lumir::utils::Error),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),

    #[error("Plugin with name '{0}' not found")]
    PluginNotFound(String),

    #[error("Key '{key}' not found in {context}")]
    KeyNotFound { key: String, context: String },

    #[error("Duplicated key '{key}' in {context}")]
    DuplicatedKey { key: String, context: String },

    #[error(
        "Plugin '{name}' does not support front end version {version} (requires {req}); no declaration will be transformed"
    )]
    UnsupportedFrontend {
        name: String,
        version: Version,
        req: VersionReq,
    },

    #[error("Symbol '{name}' not found: the instrumentation function must be on the compilation classpath")]
    SymbolNotFound { name: String },

    #[error("Symbol '{name}' is ambiguous: {candidates} functions match")]
    AmbiguousSymbol { name: String, candidates: usize },

    #[error("Signature mismatch for '{signature}': {reason}")]
    SignatureMismatch { signature: String, reason: String },

    #[error("Compilation session aborted after a fatal error")]
    SessionAborted,

    #[error("Compilation finished with {0} error(s)")]
    CompilationFailed(usize),
}

pub type LmResult<T> = Result<T, LmError>;
