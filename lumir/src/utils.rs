use strum::EnumIs;
use thiserror::Error;

use crate::{name::FqName, types::Type};

/// A single syntax error with its byte range in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub message: String,
    pub start: usize,
    pub end: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.start, self.end)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// The source text could not be parsed.
    #[error(
        "Failed to parse `{}`: {} syntax error(s), first: {}",
        file.as_deref().unwrap_or("<unnamed>"),
        errors.len(),
        errors.first().map(|e| e.to_string()).unwrap_or_default()
    )]
    ParserErrors {
        file: Option<String>,
        errors: Vec<ParseError>,
    },

    /// No function with the called name is visible.
    #[error("Function `{function}` calls `{callee}`, but no such function is visible.")]
    UnresolvedFunction { function: String, callee: FqName },

    /// More than one visible function accepts the call.
    #[error(
        "Function `{function}` calls `{callee}`, which is ambiguous: {candidates} candidates accept the arguments."
    )]
    AmbiguousFunction {
        function: String,
        callee: FqName,
        candidates: usize,
    },

    /// A reference to a name that is neither a parameter nor a local.
    #[error("Function `{function}` refers to `{name}`, which is not defined in scope.")]
    UndefinedReference { function: String, name: String },

    #[error(
        "Function `{function}` calls `{callee}` with {found} argument(s), but it expects {expected}."
    )]
    ArgumentCountMismatch {
        function: String,
        callee: FqName,
        expected: usize,
        found: usize,
    },

    #[error(
        "Function `{function}` passes a value of type `{found}` to parameter `{parameter}: {expected}` of `{callee}`."
    )]
    ArgumentTypeMismatch {
        function: String,
        callee: FqName,
        parameter: String,
        expected: Type,
        found: Type,
    },

    #[error("`{name}` in `{function}` is declared as `{expected}` but initialized with `{found}`.")]
    InitializerTypeMismatch {
        function: String,
        name: String,
        expected: Type,
        found: Type,
    },

    /// A call survived resolution without being bound to a symbol.
    #[error("Function `{function}` contains an unresolved call to `{callee}`.")]
    UnresolvedCallee { function: String, callee: FqName },

    /// A resolved call has an argument that is not mapped to a parameter.
    #[error(
        "Argument {index} of the call to `{callee}` in `{function}` is not mapped to any parameter."
    )]
    UnmappedArgument {
        function: String,
        callee: FqName,
        index: usize,
    },

    /// A resolved call has no result type.
    #[error("The call to `{callee}` in `{function}` has no result type.")]
    UntypedCall { function: String, callee: FqName },
}
