//! Expressions.
//!
//! Calls are the only compound expression. A call is created with an
//! [`CalleeReference::Unresolved`] callee by the parser and becomes
//! [`CalleeReference::Resolved`] once name resolution bound it to a
//! [`SymbolId`]. A resolved call also records which parameter every
//! argument is passed to and the call's result type, so later phases never
//! have to look at the symbol table again.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};

use crate::{decl::ValueParameter, name::FqName, symbol::SymbolId, types::Type};

/// Byte range inside the source file a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Literal constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    String(String),
    Int(i64),
    Bool(bool),
    Unit,
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::String(_) => Type::String,
            Literal::Int(_) => Type::Int,
            Literal::Bool(_) => Type::Bool,
            Literal::Unit => Type::Unit,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Unit => write!(f, "unit"),
        }
    }
}

/// A callee that has been bound to a function symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedReference {
    /// Fully qualified name of the callee.
    pub name: FqName,
    /// The symbol the call is bound to.
    pub symbol: SymbolId,
    /// Where the reference appears in source, if anywhere.
    pub source: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalleeReference {
    /// Callee as written, possibly a short name.
    Unresolved(FqName),
    Resolved(ResolvedReference),
}

impl CalleeReference {
    /// Name of the callee, qualified when resolved.
    pub fn name(&self) -> &FqName {
        match self {
            CalleeReference::Unresolved(name) => name,
            CalleeReference::Resolved(reference) => &reference.name,
        }
    }
}

/// Positional call argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Argument {
    pub value: Expression,
    /// Parameter of the callee receiving this argument. `None` until resolved.
    pub parameter: Option<ValueParameter>,
}

impl Argument {
    pub fn unmapped(value: Expression) -> Self {
        Self {
            value,
            parameter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionCall {
    pub callee: CalleeReference,
    pub arguments: Vec<Argument>,
    /// Result type of the call. `None` until resolved.
    pub ty: Option<Type>,
    pub source: Option<SourceSpan>,
}

impl FunctionCall {
    pub fn is_resolved(&self) -> bool {
        self.callee.is_resolved()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expression {
    Literal(Literal),
    /// Reference to a parameter or a local introduced by `let`.
    Reference(String),
    Call(FunctionCall),
}

impl Expression {
    /// Visit this expression and every nested call, outermost first.
    pub fn for_each_call<'a>(&'a self, visitor: &mut impl FnMut(&'a FunctionCall)) {
        if let Expression::Call(call) = self {
            visitor(call);
            for argument in &call.arguments {
                argument.value.for_each_call(visitor);
            }
        }
    }
}
