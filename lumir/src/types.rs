//! Types module
//!
//! The front end only needs a handful of built-in types plus nominal types
//! referring to declarations by qualified name. Types are compared
//! structurally; there is no subtyping.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumIs;

use crate::name::FqName;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The type of expressions evaluated only for their side effects.
    Unit,
    Bool,
    /// 64-bit signed integer.
    Int,
    String,
    /// A nominal type, e.g. a class declared in some module.
    Named(FqName),
}

impl Type {
    /// Map a written type name to a [`Type`]. Built-in keywords win over
    /// nominal types with the same spelling.
    pub fn from_name(name: FqName) -> Self {
        if name.len() == 1 {
            match name.short_name() {
                Some("unit") => return Type::Unit,
                Some("bool") => return Type::Bool,
                Some("int") => return Type::Int,
                Some("string") => return Type::String,
                _ => {}
            }
        }
        Type::Named(name)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Unit => write!(f, "unit"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::String => write!(f, "string"),
            Type::Named(name) => write!(f, "{}", name),
        }
    }
}
