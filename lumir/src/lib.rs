//! Typed declaration IR for the Lumen front end.
//!
//! A compilation unit is a [`module::Module`] holding top-level
//! [`decl::Declaration`]s. Declarations carry annotations, parameters, a
//! declared return type and an optional body made of [`decl::Statement`]s.
//! Calls inside bodies start out unresolved when parsed and are bound to a
//! [`symbol::FunctionSymbol`] by [`resolve::resolve_module`]; once resolved,
//! a module can be checked with [`module::Module::verify`].

pub mod analysis;
pub mod decl;
pub mod expr;
pub mod fmt;
pub mod module;
pub mod name;
#[cfg(feature = "chumsky")]
pub mod parser;
pub mod resolve;
pub mod symbol;
pub mod types;
pub mod utils;
