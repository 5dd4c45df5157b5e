//! Function symbols and symbol tables.
//!
//! A [`SymbolTable`] answers "which top-level functions named `name` live in
//! package `package`?" across every module of a compilation, including
//! modules the current unit only depends on. It is a read-only capability:
//! resolution code receives it as an argument instead of reaching for any
//! global state.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    decl::{Declaration, ValueParameter},
    module::Module,
    name::FqName,
    types::Type,
};

/// Identity of a function symbol. Equal to the uuid of the declaration that
/// defines the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolId(pub Uuid);

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A top-level function visible in the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionSymbol {
    pub id: SymbolId,
    pub package: FqName,
    pub name: String,
    pub params: Vec<ValueParameter>,
    pub return_type: Type,
    /// Uuid of the module defining the function.
    pub module: Uuid,
}

impl FunctionSymbol {
    /// Build the symbol of a function declaration defined in `module`.
    ///
    /// Returns `None` for declarations that are not function-like.
    pub fn of_declaration(module: &Module, declaration: &Declaration) -> Option<Self> {
        if !declaration.kind.is_function_like() {
            return None;
        }

        Some(Self {
            id: SymbolId(declaration.uuid),
            package: module.package.clone(),
            name: declaration.name.clone(),
            params: declaration.params.clone(),
            return_type: declaration.return_type.clone(),
            module: module.uuid,
        })
    }

    pub fn fq_name(&self) -> FqName {
        self.package.child(self.name.clone())
    }

    /// Human readable signature, e.g. `pkg.f(a: string): unit`.
    pub fn signature(&self) -> String {
        format!(
            "{}({}): {}",
            self.fq_name(),
            self.params
                .iter()
                .map(|param| format!("{}: {}", param.name, param.ty))
                .collect::<Vec<_>>()
                .join(", "),
            self.return_type
        )
    }
}

/// Candidates returned by a lookup. Almost always zero or one entry.
pub type SymbolCandidates = SmallVec<[FunctionSymbol; 1]>;

/// Read-only query interface over every function visible to a compilation.
pub trait SymbolTable {
    /// All top-level functions named `name` in `package`, in definition order.
    fn top_level_functions(&self, package: &FqName, name: &str) -> SymbolCandidates;
}

/// Symbol table built from a set of parsed modules.
#[derive(Debug, Default, Clone)]
pub struct ModuleSymbolTable {
    functions: BTreeMap<(FqName, String), Vec<FunctionSymbol>>,
}

impl ModuleSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the function symbols of every module.
    pub fn from_modules<'a>(modules: impl IntoIterator<Item = &'a Module>) -> Self {
        let mut table = Self::new();
        for module in modules {
            table.add_module(module);
        }
        table
    }

    pub fn add_module(&mut self, module: &Module) {
        for declaration in &module.declarations {
            if let Some(symbol) = FunctionSymbol::of_declaration(module, declaration) {
                self.insert(symbol);
            }
        }
    }

    pub fn insert(&mut self, symbol: FunctionSymbol) {
        self.functions
            .entry((symbol.package.clone(), symbol.name.clone()))
            .or_default()
            .push(symbol);
    }

    /// Number of function symbols in the table.
    pub fn len(&self) -> usize {
        self.functions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl SymbolTable for ModuleSymbolTable {
    fn top_level_functions(&self, package: &FqName, name: &str) -> SymbolCandidates {
        self.functions
            .get(&(package.clone(), name.to_string()))
            .map(|symbols| symbols.iter().cloned().collect())
            .unwrap_or_default()
    }
}
