use lumir::{
    name::FqName,
    symbol::{FunctionSymbol, SymbolTable},
};
use once_cell::sync::OnceCell;

use crate::{
    magic::{LIFECYCLE_EFFECT_NAME, LIFECYCLE_EFFECT_PACKAGE},
    utils::error::{LmError, LmResult},
};

/// Finds the lifecycle instrumentation function.
///
/// The first successful lookup is cached for the lifetime of the resolver,
/// which is one compilation session. Failed lookups are not cached.
#[derive(Debug)]
pub struct LifecycleEffectResolver {
    package: FqName,
    name: &'static str,
    cache: OnceCell<FunctionSymbol>,
}

impl Default for LifecycleEffectResolver {
    fn default() -> Self {
        Self {
            package: FqName::parse(LIFECYCLE_EFFECT_PACKAGE),
            name: LIFECYCLE_EFFECT_NAME,
            cache: OnceCell::new(),
        }
    }
}

impl LifecycleEffectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qualified_name(&self) -> FqName {
        self.package.child(self.name)
    }

    /// The bound symbol, looked up in `symbols` on first use.
    ///
    /// Exactly one candidate must exist.
    pub fn resolve(&self, symbols: &dyn SymbolTable) -> LmResult<&FunctionSymbol> {
        self.cache.get_or_try_init(|| {
            let candidates = symbols.top_level_functions(&self.package, self.name);
            match candidates.as_slice() {
                [symbol] => Ok(symbol.clone()),
                [] => Err(LmError::SymbolNotFound {
                    name: self.qualified_name().to_string(),
                }),
                many => Err(LmError::AmbiguousSymbol {
                    name: self.qualified_name().to_string(),
                    candidates: many.len(),
                }),
            }
        })
    }

    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use lumir::symbol::SymbolCandidates;

    use super::*;
    use crate::tests_utils::{FakeSymbolTable, lifecycle_symbol};

    struct CountingTable<'a> {
        inner: &'a FakeSymbolTable,
        lookups: Cell<usize>,
    }

    impl SymbolTable for CountingTable<'_> {
        fn top_level_functions(&self, package: &FqName, name: &str) -> SymbolCandidates {
            self.lookups.set(self.lookups.get() + 1);
            self.inner.top_level_functions(package, name)
        }
    }

    #[test]
    fn single_candidate_is_bound_and_cached() {
        let symbol = lifecycle_symbol();
        let table = CountingTable {
            inner: &FakeSymbolTable::with([symbol.clone()]),
            lookups: Cell::new(0),
        };

        let resolver = LifecycleEffectResolver::new();
        assert_eq!(resolver.resolve(&table).unwrap(), &symbol);
        assert_eq!(resolver.resolve(&table).unwrap().id, symbol.id);
        assert_eq!(table.lookups.get(), 1);
        assert!(resolver.is_cached());
    }

    #[test]
    fn missing_symbol_is_fatal() {
        let resolver = LifecycleEffectResolver::new();
        let err = resolver.resolve(&FakeSymbolTable::empty()).unwrap_err();
        assert!(err.is_symbol_not_found());
        assert!(!resolver.is_cached());
    }

    #[test]
    fn ambiguous_symbol_is_fatal() {
        let resolver = LifecycleEffectResolver::new();
        let table = FakeSymbolTable::with([lifecycle_symbol(), lifecycle_symbol()]);
        match resolver.resolve(&table).unwrap_err() {
            LmError::AmbiguousSymbol { name, candidates } => {
                assert_eq!(name, "lumen.lifecycle.ScreenLifecycleEffect");
                assert_eq!(candidates, 2);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let table = FakeSymbolTable::with([lifecycle_symbol()]);
        let first = LifecycleEffectResolver::new().resolve(&table).unwrap().clone();
        let second = LifecycleEffectResolver::new().resolve(&table).unwrap().clone();
        assert_eq!(first, second);
    }
}
