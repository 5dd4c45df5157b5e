//! Compilation units.
//!
//! A [`Module`] is one source file: a package name, the imports used to
//! qualify short names, and the top-level declarations in source order.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    analysis::TypeScope,
    decl::{Declaration, DeclarationKind},
    name::FqName,
    utils::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module {
    pub uuid: Uuid,
    pub package: FqName,
    /// File the module was parsed from, used for diagnostics.
    pub filename: Option<String>,
    pub imports: Vec<FqName>,
    pub declarations: Vec<Declaration>,
}

impl Default for Module {
    fn default() -> Self {
        Self::new(FqName::ROOT)
    }
}

impl Module {
    pub fn new(package: FqName) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            package,
            filename: None,
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn declaration(&self, uuid: Uuid) -> Option<&Declaration> {
        self.declarations.iter().find(|decl| decl.uuid == uuid)
    }

    /// First declaration with the given name.
    pub fn declaration_by_name(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|decl| decl.name == name)
    }

    /// Iterate over the function-like declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|decl| decl.kind.is_function_like())
    }

    /// Qualify a name as written in this module: single segment names
    /// matching the short name of an import resolve to that import, other
    /// single segment names to this module's package. Multi segment names are
    /// already qualified.
    pub fn qualify(&self, name: &FqName) -> FqName {
        if name.len() != 1 {
            return name.clone();
        }

        let short = name.short_name();
        self.imports
            .iter()
            .find(|import| import.short_name() == short)
            .cloned()
            .unwrap_or_else(|| self.package.child(short.unwrap_or_default()))
    }

    /// Verify that the module is fully resolved and well typed:
    /// 1) Every call is bound to a symbol and carries its result type.
    /// 2) Every argument is mapped to a parameter of the same type.
    /// 3) Every reference names a parameter or a previously bound local.
    /// 4) Initializers match their declared type.
    pub fn verify(&self) -> Result<(), Error> {
        for declaration in &self.declarations {
            let mut scope = TypeScope::for_declaration(declaration);

            match declaration.kind {
                DeclarationKind::Function => {
                    for statement in declaration.statements() {
                        scope.check_statement(statement)?;
                    }
                }
                DeclarationKind::Property => {
                    if let Some(initializer) = &declaration.initializer {
                        let found = scope.type_of(initializer)?;
                        if found != declaration.return_type {
                            return Err(Error::InitializerTypeMismatch {
                                function: declaration.name.clone(),
                                name: declaration.name.clone(),
                                expected: declaration.return_type.clone(),
                                found,
                            });
                        }
                    }
                }
                DeclarationKind::Class => {}
            }
        }

        Ok(())
    }
}
