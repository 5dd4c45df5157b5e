//! Name resolution.
//!
//! Binds everything the parser leaves symbolic: annotation names are
//! qualified against the module imports, and each call is bound to the single
//! visible function whose parameters accept its arguments. Resolution is the
//! front end's job; transformation passes only ever see resolved modules.
use log::debug;

use crate::{
    analysis::TypeScope,
    decl::{Declaration, DeclarationKind, Statement},
    expr::{CalleeReference, Expression, FunctionCall, ResolvedReference},
    module::Module,
    symbol::{FunctionSymbol, SymbolTable},
    types::Type,
    utils::Error,
};

/// Resolve every declaration of `module` against `symbols`.
///
/// Already resolved calls are left untouched, so resolving twice is a no-op.
pub fn resolve_module(module: &mut Module, symbols: &dyn SymbolTable) -> Result<(), Error> {
    let mut declarations = std::mem::take(&mut module.declarations);
    let context: &Module = module;
    let result = declarations
        .iter_mut()
        .try_for_each(|declaration| resolve_declaration(context, declaration, symbols));
    module.declarations = declarations;
    result
}

fn resolve_declaration(
    module: &Module,
    declaration: &mut Declaration,
    symbols: &dyn SymbolTable,
) -> Result<(), Error> {
    for annotation in declaration.annotations.iter_mut() {
        annotation.name = module.qualify(&annotation.name);
    }

    let function = declaration.name.clone();
    let mut scope = TypeScope::new(&function, &declaration.params);

    match declaration.kind {
        DeclarationKind::Function => {
            let Some(body) = declaration.body.as_mut() else {
                return Ok(());
            };

            for statement in body.statements.iter_mut() {
                match statement {
                    Statement::Let(stmt) => {
                        let found = resolve_expression(module, symbols, &scope, &mut stmt.value)?;
                        if found != stmt.ty {
                            return Err(Error::InitializerTypeMismatch {
                                function: function.clone(),
                                name: stmt.name.clone(),
                                expected: stmt.ty.clone(),
                                found,
                            });
                        }
                        scope.bind(stmt.name.clone(), stmt.ty.clone());
                    }
                    Statement::Expr(expr) => {
                        resolve_expression(module, symbols, &scope, expr)?;
                    }
                    Statement::Return(value) => {
                        if let Some(value) = value {
                            resolve_expression(module, symbols, &scope, value)?;
                        }
                    }
                }
            }
        }
        DeclarationKind::Property => {
            if let Some(initializer) = declaration.initializer.as_mut() {
                let found = resolve_expression(module, symbols, &scope, initializer)?;
                if found != declaration.return_type {
                    return Err(Error::InitializerTypeMismatch {
                        function: function.clone(),
                        name: function.clone(),
                        expected: declaration.return_type.clone(),
                        found,
                    });
                }
            }
        }
        DeclarationKind::Class => {}
    }

    Ok(())
}

fn resolve_expression(
    module: &Module,
    symbols: &dyn SymbolTable,
    scope: &TypeScope<'_>,
    expression: &mut Expression,
) -> Result<Type, Error> {
    match expression {
        Expression::Call(call) => resolve_call(module, symbols, scope, call),
        other => scope.type_of(other),
    }
}

fn resolve_call(
    module: &Module,
    symbols: &dyn SymbolTable,
    scope: &TypeScope<'_>,
    call: &mut FunctionCall,
) -> Result<Type, Error> {
    let mut argument_types = Vec::with_capacity(call.arguments.len());
    for argument in call.arguments.iter_mut() {
        argument_types.push(resolve_expression(module, symbols, scope, &mut argument.value)?);
    }

    let written = match &call.callee {
        CalleeReference::Unresolved(name) => name.clone(),
        CalleeReference::Resolved(_) => return scope.type_of_call(call),
    };

    let qualified = module.qualify(&written);
    let package = qualified.parent();
    let short = qualified.short_name().unwrap_or_default();
    let candidates = symbols.top_level_functions(&package, short);

    let accepting: Vec<&FunctionSymbol> = candidates
        .iter()
        .filter(|symbol| {
            symbol.params.len() == argument_types.len()
                && symbol
                    .params
                    .iter()
                    .zip(&argument_types)
                    .all(|(param, ty)| &param.ty == ty)
        })
        .collect();

    let symbol = match accepting.as_slice() {
        [symbol] => *symbol,
        [] => {
            return Err(match candidates.as_slice() {
                [] => Error::UnresolvedFunction {
                    function: scope.function().to_string(),
                    callee: qualified,
                },
                [single] => mismatch_error(scope.function(), single, &argument_types),
                _ => Error::UnresolvedFunction {
                    function: scope.function().to_string(),
                    callee: qualified,
                },
            });
        }
        many => {
            return Err(Error::AmbiguousFunction {
                function: scope.function().to_string(),
                callee: qualified,
                candidates: many.len(),
            });
        }
    };

    debug!(
        "Resolved call to `{}` in `{}` to symbol {}",
        written,
        scope.function(),
        symbol.id
    );

    call.callee = CalleeReference::Resolved(ResolvedReference {
        name: symbol.fq_name(),
        symbol: symbol.id,
        source: call.source,
    });
    for (argument, param) in call.arguments.iter_mut().zip(&symbol.params) {
        argument.parameter = Some(param.clone());
    }
    call.ty = Some(symbol.return_type.clone());

    Ok(symbol.return_type.clone())
}

/// Explain why the only candidate does not accept the arguments.
fn mismatch_error(function: &str, symbol: &FunctionSymbol, argument_types: &[Type]) -> Error {
    let mismatch = symbol
        .params
        .iter()
        .zip(argument_types)
        .find(|(param, ty)| &param.ty != *ty);

    match mismatch {
        Some((param, found)) if symbol.params.len() == argument_types.len() => {
            Error::ArgumentTypeMismatch {
                function: function.to_string(),
                callee: symbol.fq_name(),
                parameter: param.name.clone(),
                expected: param.ty.clone(),
                found: found.clone(),
            }
        }
        _ => Error::ArgumentCountMismatch {
            function: function.to_string(),
            callee: symbol.fq_name(),
            expected: symbol.params.len(),
            found: argument_types.len(),
        },
    }
}
