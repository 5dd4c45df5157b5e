use lumir::{
    decl::Statement,
    expr::{Argument, CalleeReference, Expression, FunctionCall, Literal, ResolvedReference},
    symbol::FunctionSymbol,
    types::Type,
};

use crate::utils::error::{LmError, LmResult};

/// Check that `symbol` can be called as `f(screenName: string): unit`.
pub fn check_lifecycle_signature(symbol: &FunctionSymbol) -> LmResult<()> {
    let reason = match symbol.params.as_slice() {
        [param] if param.ty != Type::String => Some(format!(
            "parameter `{}` has type `{}`, expected `string`",
            param.name, param.ty
        )),
        [_] => None,
        params => Some(format!(
            "expected exactly one `string` parameter, found {}",
            params.len()
        )),
    }
    .or_else(|| {
        (symbol.return_type != Type::Unit).then(|| {
            format!(
                "return type is `{}`, expected `unit`",
                symbol.return_type
            )
        })
    });

    match reason {
        Some(reason) => Err(LmError::SignatureMismatch {
            signature: symbol.signature(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Build the statement `ScreenLifecycleEffect("<screen_name>");`, already
/// bound to `symbol`, typed, and with its argument mapped.
pub fn synthesize_lifecycle_call(symbol: &FunctionSymbol, screen_name: &str) -> LmResult<Statement> {
    check_lifecycle_signature(symbol)?;

    let argument = Argument {
        value: Expression::Literal(Literal::String(screen_name.to_string())),
        parameter: symbol.params.first().cloned(),
    };

    Ok(Statement::Expr(Expression::Call(FunctionCall {
        callee: CalleeReference::Resolved(ResolvedReference {
            name: symbol.fq_name(),
            symbol: symbol.id,
            source: None,
        }),
        arguments: vec![argument],
        ty: Some(symbol.return_type.clone()),
        source: None,
    })))
}

#[cfg(test)]
mod tests {
    use lumir::{analysis::TypeScope, decl::ValueParameter};

    use super::*;
    use crate::tests_utils::{lifecycle_symbol, lifecycle_symbol_with};

    #[test]
    fn call_is_resolved_and_typed() {
        let symbol = lifecycle_symbol();
        let statement = synthesize_lifecycle_call(&symbol, "LoginScreen").unwrap();

        let Statement::Expr(Expression::Call(call)) = &statement else {
            panic!("expected a call statement, got {statement:?}");
        };
        let CalleeReference::Resolved(reference) = &call.callee else {
            panic!("callee should be resolved");
        };
        assert_eq!(reference.symbol, symbol.id);
        assert_eq!(reference.name.to_string(), "lumen.lifecycle.ScreenLifecycleEffect");
        assert_eq!(
            call.arguments[0].value,
            Expression::Literal(Literal::String("LoginScreen".to_string()))
        );
        assert_eq!(call.ty, Some(Type::Unit));

        let mut scope = TypeScope::new("LoginScreen", &[]);
        scope.check_statement(&statement).unwrap();
    }

    #[test]
    fn wrong_parameter_type_is_rejected() {
        let symbol = lifecycle_symbol_with(vec![ValueParameter::new("id", Type::Int)], Type::Unit);
        let err = synthesize_lifecycle_call(&symbol, "LoginScreen").unwrap_err();
        assert!(err.is_signature_mismatch());
        assert!(err.to_string().contains("`id` has type `int`"), "{err}");
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let symbol = lifecycle_symbol_with(
            vec![
                ValueParameter::new("screenName", Type::String),
                ValueParameter::new("extra", Type::String),
            ],
            Type::Unit,
        );
        assert!(check_lifecycle_signature(&symbol).unwrap_err().is_signature_mismatch());

        let nullary = lifecycle_symbol_with(Vec::new(), Type::Unit);
        assert!(check_lifecycle_signature(&nullary).is_err());
    }

    #[test]
    fn non_unit_return_is_rejected() {
        let symbol = lifecycle_symbol_with(
            vec![ValueParameter::new("screenName", Type::String)],
            Type::Bool,
        );
        let err = check_lifecycle_signature(&symbol).unwrap_err();
        assert!(err.to_string().contains("return type is `bool`"), "{err}");
    }
}
