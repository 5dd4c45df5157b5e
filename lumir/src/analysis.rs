//! Typing of already resolved bodies.
//!
//! [`TypeScope`] tracks the names visible at a program point of a function
//! body (parameters, then locals in statement order) and computes the type of
//! resolved expressions. It does not infer anything: every call must already
//! carry its result type and argument-to-parameter mapping.
use crate::{
    decl::{Declaration, Statement, ValueParameter},
    expr::{Expression, FunctionCall},
    types::Type,
    utils::Error,
};

pub struct TypeScope<'a> {
    function: &'a str,
    bindings: Vec<(String, Type)>,
}

impl<'a> TypeScope<'a> {
    /// Scope holding only the given parameters.
    pub fn new(function: &'a str, params: &[ValueParameter]) -> Self {
        Self {
            function,
            bindings: params
                .iter()
                .map(|param| (param.name.clone(), param.ty.clone()))
                .collect(),
        }
    }

    /// Scope at the entry of `declaration`'s body: its parameters only.
    pub fn for_declaration(declaration: &'a Declaration) -> Self {
        Self::new(&declaration.name, &declaration.params)
    }

    pub fn function(&self) -> &str {
        self.function
    }

    /// Introduce a local. Later bindings shadow earlier ones.
    pub fn bind(&mut self, name: impl Into<String>, ty: Type) {
        self.bindings.push((name.into(), ty));
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, ty)| ty)
    }

    /// Type of a resolved expression, checking every nested call on the way.
    pub fn type_of(&self, expression: &Expression) -> Result<Type, Error> {
        match expression {
            Expression::Literal(literal) => Ok(literal.ty()),
            Expression::Reference(name) => {
                self.lookup(name)
                    .cloned()
                    .ok_or_else(|| Error::UndefinedReference {
                        function: self.function.to_string(),
                        name: name.clone(),
                    })
            }
            Expression::Call(call) => self.type_of_call(call),
        }
    }

    /// Result type of a resolved call, after checking its arguments.
    pub fn type_of_call(&self, call: &FunctionCall) -> Result<Type, Error> {
        if !call.is_resolved() {
            return Err(Error::UnresolvedCallee {
                function: self.function.to_string(),
                callee: call.callee.name().clone(),
            });
        }

        for (index, argument) in call.arguments.iter().enumerate() {
            let Some(parameter) = &argument.parameter else {
                return Err(Error::UnmappedArgument {
                    function: self.function.to_string(),
                    callee: call.callee.name().clone(),
                    index,
                });
            };

            let found = self.type_of(&argument.value)?;
            if found != parameter.ty {
                return Err(Error::ArgumentTypeMismatch {
                    function: self.function.to_string(),
                    callee: call.callee.name().clone(),
                    parameter: parameter.name.clone(),
                    expected: parameter.ty.clone(),
                    found,
                });
            }
        }

        call.ty.clone().ok_or_else(|| Error::UntypedCall {
            function: self.function.to_string(),
            callee: call.callee.name().clone(),
        })
    }

    /// Check a statement and bind the local it introduces, if any.
    pub fn check_statement(&mut self, statement: &Statement) -> Result<(), Error> {
        match statement {
            Statement::Let(stmt) => {
                let found = self.type_of(&stmt.value)?;
                if found != stmt.ty {
                    return Err(Error::InitializerTypeMismatch {
                        function: self.function.to_string(),
                        name: stmt.name.clone(),
                        expected: stmt.ty.clone(),
                        found,
                    });
                }
                self.bind(stmt.name.clone(), stmt.ty.clone());
            }
            Statement::Expr(expr) => {
                self.type_of(expr)?;
            }
            Statement::Return(value) => {
                if let Some(value) = value {
                    self.type_of(value)?;
                }
            }
        }
        Ok(())
    }
}
