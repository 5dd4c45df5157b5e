//! Textual form of the IR.
//!
//! The output is accepted by the parser, so printing a module and parsing it
//! back yields the same declarations (resolved callees print fully
//! qualified).
use std::fmt::{Display, Formatter, Result};

use crate::{
    decl::{Annotation, Block, Declaration, DeclarationKind, Statement, Visibility},
    expr::{Expression, FunctionCall},
    module::Module,
};

const INDENT: &str = "    ";

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}(", self.callee.name())?;
        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument.value)?;
        }
        f.write_str(")")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Reference(name) => f.write_str(name),
            Expression::Call(call) => write!(f, "{}", call),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {}: {} = {};", stmt.name, stmt.ty, stmt.value),
            Statement::Expr(expr) => write!(f, "{};", expr),
            Statement::Return(Some(value)) => write!(f, "return {};", value),
            Statement::Return(None) => f.write_str("return;"),
        }
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "@{}", self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (index, argument) in self.arguments.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("{\n")?;
        for statement in &self.statements {
            writeln!(f, "{}{}", INDENT, statement)?;
        }
        f.write_str("}")
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for annotation in &self.annotations {
            writeln!(f, "{}", annotation)?;
        }
        if self.visibility != Visibility::Public {
            write!(f, "{} ", self.visibility.keyword())?;
        }
        write!(f, "{} {}", self.kind.keyword(), self.name)?;

        match self.kind {
            DeclarationKind::Function => {
                f.write_str("(")?;
                for (index, param) in self.params.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", param.name, param.ty)?;
                }
                write!(f, "): {}", self.return_type)?;
                match &self.body {
                    Some(body) => write!(f, " {}", body),
                    None => f.write_str(";"),
                }
            }
            DeclarationKind::Property => {
                write!(f, ": {}", self.return_type)?;
                if let Some(initializer) = &self.initializer {
                    write!(f, " = {}", initializer)?;
                }
                f.write_str(";")
            }
            DeclarationKind::Class => f.write_str(";"),
        }
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !self.package.is_root() {
            writeln!(f, "package {}", self.package)?;
            writeln!(f)?;
        }
        for import in &self.imports {
            writeln!(f, "import {}", import)?;
        }
        if !self.imports.is_empty() {
            writeln!(f)?;
        }
        for (index, declaration) in self.declarations.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", declaration)?;
        }
        Ok(())
    }
}
