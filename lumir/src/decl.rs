//! Declarations and statements.
//!
//! A [`Declaration`] is a top-level entity of a module: a function, a
//! property or a class. Only functions have a body. A body is an ordered
//! [`Block`] of [`Statement`]s; statement order is program order.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};
use uuid::Uuid;

use crate::{
    expr::{Expression, Literal, SourceSpan},
    name::FqName,
    types::Type,
};

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclarationKind {
    Function,
    Property,
    Class,
}

impl DeclarationKind {
    /// Whether declarations of this kind have parameters and a body.
    pub fn is_function_like(&self) -> bool {
        matches!(self, DeclarationKind::Function)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "fun",
            DeclarationKind::Property => "val",
            DeclarationKind::Class => "class",
        }
    }
}

/// Visibility of a declaration outside its module.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

/// Metadata attached to a declaration, written `@name` or `@name(args...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    /// Name of the annotation class. Short names are qualified against the
    /// module imports during resolution.
    pub name: FqName,
    pub arguments: Vec<Literal>,
}

impl Annotation {
    pub fn new(name: impl Into<FqName>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }
}

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueParameter {
    pub name: String,
    pub ty: Type,
}

impl ValueParameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// `let name: ty = value;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetStatement {
    pub name: String,
    pub ty: Type,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    Let(LetStatement),
    /// Expression evaluated for its side effects.
    Expr(Expression),
    Return(Option<Expression>),
}

impl Statement {
    /// The top-level expression of the statement, if any.
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Statement::Let(stmt) => Some(&stmt.value),
            Statement::Expr(expr) => Some(expr),
            Statement::Return(value) => value.as_ref(),
        }
    }

    pub fn expression_mut(&mut self) -> Option<&mut Expression> {
        match self {
            Statement::Let(stmt) => Some(&mut stmt.value),
            Statement::Expr(expr) => Some(expr),
            Statement::Return(value) => value.as_mut(),
        }
    }
}

/// An ordered list of statements.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A top-level declaration of a module.
///
/// `params`, `body` are only meaningful for function-like declarations and
/// `initializer` only for properties. `return_type` is the declared type of
/// a property and `unit` for classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Declaration {
    /// Stable identity of the declaration within a compilation.
    pub uuid: Uuid,
    pub name: String,
    pub kind: DeclarationKind,
    pub annotations: Vec<Annotation>,
    pub params: Vec<ValueParameter>,
    pub return_type: Type,
    /// Body of a function. `None` for functions declared without one.
    pub body: Option<Block>,
    pub initializer: Option<Expression>,
    pub visibility: Visibility,
    pub source: Option<SourceSpan>,
}

impl Declaration {
    /// Create a function declaration with a fresh uuid.
    pub fn function(name: impl Into<String>, params: Vec<ValueParameter>, return_type: Type) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            kind: DeclarationKind::Function,
            annotations: Vec::new(),
            params,
            return_type,
            body: Some(Block::default()),
            initializer: None,
            visibility: Visibility::default(),
            source: None,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_body(mut self, statements: Vec<Statement>) -> Self {
        self.body = Some(Block::new(statements));
        self
    }

    /// Whether the declaration carries an annotation with exactly this
    /// qualified name.
    pub fn has_annotation(&self, name: &FqName) -> bool {
        self.annotations.iter().any(|annotation| &annotation.name == name)
    }

    /// Statements of the body, empty when there is none.
    pub fn statements(&self) -> &[Statement] {
        self.body
            .as_ref()
            .map(|body| body.statements.as_slice())
            .unwrap_or(&[])
    }
}
