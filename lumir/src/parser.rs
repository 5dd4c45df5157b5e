//! Parser for the textual IR.
//!
//! ```text
//! package app.screens
//!
//! import lumen.ui.Composable
//!
//! @Composable
//! fun HomeScreen(title: string): unit {
//!     let heading: string = title;
//!     ScreenTitle(heading);
//!     return;
//! }
//!
//! val AppName: string = "Lumen";
//! class Destination;
//! ```
//!
//! Calls are produced unresolved; run [`crate::resolve::resolve_module`] to
//! bind them. `//` starts a comment running to the end of the line.
use chumsky::prelude::*;
use uuid::Uuid;

use crate::{
    decl::{
        Annotation, Block, Declaration, DeclarationKind, LetStatement, Statement, ValueParameter,
        Visibility,
    },
    expr::{Argument, CalleeReference, Expression, FunctionCall, Literal, SourceSpan},
    module::Module,
    name::FqName,
    types::Type,
    utils::{Error, ParseError},
};

type Extra<'src> = extra::Err<Rich<'src, char>>;

fn source_span(span: SimpleSpan) -> SourceSpan {
    SourceSpan::new(span.start, span.end)
}

/// Whitespace and comments, possibly empty.
pub fn trivia<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    let comment = just("//").then(none_of("\n").repeated()).ignored();
    let space = any().filter(|c: &char| c.is_whitespace()).ignored();
    choice((comment, space)).repeated().ignored()
}

/// At least one whitespace character, used after keywords.
pub fn whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored()
        .then_ignore(trivia())
        .labelled("whitespace")
}

pub fn fq_name_parser<'src>() -> impl Parser<'src, &'src str, FqName, Extra<'src>> + Clone {
    text::ident()
        .separated_by(just('.'))
        .at_least(1)
        .collect::<Vec<&str>>()
        .map(FqName::from_segments)
        .labelled("qualified name")
}

pub fn type_parser<'src>() -> impl Parser<'src, &'src str, Type, Extra<'src>> + Clone {
    fq_name_parser().map(Type::from_name).labelled("type")
}

pub fn string_parser<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('"'),
        just('n').to('\n'),
        just('t').to('\t'),
    )));

    none_of("\\\"")
        .or(escape)
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
        .labelled("string literal")
}

pub fn int_parser<'src>() -> impl Parser<'src, &'src str, i64, Extra<'src>> + Clone {
    just('-')
        .or_not()
        .then(text::int(10))
        .to_slice()
        .try_map(|digits: &str, span| {
            digits.parse::<i64>().map_err(|e| {
                Rich::custom(span, format!("invalid integer literal `{}`: {}", digits, e))
            })
        })
        .labelled("integer literal")
}

/// String and integer literals. `true`, `false` and `unit` are recognized by
/// [`expression_parser`] since they lex as identifiers.
pub fn literal_parser<'src>() -> impl Parser<'src, &'src str, Literal, Extra<'src>> + Clone {
    choice((
        string_parser().map(Literal::String),
        int_parser().map(Literal::Int),
    ))
    .labelled("literal")
}

pub fn expression_parser<'src>() -> impl Parser<'src, &'src str, Expression, Extra<'src>> + Clone
{
    recursive(|expr| {
        let arguments = just('(')
            .ignore_then(trivia())
            .ignore_then(
                expr.padded_by(trivia())
                    .separated_by(just(','))
                    .allow_trailing()
                    .collect::<Vec<Expression>>(),
            )
            .then_ignore(trivia())
            .then_ignore(just(')'))
            .labelled("call arguments");

        let path_or_call = fq_name_parser()
            .then(trivia().ignore_then(arguments).or_not())
            .try_map(|(name, arguments), span: SimpleSpan| match arguments {
                Some(arguments) => Ok(Expression::Call(FunctionCall {
                    callee: CalleeReference::Unresolved(name),
                    arguments: arguments.into_iter().map(Argument::unmapped).collect(),
                    ty: None,
                    source: Some(source_span(span)),
                })),
                None if name.len() == 1 => Ok(match name.short_name().unwrap_or_default() {
                    "true" => Expression::Literal(Literal::Bool(true)),
                    "false" => Expression::Literal(Literal::Bool(false)),
                    "unit" => Expression::Literal(Literal::Unit),
                    local => Expression::Reference(local.to_string()),
                }),
                None => Err(Rich::custom(
                    span,
                    format!("qualified name `{}` cannot be used as a value", name),
                )),
            });

        choice((literal_parser().map(Expression::Literal), path_or_call)).labelled("expression")
    })
}

pub fn statement_parser<'src>() -> impl Parser<'src, &'src str, Statement, Extra<'src>> + Clone {
    let let_statement = just("let")
        .ignore_then(whitespace())
        .ignore_then(text::ident())
        .then_ignore(just(':').padded_by(trivia()))
        .then(type_parser())
        .then_ignore(just('=').padded_by(trivia()))
        .then(expression_parser())
        .then_ignore(trivia())
        .then_ignore(just(';'))
        .map(|((name, ty), value): ((&str, Type), Expression)| {
            Statement::Let(LetStatement {
                name: name.to_string(),
                ty,
                value,
            })
        })
        .labelled("let statement");

    let return_statement = just("return")
        .ignore_then(whitespace().ignore_then(expression_parser()).or_not())
        .then_ignore(trivia())
        .then_ignore(just(';'))
        .map(Statement::Return)
        .labelled("return statement");

    let expression_statement = expression_parser()
        .then_ignore(trivia())
        .then_ignore(just(';'))
        .map(Statement::Expr)
        .labelled("expression statement");

    choice((let_statement, return_statement, expression_statement)).labelled("statement")
}

pub fn block_parser<'src>() -> impl Parser<'src, &'src str, Block, Extra<'src>> + Clone {
    just('{')
        .ignore_then(
            statement_parser()
                .padded_by(trivia())
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(trivia())
        .then_ignore(just('}'))
        .map(Block::new)
        .labelled("block")
}

pub fn annotation_parser<'src>() -> impl Parser<'src, &'src str, Annotation, Extra<'src>> + Clone
{
    let arguments = just('(')
        .ignore_then(
            choice((
                literal_parser(),
                just("true").to(Literal::Bool(true)),
                just("false").to(Literal::Bool(false)),
            ))
            .padded_by(trivia())
            .separated_by(just(','))
            .allow_trailing()
            .collect::<Vec<_>>(),
        )
        .then_ignore(just(')'));

    just('@')
        .ignore_then(fq_name_parser())
        .then(arguments.or_not())
        .map(|(name, arguments)| Annotation {
            name,
            arguments: arguments.unwrap_or_default(),
        })
        .labelled("annotation")
}

pub fn visibility_parser<'src>() -> impl Parser<'src, &'src str, Visibility, Extra<'src>> + Clone
{
    choice((
        just("public").to(Visibility::Public),
        just("internal").to(Visibility::Internal),
        just("private").to(Visibility::Private),
    ))
    .then_ignore(whitespace())
    .labelled("visibility")
}

/// Everything of a declaration after its annotations and visibility.
struct DeclarationTail {
    kind: DeclarationKind,
    name: String,
    params: Vec<ValueParameter>,
    return_type: Type,
    body: Option<Block>,
    initializer: Option<Expression>,
}

fn function_tail<'src>() -> impl Parser<'src, &'src str, DeclarationTail, Extra<'src>> + Clone {
    let param = text::ident()
        .then_ignore(just(':').padded_by(trivia()))
        .then(type_parser())
        .map(|(name, ty): (&str, Type)| ValueParameter::new(name, ty))
        .labelled("parameter");

    let params = just('(')
        .ignore_then(trivia())
        .ignore_then(
            param
                .padded_by(trivia())
                .separated_by(just(','))
                .allow_trailing()
                .collect::<Vec<_>>(),
        )
        .then_ignore(trivia())
        .then_ignore(just(')'))
        .labelled("parameters");

    let return_type = just(':')
        .padded_by(trivia())
        .ignore_then(type_parser())
        .or_not()
        .map(|ty| ty.unwrap_or(Type::Unit));

    just("fun")
        .ignore_then(whitespace())
        .ignore_then(text::ident())
        .then_ignore(trivia())
        .then(params)
        .then(return_type)
        .then_ignore(trivia())
        .then(choice((block_parser().map(Some), just(';').to(None))))
        .map(|(((name, params), return_type), body)| DeclarationTail {
            kind: DeclarationKind::Function,
            name: name.to_string(),
            params,
            return_type,
            body,
            initializer: None,
        })
}

fn property_tail<'src>() -> impl Parser<'src, &'src str, DeclarationTail, Extra<'src>> + Clone {
    just("val")
        .ignore_then(whitespace())
        .ignore_then(text::ident())
        .then_ignore(just(':').padded_by(trivia()))
        .then(type_parser())
        .then(
            just('=')
                .padded_by(trivia())
                .ignore_then(expression_parser())
                .or_not(),
        )
        .then_ignore(trivia())
        .then_ignore(just(';'))
        .map(|((name, return_type), initializer)| DeclarationTail {
            kind: DeclarationKind::Property,
            name: name.to_string(),
            params: Vec::new(),
            return_type,
            body: None,
            initializer,
        })
}

fn class_tail<'src>() -> impl Parser<'src, &'src str, DeclarationTail, Extra<'src>> + Clone {
    just("class")
        .ignore_then(whitespace())
        .ignore_then(text::ident())
        .then_ignore(trivia())
        .then_ignore(just(';'))
        .map(|name: &str| DeclarationTail {
            kind: DeclarationKind::Class,
            name: name.to_string(),
            params: Vec::new(),
            return_type: Type::Unit,
            body: None,
            initializer: None,
        })
}

pub fn declaration_parser<'src>()
-> impl Parser<'src, &'src str, Declaration, Extra<'src>> + Clone {
    annotation_parser()
        .then_ignore(trivia())
        .repeated()
        .collect::<Vec<_>>()
        .then(visibility_parser().or_not())
        .then(choice((function_tail(), property_tail(), class_tail())))
        .map_with(|((annotations, visibility), tail), e| {
            let span: SimpleSpan = e.span();
            Declaration {
                uuid: Uuid::new_v4(),
                name: tail.name,
                kind: tail.kind,
                annotations,
                params: tail.params,
                return_type: tail.return_type,
                body: tail.body,
                initializer: tail.initializer,
                visibility: visibility.unwrap_or_default(),
                source: Some(source_span(span)),
            }
        })
        .labelled("declaration")
}

pub fn module_parser<'src>() -> impl Parser<'src, &'src str, Module, Extra<'src>> {
    let package = just("package")
        .ignore_then(whitespace())
        .ignore_then(fq_name_parser())
        .then_ignore(trivia())
        .labelled("package directive");

    let import = just("import")
        .ignore_then(whitespace())
        .ignore_then(fq_name_parser())
        .then_ignore(trivia())
        .labelled("import directive");

    trivia()
        .ignore_then(package.or_not())
        .then(import.repeated().collect::<Vec<_>>())
        .then(
            declaration_parser()
                .then_ignore(trivia())
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
        .map(|((package, imports), declarations)| {
            let mut module = Module::new(package.unwrap_or_default());
            module.imports = imports;
            module.declarations = declarations;
            module
        })
}

/// Parse a whole source file into a new module.
pub fn parse_module(source: &str, filename: Option<&str>) -> Result<Module, Error> {
    let mut module = module_parser()
        .parse(source)
        .into_result()
        .map_err(|errors| Error::ParserErrors {
            file: filename.map(str::to_string),
            errors: errors
                .into_iter()
                .map(|error| ParseError {
                    message: error.to_string(),
                    start: error.span().start,
                    end: error.span().end,
                })
                .collect(),
        })?;

    module.filename = filename.map(str::to_string);
    Ok(module)
}
