use lumir::{
    decl::{DeclarationKind, Statement, Visibility},
    expr::{CalleeReference, Expression, Literal},
    name::FqName,
    parser::parse_module,
    types::Type,
};

const SCREENS_SOURCE: &str = r#"
package app.screens

import lumen.ui.Composable
import lumen.lifecycle.ScreenLifecycleEffect

// Entry point of the home flow.
@Composable
fun HomeScreen(title: string, count: int): unit {
    let heading: string = title;
    ScreenTitle(heading);
    return;
}

@Composable
private fun SettingsScreen() {
    ScreenTitle("Settings \"beta\"");
}

fun ScreenTitle(text: string);

internal val AppName: string = "Lumen";
class Destination;
"#;

#[test]
fn parses_package_imports_and_declarations() {
    let module = parse_module(SCREENS_SOURCE, Some("screens.lm")).expect("parse should succeed");

    assert_eq!(module.package, FqName::parse("app.screens"));
    assert_eq!(module.filename.as_deref(), Some("screens.lm"));
    assert_eq!(
        module.imports,
        vec![
            FqName::parse("lumen.ui.Composable"),
            FqName::parse("lumen.lifecycle.ScreenLifecycleEffect"),
        ]
    );

    let kinds: Vec<_> = module.declarations.iter().map(|decl| decl.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DeclarationKind::Function,
            DeclarationKind::Function,
            DeclarationKind::Function,
            DeclarationKind::Property,
            DeclarationKind::Class,
        ]
    );
}

#[test]
fn function_shape_is_preserved() {
    let module = parse_module(SCREENS_SOURCE, None).unwrap();

    let home = module.declaration_by_name("HomeScreen").unwrap();
    assert_eq!(home.annotations.len(), 1);
    assert_eq!(home.annotations[0].name, FqName::parse("Composable"));
    assert_eq!(home.params.len(), 2);
    assert_eq!(home.params[1].ty, Type::Int);
    assert_eq!(home.return_type, Type::Unit);
    assert_eq!(home.statements().len(), 3);
    assert!(home.statements()[0].is_let());
    assert_eq!(home.statements()[2], Statement::Return(None));

    let settings = module.declaration_by_name("SettingsScreen").unwrap();
    assert_eq!(settings.visibility, Visibility::Private);
    assert_eq!(settings.return_type, Type::Unit, "missing return type defaults to unit");
    let Some(Expression::Call(call)) = settings.statements()[0].expression() else {
        panic!("expected a call statement");
    };
    assert_eq!(
        call.callee,
        CalleeReference::Unresolved(FqName::parse("ScreenTitle"))
    );
    assert_eq!(
        call.arguments[0].value,
        Expression::Literal(Literal::String("Settings \"beta\"".to_string()))
    );

    let title = module.declaration_by_name("ScreenTitle").unwrap();
    assert!(title.body.is_none(), "`;` declares a function without body");

    let app_name = module.declaration_by_name("AppName").unwrap();
    assert_eq!(app_name.visibility, Visibility::Internal);
    assert_eq!(
        app_name.initializer,
        Some(Expression::Literal(Literal::String("Lumen".to_string())))
    );
}

#[test]
fn declarations_get_distinct_identities() {
    let module = parse_module(SCREENS_SOURCE, None).unwrap();
    let mut uuids: Vec<_> = module.declarations.iter().map(|decl| decl.uuid).collect();
    uuids.sort();
    uuids.dedup();
    assert_eq!(uuids.len(), module.declarations.len());
}

#[test]
fn printed_module_parses_back_identically() {
    let module = parse_module(SCREENS_SOURCE, None).unwrap();
    let printed = module.to_string();

    let reparsed = parse_module(&printed, None).expect("printed module should parse");
    assert_eq!(reparsed.to_string(), printed);
    assert_eq!(reparsed.declarations.len(), module.declarations.len());
}

#[test]
fn syntax_errors_are_reported_with_the_file_name() {
    let err = parse_module("fun Broken(: unit {", Some("broken.lm")).unwrap_err();
    match err {
        lumir::utils::Error::ParserErrors { file, errors } => {
            assert_eq!(file.as_deref(), Some("broken.lm"));
            assert!(!errors.is_empty());
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn qualified_name_is_not_a_value() {
    assert!(parse_module("fun F() { let x: int = a.b; }", None).is_err());
}
