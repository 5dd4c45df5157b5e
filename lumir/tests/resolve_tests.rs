use lumir::{
    expr::{CalleeReference, Expression},
    module::Module,
    name::FqName,
    parser::parse_module,
    resolve::resolve_module,
    symbol::{ModuleSymbolTable, SymbolId, SymbolTable},
    types::Type,
    utils::Error,
};

const LIBRARY_SOURCE: &str = r#"
package lumen.lifecycle

fun ScreenLifecycleEffect(screenName: string): unit;
fun Describe(count: int): string;
"#;

fn parse(source: &str) -> Module {
    parse_module(source, None).expect("failed to parse sample module")
}

fn resolve(source: &str) -> Result<(Module, Module), Error> {
    let library = parse(LIBRARY_SOURCE);
    let mut module = parse(source);
    let symbols = ModuleSymbolTable::from_modules([&library, &module]);
    resolve_module(&mut module, &symbols)?;
    Ok((library, module))
}

#[test]
fn imported_calls_bind_to_the_library_symbol() {
    let (library, module) = resolve(
        r#"
        package app
        import lumen.lifecycle.ScreenLifecycleEffect
        import lumen.ui.Composable

        @Composable
        fun HomeScreen() {
            ScreenLifecycleEffect("HomeScreen");
        }
        "#,
    )
    .unwrap();

    let home = module.declaration_by_name("HomeScreen").unwrap();
    assert_eq!(home.annotations[0].name, FqName::parse("lumen.ui.Composable"));

    let Some(Expression::Call(call)) = home.statements()[0].expression() else {
        panic!("expected a call");
    };
    let CalleeReference::Resolved(reference) = &call.callee else {
        panic!("call should be resolved");
    };
    let effect = library.declaration_by_name("ScreenLifecycleEffect").unwrap();
    assert_eq!(reference.symbol, SymbolId(effect.uuid));
    assert_eq!(
        reference.name,
        FqName::parse("lumen.lifecycle.ScreenLifecycleEffect")
    );
    assert_eq!(call.ty, Some(Type::Unit));
    assert_eq!(call.arguments[0].parameter.as_ref().unwrap().name, "screenName");

    module.verify().expect("resolved module should verify");
}

#[test]
fn same_package_and_nested_calls_resolve() {
    let (_, module) = resolve(
        r#"
        package lumen.lifecycle
        fun Show(count: int) {
            let label: string = Describe(count);
            ScreenLifecycleEffect(Describe(3));
        }
        "#,
    )
    .unwrap();
    module.verify().unwrap();
}

#[test]
fn missing_function_is_reported() {
    let err = resolve("fun F() { Nowhere(); }").unwrap_err();
    assert!(err.is_unresolved_function());
}

#[test]
fn argument_type_mismatch_is_reported() {
    let err = resolve(
        r#"
        import lumen.lifecycle.ScreenLifecycleEffect
        fun F() { ScreenLifecycleEffect(3); }
        "#,
    )
    .unwrap_err();
    assert!(err.is_argument_type_mismatch(), "{err}");
}

#[test]
fn argument_count_mismatch_is_reported() {
    let err = resolve(
        r#"
        import lumen.lifecycle.ScreenLifecycleEffect
        fun F() { ScreenLifecycleEffect(); }
        "#,
    )
    .unwrap_err();
    assert!(err.is_argument_count_mismatch(), "{err}");
}

#[test]
fn overloads_are_picked_by_argument_types() {
    let mut module = parse(
        r#"
        package ui
        fun Log(value: string);
        fun Log(value: int);
        fun Main() { Log(1); Log("one"); }
        "#,
    );
    let symbols = ModuleSymbolTable::from_modules([&module]);
    assert_eq!(
        symbols
            .top_level_functions(&FqName::parse("ui"), "Log")
            .len(),
        2
    );
    resolve_module(&mut module, &symbols).unwrap();
    module.verify().unwrap();
}

#[test]
fn identical_overloads_are_ambiguous() {
    let mut module = parse(
        r#"
        fun Log(value: string);
        fun Log(value: string);
        fun Main() { Log("one"); }
        "#,
    );
    let symbols = ModuleSymbolTable::from_modules([&module]);
    let err = resolve_module(&mut module, &symbols).unwrap_err();
    assert_eq!(
        err,
        Error::AmbiguousFunction {
            function: "Main".to_string(),
            callee: FqName::parse("Log"),
            candidates: 2,
        }
    );
}

#[test]
fn resolving_twice_is_a_no_op() {
    let (library, mut module) = resolve(
        r#"
        import lumen.lifecycle.ScreenLifecycleEffect
        fun F() { ScreenLifecycleEffect("F"); }
        "#,
    )
    .unwrap();
    let before = module.clone();
    let symbols = ModuleSymbolTable::from_modules([&library]);
    resolve_module(&mut module, &symbols).unwrap();
    assert_eq!(module, before);
}

#[test]
fn unresolved_module_does_not_verify() {
    let module = parse("fun F() { G(); }");
    assert!(module.verify().unwrap_err().is_unresolved_callee());
}

#[test]
fn undefined_local_is_reported() {
    let err = resolve(
        r#"
        import lumen.lifecycle.ScreenLifecycleEffect
        fun F() { ScreenLifecycleEffect(missing); }
        "#,
    )
    .unwrap_err();
    assert!(err.is_undefined_reference());
}
