//! Fixtures shared by the unit and integration tests.
use lumir::{
    decl::ValueParameter,
    name::FqName,
    symbol::{FunctionSymbol, SymbolCandidates, SymbolId, SymbolTable},
    types::Type,
};
use uuid::Uuid;

use crate::{
    base::{
        InstanceContext,
        api::{ApplicationInfo, InstanceCreateInfo, ModuleCompileInfo, ModuleSourceInfo, VersionInfo},
        ext::{CompilerPluginRegistrar, PluginExtStatic, PluginLibrary},
    },
    ext::log::{LogCreateInfoEXT, LogLevelEXT, LogMessageEXT},
    magic::{LIFECYCLE_EFFECT_NAME, LIFECYCLE_EFFECT_PACKAGE},
    screen::ScreenLifecyclePlugin,
    utils::conf::ExtList,
};

/// Front-end version accepted by the screen lifecycle plugin.
pub const SUPPORTED_FRONTEND: VersionInfo = VersionInfo::new(2, 1, 0);

/// Front-end version rejected by the screen lifecycle plugin.
pub const LEGACY_FRONTEND: VersionInfo = VersionInfo::new(1, 9, 24);

/// Library declaring the instrumentation function.
pub const LIFECYCLE_LIBRARY_SOURCE: &str = r#"
package lumen.lifecycle

fun ScreenLifecycleEffect(screenName: string): unit;
"#;

/// Library declaring the marker and a few UI helpers.
pub const UI_LIBRARY_SOURCE: &str = r#"
package lumen.ui

class Composable;
fun Text(value: string);
fun Button(label: string, enabled: bool);
"#;

/// Login flow: one screen, one helper that must stay untouched.
pub const LOGIN_SOURCE: &str = r#"
package app.login

import lumen.ui.Composable
import lumen.ui.Text
import lumen.ui.Button

@Composable
fun LoginScreen(user: string) {
    Text(user);
    Button("Sign in", true);
}

@Composable
fun ScreenTitle() {
    Text("Welcome");
}

fun ProfileScreen() {
    Text("Profile");
}
"#;

/// Symbol table answering from a fixed list of symbols.
#[derive(Debug, Default, Clone)]
pub struct FakeSymbolTable {
    symbols: Vec<FunctionSymbol>,
}

impl FakeSymbolTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(symbols: impl IntoIterator<Item = FunctionSymbol>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }
}

impl SymbolTable for FakeSymbolTable {
    fn top_level_functions(&self, package: &FqName, name: &str) -> SymbolCandidates {
        self.symbols
            .iter()
            .filter(|symbol| &symbol.package == package && symbol.name == name)
            .cloned()
            .collect()
    }
}

/// A `lumen.lifecycle.ScreenLifecycleEffect` symbol with the given signature.
pub fn lifecycle_symbol_with(params: Vec<ValueParameter>, return_type: Type) -> FunctionSymbol {
    FunctionSymbol {
        id: SymbolId(Uuid::new_v4()),
        package: FqName::parse(LIFECYCLE_EFFECT_PACKAGE),
        name: LIFECYCLE_EFFECT_NAME.to_string(),
        params,
        return_type,
        module: Uuid::new_v4(),
    }
}

/// A `lumen.lifecycle.ScreenLifecycleEffect(screenName: string): unit` symbol.
pub fn lifecycle_symbol() -> FunctionSymbol {
    lifecycle_symbol_with(
        vec![ValueParameter::new("screenName", Type::String)],
        Type::Unit,
    )
}

/// Instance with only the screen lifecycle plugin enabled, logging nothing.
pub fn test_instance() -> InstanceContext {
    test_instance_with_plugins(vec![Box::new(ScreenLifecyclePlugin::new())])
}

/// Instance running exactly `plugins`, logging nothing.
pub fn test_instance_with_plugins(plugins: Vec<Box<dyn CompilerPluginRegistrar>>) -> InstanceContext {
    let instance = test_instance_with(Vec::new());

    let mut library = PluginLibrary::default();
    for plugin in plugins {
        if let Err(e) = library.add_plugin(plugin) {
            panic!("failed to add test plugin: {e}");
        }
    }
    *instance.plugins.write() = library;
    instance
}

/// Instance enabling the given registered plugins by name, logging nothing.
pub fn test_instance_with(enabled_extensions: Vec<String>) -> InstanceContext {
    let mut ext = ExtList::new();
    ext.push(LogCreateInfoEXT {
        level: LogLevelEXT::Error,
        callback: Box::new(|_: &InstanceContext, _: LogMessageEXT| {}),
    });

    let create_info = InstanceCreateInfo {
        application_info: ApplicationInfo {
            application_version: VersionInfo::new(0, 1, 0),
            application_name: "lumcore-tests".to_string(),
            engine_version: VersionInfo::new(0, 1, 1),
            engine_name: "lumen".to_string(),
        },
        enabled_extensions,
        ext,
    };

    match InstanceContext::create(create_info) {
        Ok(instance) => instance,
        Err(e) => panic!("failed to create test instance: {e}"),
    }
}

/// Compile info for `sources` against the two standard libraries.
pub fn compile_info(sources: &[(&str, &str)], language_version: VersionInfo) -> ModuleCompileInfo {
    ModuleCompileInfo {
        sources: sources
            .iter()
            .map(|&(filename, source)| ModuleSourceInfo::text(Some(filename), source))
            .collect(),
        dependencies: vec![
            ModuleSourceInfo::text(Some("lumen/lifecycle.lm"), LIFECYCLE_LIBRARY_SOURCE),
            ModuleSourceInfo::text(Some("lumen/ui.lm"), UI_LIBRARY_SOURCE),
        ],
        language_version,
    }
}
