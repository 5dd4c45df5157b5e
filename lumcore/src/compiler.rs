use std::sync::Arc;

use lumir::{
    module::Module,
    parser::parse_module,
    resolve::resolve_module,
    symbol::ModuleSymbolTable,
    utils::Error as IrError,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    base::{
        InstanceContext,
        api::{ModuleCompileInfo, ModuleSourceInfo, ModuleSourceType},
    },
    config::CompilerConfiguration,
    diagnostics::{CompilerMessage, CompilerMessageSourceLocation, MessageCollector},
    lumerror, lumtrace,
    session::CompilationSession,
    utils::error::{LmError, LmResult},
};

/// Output of [`compile_sources`]: the transformed and verified units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledUnit {
    pub filenames: Vec<String>,
    pub modules: Vec<Module>,
    /// Names of the declarations rewritten by the transformation phase.
    pub transformed: Vec<String>,
}

fn parse_source(
    instance: &InstanceContext,
    messages: &dyn MessageCollector,
    source_info: &ModuleSourceInfo,
) -> LmResult<Module> {
    lumtrace!(
        instance,
        "Compiling source \"{}\"",
        source_info.filename.as_deref().unwrap_or("<unnamed>")
    );

    match source_info.source_type {
        ModuleSourceType::Text => {
            parse_module(&source_info.data, source_info.filename.as_deref()).map_err(|e| {
                if let IrError::ParserErrors { file, errors } = &e {
                    for error in errors {
                        messages.report(CompilerMessage::error(error.message.clone()).with_location(
                            Some(CompilerMessageSourceLocation {
                                file: file.clone(),
                                start: error.start,
                                end: error.end,
                            }),
                        ));
                    }
                }
                lumerror!(instance, "{}", e);
                LmError::from(e)
            })
        }
    }
}

/// Report a phase error that is not tied to a source position.
fn report(instance: &InstanceContext, messages: &dyn MessageCollector, error: LmError) -> LmError {
    lumerror!(instance, "{}", error);
    messages.report(CompilerMessage::error(error.to_string()));
    error
}

/// Compile a set of units against their dependencies.
///
/// 1) Every unit and dependency is parsed.
/// 2) Units are resolved against the symbols of all modules.
/// 3) The transformation phase runs the enabled plugins over the units.
/// 4) Transformed units are verified.
///
/// Every failure is reported to `messages` once before being returned.
pub fn compile_sources(
    instance: &InstanceContext,
    compile_info: ModuleCompileInfo,
    messages: Arc<dyn MessageCollector>,
) -> LmResult<CompiledUnit> {
    let mut modules = Vec::with_capacity(compile_info.sources.len());
    let mut filenames = Vec::new();
    for source_info in &compile_info.sources {
        if let Some(filename) = &source_info.filename {
            filenames.push(filename.clone());
        }
        modules.push(parse_source(instance, &*messages, source_info)?);
    }

    let mut dependencies = Vec::with_capacity(compile_info.dependencies.len());
    for source_info in &compile_info.dependencies {
        dependencies.push(parse_source(instance, &*messages, source_info)?);
    }

    let symbols = ModuleSymbolTable::from_modules(dependencies.iter().chain(modules.iter()));
    lumtrace!(instance, "Symbol table holds {} function(s)", symbols.len());

    for module in modules.iter_mut() {
        resolve_module(module, &symbols).map_err(|e| report(instance, &*messages, e.into()))?;
    }

    let configuration =
        CompilerConfiguration::new(compile_info.language_version.into(), messages.clone());
    let plugins = instance.plugins.read();
    let mut session = CompilationSession::open(instance, configuration, &plugins);

    let mut transformed = Vec::new();
    for module in modules.iter_mut() {
        let unit_report = session.transform_unit(module, &symbols)?;
        transformed.extend(unit_report.transformed);
    }

    for module in &modules {
        module
            .verify()
            .map_err(|e| report(instance, &*messages, e.into()))?;
    }

    info!(
        "Compiled {} unit(s), {} declaration(s) transformed: {:?}",
        modules.len(),
        transformed.len(),
        transformed
    );

    Ok(CompiledUnit {
        filenames,
        modules,
        transformed,
    })
}
