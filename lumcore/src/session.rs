//! Compilation sessions.
//!
//! A [`CompilationSession`] runs the declaration transformers contributed by
//! the enabled plugins over the units of one compilation. It is the only
//! place reporting transformation failures to the message collector, so a
//! failing compilation carries exactly one error from this phase.
//!
//! Replacements are staged while a unit is scanned and committed once every
//! declaration of the unit has been processed: a unit is either fully
//! transformed or left untouched.
use std::{borrow::Cow, collections::BTreeSet};

use lumir::{
    decl::{Block, Declaration},
    module::Module,
    symbol::SymbolTable,
};
use strum::EnumIs;
use uuid::Uuid;

use crate::{
    base::{
        InstanceContext,
        ext::{ExtensionStorage, PluginLibrary},
    },
    config::CompilerConfiguration,
    diagnostics::{CompilerMessage, CompilerMessageSourceLocation},
    lumdebug, lumerror, luminfo, lumtrace,
    utils::error::{LmError, LmResult},
};

/// What a transformer sees of the compilation while processing a declaration.
pub struct TransformContext<'a> {
    pub instance: &'a InstanceContext,
    /// Unit the declaration belongs to, as it was before the session
    /// started scanning it.
    pub module: &'a Module,
    pub symbols: &'a dyn SymbolTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
pub enum TransformOutcome {
    Transformed,
    Skipped,
}

/// Declaration-level transformation run during the transformation phase.
pub trait DeclarationTransformer: Send + Sync {
    fn name(&self) -> &str;

    /// Process one declaration.
    ///
    /// The declaration is read-only; a transformer changes it only by handing
    /// a new body to `replace_body`, at most once. Errors are fatal to the
    /// whole session.
    fn process(
        &self,
        context: &TransformContext<'_>,
        declaration: &Declaration,
        replace_body: &mut dyn FnMut(Block),
    ) -> LmResult<TransformOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
pub enum SessionState {
    /// Waiting for a unit.
    Idle,
    /// A unit is being scanned.
    Scanning,
    /// A fatal error was reported; nothing is transformed anymore.
    PreconditionFailed,
}

/// Result of transforming one unit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnitReport {
    /// Names of the transformed declarations, in source order.
    pub transformed: Vec<String>,
    /// Number of declarations left untouched.
    pub skipped: usize,
}

pub struct CompilationSession<'i> {
    instance: &'i InstanceContext,
    configuration: CompilerConfiguration,
    transformers: Vec<Box<dyn DeclarationTransformer>>,
    state: SessionState,
    transformed: BTreeSet<Uuid>,
}

struct StagedUnit {
    replacements: Vec<(usize, Block)>,
    skipped: usize,
}

impl<'i> CompilationSession<'i> {
    /// Open a session, running the registrar of every plugin of `plugins`.
    ///
    /// A plugin that does not support the front-end language version puts
    /// the session in [`SessionState::PreconditionFailed`] before any
    /// declaration is looked at.
    pub fn open(
        instance: &'i InstanceContext,
        configuration: CompilerConfiguration,
        plugins: &PluginLibrary,
    ) -> Self {
        let mut session = Self {
            instance,
            configuration,
            transformers: Vec::new(),
            state: SessionState::Idle,
            transformed: BTreeSet::new(),
        };

        let mut storage = ExtensionStorage::default();
        for plugin in plugins.iter() {
            let req = plugin.supported_frontend();
            let version = &session.configuration.frontend.language_version;
            if !req.matches(version) {
                let error = LmError::UnsupportedFrontend {
                    name: plugin.name().to_string(),
                    version: version.clone(),
                    req,
                };
                session.fail(&error, None);
                return session;
            }

            if let Err(error) = plugin.register_extensions(&mut storage, &session.configuration) {
                session.fail(&error, None);
                return session;
            }

            lumdebug!(
                instance,
                "Registered extensions of plugin {} v{}",
                plugin.name(),
                plugin.version()
            );
        }

        session.transformers = storage.create_transformers(&session.configuration);
        lumtrace!(
            instance,
            "Opened compilation session with {} transformer(s): {:?}",
            session.transformers.len(),
            storage.transformer_names().collect::<Vec<_>>()
        );
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn configuration(&self) -> &CompilerConfiguration {
        &self.configuration
    }

    /// Whether the declaration with this uuid was transformed by this session.
    pub fn is_transformed(&self, uuid: &Uuid) -> bool {
        self.transformed.contains(uuid)
    }

    pub fn transformed_count(&self) -> usize {
        self.transformed.len()
    }

    /// Run every transformer over every declaration of `module`.
    ///
    /// Declarations already transformed by this session are skipped. On a
    /// fatal error the error is reported once, the unit is left untouched and
    /// the session stops transforming.
    pub fn transform_unit(
        &mut self,
        module: &mut Module,
        symbols: &dyn SymbolTable,
    ) -> LmResult<UnitReport> {
        if self.state.is_precondition_failed() {
            return Err(LmError::SessionAborted);
        }

        self.state = SessionState::Scanning;
        let staged = match self.scan(module, symbols) {
            Ok(staged) => staged,
            Err((error, location)) => {
                self.fail(&error, location);
                return Err(error);
            }
        };

        let mut report = UnitReport {
            transformed: Vec::with_capacity(staged.replacements.len()),
            skipped: staged.skipped,
        };
        for (index, body) in staged.replacements {
            let declaration = &mut module.declarations[index];
            declaration.body = Some(body);
            self.transformed.insert(declaration.uuid);
            report.transformed.push(declaration.name.clone());
        }

        luminfo!(
            self.instance,
            "Unit `{}`: {} declaration(s) transformed, {} skipped",
            module.filename.as_deref().unwrap_or("<unnamed>"),
            report.transformed.len(),
            report.skipped
        );

        self.state = SessionState::Idle;
        Ok(report)
    }

    fn scan(
        &self,
        module: &Module,
        symbols: &dyn SymbolTable,
    ) -> Result<StagedUnit, (LmError, Option<CompilerMessageSourceLocation>)> {
        let context = TransformContext {
            instance: self.instance,
            module,
            symbols,
        };

        let mut staged = StagedUnit {
            replacements: Vec::new(),
            skipped: 0,
        };

        for (index, declaration) in module.declarations.iter().enumerate() {
            if self.transformed.contains(&declaration.uuid) {
                lumtrace!(
                    self.instance,
                    "Declaration `{}` already transformed, skipping",
                    declaration.name
                );
                staged.skipped += 1;
                continue;
            }

            let mut replacement: Option<Block> = None;
            for transformer in &self.transformers {
                let current = match &replacement {
                    Some(body) => Cow::Owned(Declaration {
                        body: Some(body.clone()),
                        ..declaration.clone()
                    }),
                    None => Cow::Borrowed(declaration),
                };

                let outcome = transformer
                    .process(&context, &current, &mut |body| replacement = Some(body))
                    .map_err(|error| (error, location_of(module, declaration)))?;

                lumtrace!(
                    self.instance,
                    "{} on `{}`: {:?}",
                    transformer.name(),
                    declaration.name,
                    outcome
                );
            }

            match replacement {
                Some(body) => staged.replacements.push((index, body)),
                None => staged.skipped += 1,
            }
        }

        Ok(staged)
    }

    fn fail(&mut self, error: &LmError, location: Option<CompilerMessageSourceLocation>) {
        lumerror!(self.instance, "{}", error);
        self.configuration
            .messages
            .report(CompilerMessage::error(error.to_string()).with_location(location));
        self.state = SessionState::PreconditionFailed;
    }
}

fn location_of(module: &Module, declaration: &Declaration) -> Option<CompilerMessageSourceLocation> {
    declaration
        .source
        .map(|span| CompilerMessageSourceLocation {
            file: module.filename.clone(),
            start: span.start,
            end: span.end,
        })
}
