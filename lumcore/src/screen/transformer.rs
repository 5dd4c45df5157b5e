use lumir::decl::{Block, Declaration};

use crate::{
    lumdebug, lumtrace,
    screen::{
        matcher::ScreenMatcher, resolver::LifecycleEffectResolver, rewrite::prepend_statement,
        synth::synthesize_lifecycle_call,
    },
    session::{DeclarationTransformer, TransformContext, TransformOutcome},
    utils::error::LmResult,
};

/// Inserts `ScreenLifecycleEffect("<name>")` at the top of every matched
/// screen function.
///
/// One transformer is created per compilation session; its resolver cache
/// lives exactly as long.
#[derive(Debug, Default)]
pub struct ScreenLifecycleTransformer {
    matcher: ScreenMatcher,
    resolver: LifecycleEffectResolver,
}

impl ScreenLifecycleTransformer {
    pub const NAME: &'static str = "screen-lifecycle";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolver(&self) -> &LifecycleEffectResolver {
        &self.resolver
    }
}

impl DeclarationTransformer for ScreenLifecycleTransformer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(
        &self,
        context: &TransformContext<'_>,
        declaration: &Declaration,
        replace_body: &mut dyn FnMut(Block),
    ) -> LmResult<TransformOutcome> {
        if !self.matcher.matches(declaration) {
            return Ok(TransformOutcome::Skipped);
        }

        let symbol = self.resolver.resolve(context.symbols)?;
        lumtrace!(
            context.instance,
            "Lifecycle effect bound to {} ({})",
            symbol.signature(),
            symbol.id
        );

        let statement = synthesize_lifecycle_call(symbol, &declaration.name)?;
        replace_body(prepend_statement(declaration.body.as_ref(), statement));

        lumdebug!(
            context.instance,
            "Instrumented screen `{}`",
            declaration.name
        );
        Ok(TransformOutcome::Transformed)
    }
}
