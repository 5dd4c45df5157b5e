//! Screen lifecycle instrumentation.
//!
//! Every function marked `@lumen.ui.Composable` whose name ends with
//! `Screen` gets a call to `lumen.lifecycle.ScreenLifecycleEffect` with its
//! own name inserted as the first statement of its body:
//!
//! ```text
//! @Composable                            @Composable
//! fun LoginScreen() {           ==>      fun LoginScreen() {
//!     Title("Login");                        lumen.lifecycle.ScreenLifecycleEffect("LoginScreen");
//! }                                          Title("Login");
//!                                        }
//! ```
//!
//! The work is split between [`matcher`] (which declarations),
//! [`resolver`] (which function to call), [`synth`] (the call statement) and
//! [`rewrite`] (the new body), sequenced by [`transformer`].
use semver::{Comparator, Op, Prerelease, Version, VersionReq};
use uuid::Uuid;

use crate::{
    base::ext::{CompilerPluginRegistrar, ExtensionStorage, PluginExt, PluginExtStatic},
    config::CompilerConfiguration,
    magic::{
        LUMEN_SCREEN_LIFECYCLE_NAME_EXT, LUMEN_SCREEN_LIFECYCLE_UUID_EXT,
        SCREEN_LIFECYCLE_MIN_FRONTEND,
    },
    register_plugin,
    utils::error::LmResult,
};

pub mod matcher;
pub mod resolver;
pub mod rewrite;
pub mod synth;
pub mod transformer;

use transformer::ScreenLifecycleTransformer;

pub struct ScreenLifecyclePlugin {
    version: Version,
}

impl PluginExt for ScreenLifecyclePlugin {
    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn version(&self) -> &Version {
        &self.version
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Inserts a lifecycle effect call at the top of every composable screen"
    }
}

impl PluginExtStatic for ScreenLifecyclePlugin {
    const UUID: Uuid = LUMEN_SCREEN_LIFECYCLE_UUID_EXT;
    const NAME: &'static str = LUMEN_SCREEN_LIFECYCLE_NAME_EXT;

    fn new() -> Self {
        Self {
            version: Version::new(
                env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
                env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
                env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
            ),
        }
    }
}

impl CompilerPluginRegistrar for ScreenLifecyclePlugin {
    fn supported_frontend(&self) -> VersionReq {
        VersionReq {
            comparators: vec![Comparator {
                op: Op::GreaterEq,
                major: SCREEN_LIFECYCLE_MIN_FRONTEND.0,
                minor: Some(SCREEN_LIFECYCLE_MIN_FRONTEND.1),
                patch: Some(SCREEN_LIFECYCLE_MIN_FRONTEND.2),
                pre: Prerelease::EMPTY,
            }],
        }
    }

    fn register_extensions(
        &self,
        storage: &mut ExtensionStorage,
        _configuration: &CompilerConfiguration,
    ) -> LmResult<()> {
        storage.register_declaration_transformer(
            ScreenLifecycleTransformer::NAME,
            Box::new(|_| Box::new(ScreenLifecycleTransformer::new())),
        );
        Ok(())
    }
}

register_plugin!(ScreenLifecyclePlugin);
