use std::collections::BTreeMap;

use semver::{Version, VersionReq};
use uuid::Uuid;

use crate::{
    config::CompilerConfiguration,
    session::DeclarationTransformer,
    utils::error::{LmError, LmResult},
};

pub trait PluginExt: Send + Sync {
    fn uuid(&self) -> Uuid;

    fn version(&self) -> &Version;

    fn name(&self) -> &str;

    fn description(&self) -> &str;
}

pub trait PluginExtStatic: PluginExt {
    const UUID: Uuid;
    const NAME: &'static str;

    fn new() -> Self;
}

/// Entry point of a compiler plugin.
///
/// A registrar is asked once per compilation session to contribute its
/// extensions. Before that, the session checks [`Self::supported_frontend`]
/// against the language version of the front end; a registrar that does not
/// support it aborts the whole session.
pub trait CompilerPluginRegistrar: PluginExt {
    /// Front-end language versions this plugin can process.
    fn supported_frontend(&self) -> VersionReq;

    /// Register the extensions of this plugin for one compilation session.
    fn register_extensions(
        &self,
        storage: &mut ExtensionStorage,
        configuration: &CompilerConfiguration,
    ) -> LmResult<()>;
}

/// Inventory containing compiler plugin registrations.
pub struct PluginRegistry {
    pub uuid: Uuid,
    pub name: &'static str,
    pub loader: fn() -> LmResult<Box<dyn CompilerPluginRegistrar>>,
}
inventory::collect!(PluginRegistry);

/// Register a [`CompilerPluginRegistrar`] so that instances can enable it by
/// name or uuid.
#[macro_export]
macro_rules! register_plugin {
    (
        $plugin:ty
    ) => {
        $crate::inventory::submit! {
            $crate::base::ext::PluginRegistry {
                uuid: <$plugin as $crate::base::ext::PluginExtStatic>::UUID,
                name: <$plugin as $crate::base::ext::PluginExtStatic>::NAME,
                loader: || -> $crate::utils::error::LmResult<Box<dyn $crate::base::ext::CompilerPluginRegistrar>> {
                    let plugin = <$plugin as $crate::base::ext::PluginExtStatic>::new();
                    Ok(Box::new(plugin))
                },
            }
        }
    };
    () => {};
}

/// Library of the compiler plugins enabled on an instance.
///
/// Whereas [`PluginRegistry`] is static and global, the library is
/// instantiated per instance context, so that each instance only runs the
/// plugins it asked for. Plugins are kept in uuid order, which is the order
/// their registrars run in.
#[derive(Default)]
pub struct PluginLibrary {
    plugins: BTreeMap<Uuid, Box<dyn CompilerPluginRegistrar>>,
}

impl PluginLibrary {
    /// Library holding every plugin of the global registry.
    pub fn with_registered_plugins() -> LmResult<Self> {
        let mut library = Self::default();
        for registry in inventory::iter::<PluginRegistry> {
            library.add_plugin((registry.loader)()?)?;
        }
        Ok(library)
    }

    /// Adds a registered plugin to the library by its UUID.
    pub fn add_plugin_by_uuid(&mut self, uuid: Uuid) -> LmResult<()> {
        for registry in inventory::iter::<PluginRegistry> {
            if registry.uuid == uuid {
                let plugin = (registry.loader)()?;
                assert!(
                    plugin.uuid() == uuid,
                    "Loaded plugin UUID does not match the requested UUID"
                );
                return self.add_plugin(plugin);
            }
        }

        Err(LmError::KeyNotFound {
            key: uuid.to_string(),
            context: "plugin registry".to_string(),
        })
    }

    /// Adds a registered plugin to the library by its name.
    pub fn add_plugin_by_name(&mut self, name: &str) -> LmResult<()> {
        for registry in inventory::iter::<PluginRegistry> {
            if registry.name == name {
                return self.add_plugin((registry.loader)()?);
            }
        }

        Err(LmError::PluginNotFound(name.to_string()))
    }

    /// Adds a plugin that is not part of the global registry.
    pub fn add_plugin(&mut self, plugin: Box<dyn CompilerPluginRegistrar>) -> LmResult<()> {
        let uuid = plugin.uuid();
        if self.plugins.contains_key(&uuid) {
            return Err(LmError::DuplicatedKey {
                key: uuid.to_string(),
                context: "plugin library".to_string(),
            });
        }

        self.plugins.insert(uuid, plugin);
        Ok(())
    }

    pub fn get(&self, uuid: &Uuid) -> Option<&dyn CompilerPluginRegistrar> {
        self.plugins.get(uuid).map(|plugin| &**plugin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CompilerPluginRegistrar> {
        self.plugins.values().map(|plugin| &**plugin)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Creates the transformer of one compilation session.
pub type DeclarationTransformerFactory =
    Box<dyn Fn(&CompilerConfiguration) -> Box<dyn DeclarationTransformer> + Send + Sync>;

/// Extensions contributed by the registrars of a compilation session.
#[derive(Default)]
pub struct ExtensionStorage {
    transformers: Vec<(String, DeclarationTransformerFactory)>,
}

impl ExtensionStorage {
    /// Register a declaration transformer. Transformers run in registration
    /// order on every declaration.
    pub fn register_declaration_transformer(
        &mut self,
        name: impl Into<String>,
        factory: DeclarationTransformerFactory,
    ) {
        self.transformers.push((name.into(), factory));
    }

    pub fn transformer_names(&self) -> impl Iterator<Item = &str> {
        self.transformers.iter().map(|(name, _)| name.as_str())
    }

    /// Instantiate every registered transformer for a new session.
    pub fn create_transformers(
        &self,
        configuration: &CompilerConfiguration,
    ) -> Vec<Box<dyn DeclarationTransformer>> {
        self.transformers
            .iter()
            .map(|(_, factory)| factory(configuration))
            .collect()
    }
}
