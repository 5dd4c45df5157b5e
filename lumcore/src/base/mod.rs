use parking_lot::RwLock;
use semver::Version;

use crate::{
    base::ext::PluginLibrary,
    ext::log::{LogCallback, LogCreateInfoEXT, LogLevelEXT, forward_to_log},
    luminfo, lumtrace,
    utils::error::LmResult,
};

pub mod api;
pub mod ext;
pub mod meta;

build_info::build_info!(fn retrieve_build_info);

/// Instance-wide extension state.
pub struct InstanceExt {
    pub log_callback: RwLock<LogCallback>,
    log_level: RwLock<LogLevelEXT>,
}

impl InstanceExt {
    fn new(log_create_info: Option<Box<LogCreateInfoEXT>>) -> Self {
        match log_create_info {
            Some(info) => {
                let LogCreateInfoEXT { level, callback } = *info;
                Self {
                    log_callback: RwLock::new(callback),
                    log_level: RwLock::new(level),
                }
            }
            None => Self {
                log_callback: RwLock::new(Box::new(forward_to_log)),
                log_level: RwLock::new(LogLevelEXT::Trace),
            },
        }
    }

    /// Minimum level of the messages handed to the log callback.
    pub fn log_level(&self) -> LogLevelEXT {
        *self.log_level.read()
    }

    pub fn set_log_level(&self, level: LogLevelEXT) {
        *self.log_level.write() = level;
    }
}

/// Internal instance context.
pub struct InstanceContext {
    /// Version of the instance context.
    pub version: Version,

    /// Information about the application that created this instance.
    pub application_name: String,
    pub application_version: Version,
    pub engine_version: Version,
    pub engine_name: Option<String>,

    /// Compiler plugins available to compilations run on this instance.
    pub plugins: RwLock<PluginLibrary>,

    pub ext: InstanceExt,
}

impl InstanceContext {
    pub fn create(mut instance_create_info: api::InstanceCreateInfo) -> LmResult<Self> {
        let application_info = &instance_create_info.application_info;
        let application_name = application_info.application_name.clone();
        let application_version = application_info.application_version.into();
        let engine_version = application_info.engine_version.into();
        let engine_name = Some(application_info.engine_name.clone()).filter(|n| !n.is_empty());

        // Retrieve build info for the current crate.
        let build_info = retrieve_build_info();

        let ext = InstanceExt::new(instance_create_info.ext.take::<LogCreateInfoEXT>());

        let plugins = if instance_create_info.enabled_extensions.is_empty() {
            PluginLibrary::with_registered_plugins()?
        } else {
            let mut library = PluginLibrary::default();
            for name in &instance_create_info.enabled_extensions {
                library.add_plugin_by_name(name)?;
            }
            library
        };

        let instance = InstanceContext {
            version: build_info.crate_info.version.clone(),
            application_name,
            application_version,
            engine_version,
            engine_name,
            plugins: RwLock::new(plugins),
            ext,
        };

        luminfo!(
            &instance,
            "Created instance for {} {} (lumcore {})",
            instance.application_name,
            instance.application_version,
            instance.version
        );
        for plugin in instance.plugins.read().iter() {
            lumtrace!(
                &instance,
                "Plugin {} ({}) v{} enabled",
                plugin.name(),
                plugin.uuid(),
                plugin.version()
            );
        }

        Ok(instance)
    }

    /// Replace the log callback of this instance.
    pub fn set_log_callback(&self, callback: LogCallback) {
        *self.ext.log_callback.write() = callback;
    }
}
