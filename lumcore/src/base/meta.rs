use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    ext::log::LogLevelEXT,
    magic::ENV_META_CONFIG_PATH,
    utils::error::{LmError, LmResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetaInfo {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// Content of `meta.toml`.
///
/// ```toml
/// log_level = "debug"
///
/// [[plugins]]
/// name = "__EXT_lumen_screen_lifecycle"
/// enabled = true
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumenMetaInfo {
    #[serde(default)]
    pub log_level: LogLevelEXT,
    #[serde(default)]
    pub plugins: Vec<PluginMetaInfo>,
}

impl LumenMetaInfo {
    /// Get the default path to the Lumen configuration file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(config_path) = std::env::var(ENV_META_CONFIG_PATH) {
            return config_path.into();
        }

        // Fallback to default paths based on OS
        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push("lumen");
        path.push("meta.toml");
        path
    }

    /// Load the meta info from the default path, or the default meta info if
    /// there is no file there.
    pub fn load_default() -> LmResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from_toml(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load LumenMetaInfo from a TOML file.
    pub fn load_from_toml(path: &Path) -> LmResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| LmError::ManifestParseError {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Save LumenMetaInfo to a TOML file.
    pub fn save_to_toml(&self, path: &Path) -> LmResult<()> {
        let toml_str = toml::to_string(self).map_err(|e| {
            LmError::Unknown(format!(
                "Failed during serialization of TOML to path `{}`: {}",
                path.display(),
                e
            ))
        })?;

        // Attempt to create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Names of the enabled plugins. Empty means every registered plugin.
    pub fn enabled_plugins(&self) -> Vec<String> {
        self.plugins
            .iter()
            .filter(|plugin| plugin.enabled)
            .map(|plugin| plugin.name.clone())
            .collect()
    }
}
