use std::sync::Arc;

use crate::{
    base::InstanceContext,
    utils::{conf::ExtList, error::LmResult},
};

/// Semantic version triple passed between front ends and the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl VersionInfo {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl From<VersionInfo> for semver::Version {
    fn from(value: VersionInfo) -> Self {
        semver::Version::new(value.major as u64, value.minor as u64, value.patch as u64)
    }
}

/// Describes the embedding application and target engine versions.
#[derive(Debug, Clone)]
pub struct ApplicationInfo {
    pub application_version: VersionInfo,
    pub application_name: String,
    pub engine_version: VersionInfo,
    pub engine_name: String,
}

/// Container used to request the creation of an [`InstanceContext`].
pub struct InstanceCreateInfo {
    pub application_info: ApplicationInfo,
    /// Names of the plugins to enable. Empty enables every registered plugin.
    pub enabled_extensions: Vec<String>,
    pub ext: ExtList,
}

/// Kind of data held by a [`ModuleSourceInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSourceType {
    /// Textual IR, see [`lumir::parser`].
    Text,
}

#[derive(Debug, Clone)]
pub struct ModuleSourceInfo {
    pub source_type: ModuleSourceType,
    pub filename: Option<String>,
    pub data: String,
}

impl ModuleSourceInfo {
    pub fn text(filename: Option<&str>, data: impl Into<String>) -> Self {
        Self {
            source_type: ModuleSourceType::Text,
            filename: filename.map(str::to_string),
            data: data.into(),
        }
    }
}

/// Input of [`crate::compiler::compile_sources`].
#[derive(Debug, Clone)]
pub struct ModuleCompileInfo {
    /// Units being compiled. Only these are transformed.
    pub sources: Vec<ModuleSourceInfo>,
    /// Already compiled modules the units may call into. They contribute
    /// symbols but are never transformed.
    pub dependencies: Vec<ModuleSourceInfo>,
    /// Language version of the front end driving the compilation.
    pub language_version: VersionInfo,
}

/// Creates and initializes a new [`InstanceContext`] from the provided metadata.
pub fn create_instance(create_info: InstanceCreateInfo) -> LmResult<Arc<InstanceContext>> {
    InstanceContext::create(create_info).map(Arc::new)
}
