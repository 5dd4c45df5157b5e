use uuid::{Uuid, uuid};

/// Name of the environment variable containing the path to the Lumen configuration file.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/lumen/meta.toml` or `$HOME/.config/lumen/meta.toml`
///  (2) on Windows: `%APPDATA%\lumen\meta.toml`
pub const ENV_META_CONFIG_PATH: &str = "LUMEN_CONFIG_PATH";

/// Qualified name of the marker carried by UI-building functions.
pub const COMPOSABLE_MARKER: &str = "lumen.ui.Composable";

/// Suffix a marked function name must end with to be instrumented.
pub const SCREEN_NAME_SUFFIX: &str = "Screen";

/// Package of the lifecycle instrumentation function.
pub const LIFECYCLE_EFFECT_PACKAGE: &str = "lumen.lifecycle";

/// Simple name of the lifecycle instrumentation function.
pub const LIFECYCLE_EFFECT_NAME: &str = "ScreenLifecycleEffect";

/// Oldest front-end language version the screen lifecycle plugin is able to process.
pub const SCREEN_LIFECYCLE_MIN_FRONTEND: (u64, u64, u64) = (2, 0, 0);

/// Standard plugin constants
pub const LUMEN_SCREEN_LIFECYCLE_NAME_EXT: &str = "__EXT_lumen_screen_lifecycle";
pub const LUMEN_SCREEN_LIFECYCLE_UUID_EXT: Uuid = uuid!("6f0d52a4-3c5e-4b8e-9f43-1d2b7c9e8a10");
