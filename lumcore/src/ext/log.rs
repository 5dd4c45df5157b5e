use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::{base::InstanceContext, utils::conf::OpaqueObject};

/// Logger levels supported by the logger extension.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromRepr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum LogLevelEXT {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevelEXT> for log::Level {
    fn from(level: LogLevelEXT) -> Self {
        match level {
            LogLevelEXT::Trace => log::Level::Trace,
            LogLevelEXT::Debug => log::Level::Debug,
            LogLevelEXT::Info => log::Level::Info,
            LogLevelEXT::Warn => log::Level::Warn,
            LogLevelEXT::Error => log::Level::Error,
        }
    }
}

/// Message structure for the logger extension.
#[derive(Debug, Clone)]
pub struct LogMessageEXT {
    pub level: LogLevelEXT,
    pub timepoint: chrono::NaiveDateTime,
    pub message: String,
    pub module: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub thread_name: Option<String>,
}

/// Function called for every message emitted on an instance.
pub type LogCallback = Box<dyn Fn(&InstanceContext, LogMessageEXT) + Send + Sync>;

/// Creation information for the logger extension.
///
/// Attach it to [`crate::base::api::InstanceCreateInfo::ext`] to replace the default
/// callback, which forwards every message to the `log` facade.
pub struct LogCreateInfoEXT {
    pub level: LogLevelEXT,
    pub callback: LogCallback,
}
impl OpaqueObject for LogCreateInfoEXT {}

/// Callback used when no [`LogCreateInfoEXT`] is supplied.
pub fn forward_to_log(_instance: &InstanceContext, msg: LogMessageEXT) {
    log::log!(
        target: msg.module.as_str(),
        log::Level::from(msg.level),
        "{}",
        msg.message
    );
}

/// Emit a message on the log callback of an instance.
#[macro_export]
macro_rules! lumlog {
    (
        $instance:expr,
        $level:expr,
        $( $arg:tt )*
    ) => {
        {
            let instance: &$crate::base::InstanceContext = &*$instance;
            let level: $crate::ext::log::LogLevelEXT = $level;
            if level >= instance.ext.log_level() {
                let msg = $crate::ext::log::LogMessageEXT {
                    level,
                    timepoint: $crate::chrono::Local::now().naive_local(),
                    message: format!($($arg)*),
                    module: module_path!().to_string(),
                    file: Some(file!().to_string()),
                    line: Some(line!()),
                    thread_name: std::thread::current().name().map(|s| s.to_string()),
                };
                (instance.ext.log_callback.read())(instance, msg);
            }
        }
    };
}

#[macro_export]
macro_rules! lumtrace {
    (
        $instance:expr,
        $( $arg:tt )*
    ) => {
        $crate::lumlog!(
            $instance,
            $crate::ext::log::LogLevelEXT::Trace,
            $( $arg )*
        );
    };
}

#[macro_export]
macro_rules! lumdebug {
    (
        $instance:expr,
        $( $arg:tt )*
    ) => {
        $crate::lumlog!(
            $instance,
            $crate::ext::log::LogLevelEXT::Debug,
            $( $arg )*
        );
    };
}

#[macro_export]
macro_rules! luminfo {
    (
        $instance:expr,
        $( $arg:tt )*
    ) => {
        $crate::lumlog!(
            $instance,
            $crate::ext::log::LogLevelEXT::Info,
            $( $arg )*
        );
    };
}

#[macro_export]
macro_rules! lumwarn {
    (
        $instance:expr,
        $( $arg:tt )*
    ) => {
        $crate::lumlog!(
            $instance,
            $crate::ext::log::LogLevelEXT::Warn,
            $( $arg )*
        );
    };
}

#[macro_export]
macro_rules! lumerror {
    (
        $instance:expr,
        $( $arg:tt )*
    ) => {
        $crate::lumlog!(
            $instance,
            $crate::ext::log::LogLevelEXT::Error,
            $( $arg )*
        );
    };
}
