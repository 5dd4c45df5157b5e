use std::sync::Arc;

use lumcore::{
    base::{
        InstanceContext,
        api::{ApplicationInfo, InstanceCreateInfo, VersionInfo, create_instance},
        ext::{PluginExtStatic, PluginLibrary},
    },
    ext::log::{LogCreateInfoEXT, LogLevelEXT, LogMessageEXT},
    luminfo, lumtrace,
    magic::LUMEN_SCREEN_LIFECYCLE_NAME_EXT,
    screen::ScreenLifecyclePlugin,
    utils::conf::ExtList,
};
use parking_lot::Mutex;

fn create_info(enabled_extensions: Vec<String>, ext: ExtList) -> InstanceCreateInfo {
    InstanceCreateInfo {
        application_info: ApplicationInfo {
            application_version: VersionInfo::new(1, 2, 3),
            application_name: "instance-tests".to_string(),
            engine_version: VersionInfo::new(0, 1, 1),
            engine_name: String::new(),
        },
        enabled_extensions,
        ext,
    }
}

#[test]
fn screen_plugin_is_registered_globally() {
    let library = PluginLibrary::with_registered_plugins().unwrap();
    assert!(library.get(&ScreenLifecyclePlugin::UUID).is_some());

    let mut by_name = PluginLibrary::default();
    by_name
        .add_plugin_by_name(LUMEN_SCREEN_LIFECYCLE_NAME_EXT)
        .unwrap();
    assert_eq!(by_name.len(), 1);

    let mut by_uuid = PluginLibrary::default();
    by_uuid.add_plugin_by_uuid(ScreenLifecyclePlugin::UUID).unwrap();
    assert!(
        by_uuid
            .add_plugin_by_uuid(ScreenLifecyclePlugin::UUID)
            .unwrap_err()
            .is_duplicated_key()
    );
}

#[test]
fn unknown_plugin_is_rejected() {
    let result = InstanceContext::create(create_info(
        vec!["no-such-plugin".to_string()],
        ExtList::new(),
    ));
    assert!(result.err().unwrap().is_plugin_not_found());
}

#[test]
fn application_info_is_recorded() {
    let instance = create_instance(create_info(Vec::new(), ExtList::new())).unwrap();
    assert_eq!(instance.application_name, "instance-tests");
    assert_eq!(instance.application_version, semver::Version::new(1, 2, 3));
    assert_eq!(instance.engine_name, None);
    assert!(!instance.plugins.read().is_empty());
}

#[test]
fn log_messages_reach_the_callback_above_the_level() {
    let received: Arc<Mutex<Vec<LogMessageEXT>>> = Arc::default();
    let sink = received.clone();

    let mut ext = ExtList::new();
    ext.push(LogCreateInfoEXT {
        level: LogLevelEXT::Info,
        callback: Box::new(move |_: &InstanceContext, msg: LogMessageEXT| {
            sink.lock().push(msg)
        }),
    });

    let instance = InstanceContext::create(create_info(Vec::new(), ext)).unwrap();
    received.lock().clear();

    lumtrace!(&instance, "dropped {}", 1);
    luminfo!(&instance, "kept {}", 2);

    let messages = received.lock();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, LogLevelEXT::Info);
    assert_eq!(messages[0].message, "kept 2");
    assert!(messages[0].line.is_some());

    instance.ext.set_log_level(LogLevelEXT::Trace);
    assert_eq!(instance.ext.log_level(), LogLevelEXT::Trace);
}
