//! Runtime side of the screen lifecycle instrumentation.
//!
//! Compiled screens start with a call to `ScreenLifecycleEffect(name)`. At
//! run time that call is [`screen_lifecycle_effect`]: it emits
//! [`LifecycleEvent::Show`] right away and returns a guard emitting
//! [`LifecycleEvent::Hide`] when dropped, whichever way the enclosing scope
//! is left (normal exit, early return, unwinding).
//!
//! Events are logged with `log::info!` under the `Screen Lifecycle` target
//! and handed to every listener registered with [`add_listener`].
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use log::info;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use strum::{Display, EnumIs};

/// Log target of the lifecycle messages.
pub const LOG_TARGET: &str = "Screen Lifecycle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
pub enum LifecycleEvent {
    Show,
    Hide,
}

type Listener = Arc<dyn Fn(&str, LifecycleEvent) + Send + Sync>;

static LISTENERS: Lazy<RwLock<Vec<(ListenerId, Listener)>>> = Lazy::new(|| RwLock::new(Vec::new()));
static NEXT_LISTENER: AtomicU64 = AtomicU64::new(0);

/// Handle of a registered listener, see [`remove_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Register a process-wide listener called for every lifecycle event.
pub fn add_listener(listener: impl Fn(&str, LifecycleEvent) + Send + Sync + 'static) -> ListenerId {
    let id = ListenerId(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed));
    LISTENERS.write().push((id, Arc::new(listener)));
    id
}

/// Unregister a listener. Returns whether it was registered.
pub fn remove_listener(id: ListenerId) -> bool {
    let mut listeners = LISTENERS.write();
    let before = listeners.len();
    listeners.retain(|(registered, _)| *registered != id);
    listeners.len() != before
}

fn emit(screen_name: &str, event: LifecycleEvent) {
    info!(target: LOG_TARGET, "{}: {}", event, screen_name);

    // Listeners may register or remove listeners themselves.
    let listeners: Vec<Listener> = LISTENERS
        .read()
        .iter()
        .map(|(_, listener)| listener.clone())
        .collect();
    for listener in listeners {
        listener(screen_name, event);
    }
}

/// Scope guard of a visible screen.
#[must_use = "the screen is hidden as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScreenLifecycleEffect {
    screen_name: String,
}

impl ScreenLifecycleEffect {
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    /// Move the effect to another key. Changing the name hides the previous
    /// screen and shows the new one; the same name is a no-op.
    pub fn rekey(&mut self, screen_name: impl Into<String>) {
        let screen_name = screen_name.into();
        if screen_name == self.screen_name {
            return;
        }

        emit(&self.screen_name, LifecycleEvent::Hide);
        self.screen_name = screen_name;
        emit(&self.screen_name, LifecycleEvent::Show);
    }
}

impl Drop for ScreenLifecycleEffect {
    fn drop(&mut self) {
        emit(&self.screen_name, LifecycleEvent::Hide);
    }
}

/// Show `screen_name` until the returned guard is dropped.
pub fn screen_lifecycle_effect(screen_name: impl Into<String>) -> ScreenLifecycleEffect {
    let effect = ScreenLifecycleEffect {
        screen_name: screen_name.into(),
    };
    emit(&effect.screen_name, LifecycleEvent::Show);
    effect
}

#[cfg(test)]
mod tests {
    use std::panic;

    use parking_lot::Mutex;

    use super::*;

    /// Record the events of screens whose name starts with `prefix`, so that
    /// tests running in parallel do not see each other.
    fn record(prefix: &'static str) -> (ListenerId, Arc<Mutex<Vec<(String, LifecycleEvent)>>>) {
        let events: Arc<Mutex<Vec<(String, LifecycleEvent)>>> = Arc::default();
        let sink = events.clone();
        let id = add_listener(move |name, event| {
            if name.starts_with(prefix) {
                sink.lock().push((name.to_string(), event));
            }
        });
        (id, events)
    }

    fn events(log: &Mutex<Vec<(String, LifecycleEvent)>>) -> Vec<(String, LifecycleEvent)> {
        log.lock().clone()
    }

    #[test]
    fn show_then_hide_on_scope_exit() {
        let (id, log) = record("Scope");
        {
            let effect = screen_lifecycle_effect("ScopeScreen");
            assert_eq!(effect.screen_name(), "ScopeScreen");
            assert_eq!(
                events(&log),
                vec![("ScopeScreen".to_string(), LifecycleEvent::Show)]
            );
        }
        assert_eq!(
            events(&log),
            vec![
                ("ScopeScreen".to_string(), LifecycleEvent::Show),
                ("ScopeScreen".to_string(), LifecycleEvent::Hide),
            ]
        );
        assert!(remove_listener(id));
    }

    #[test]
    fn hide_on_early_return() {
        fn screen(bail: bool) -> u32 {
            let _effect = screen_lifecycle_effect("EarlyScreen");
            if bail {
                return 0;
            }
            1
        }

        let (id, log) = record("Early");
        assert_eq!(screen(true), 0);
        assert_eq!(
            events(&log).last(),
            Some(&("EarlyScreen".to_string(), LifecycleEvent::Hide))
        );
        assert_eq!(events(&log).len(), 2);
        remove_listener(id);
    }

    #[test]
    fn hide_on_unwind() {
        let (id, log) = record("Panic");
        let result = panic::catch_unwind(|| {
            let _effect = screen_lifecycle_effect("PanicScreen");
            panic!("screen failed");
        });
        assert!(result.is_err());
        assert_eq!(
            events(&log),
            vec![
                ("PanicScreen".to_string(), LifecycleEvent::Show),
                ("PanicScreen".to_string(), LifecycleEvent::Hide),
            ]
        );
        remove_listener(id);
    }

    #[test]
    fn rekey_hides_old_and_shows_new() {
        let (id, log) = record("Rekey");
        let mut effect = screen_lifecycle_effect("RekeyA");
        effect.rekey("RekeyA");
        assert_eq!(events(&log).len(), 1, "same key is a no-op");

        effect.rekey("RekeyB");
        drop(effect);
        assert_eq!(
            events(&log),
            vec![
                ("RekeyA".to_string(), LifecycleEvent::Show),
                ("RekeyA".to_string(), LifecycleEvent::Hide),
                ("RekeyB".to_string(), LifecycleEvent::Show),
                ("RekeyB".to_string(), LifecycleEvent::Hide),
            ]
        );
        remove_listener(id);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let (id, log) = record("Removed");
        assert!(remove_listener(id));
        assert!(!remove_listener(id));
        let _effect = screen_lifecycle_effect("RemovedScreen");
        assert!(events(&log).is_empty());
    }
}
