//! Transport controls routed from the global tool bar to the active tab.
//!
//! Handles are registered per tab name. Commands go only to the handle
//! registered for the tab the bridge currently considers active, so a late
//! registration from a background tab can never steal the tool bar.

use std::collections::HashMap;
use std::sync::Arc;

/// Media transport surface a feature view exposes
pub trait VideoControls: Send + Sync {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn restart(&self);
}

/// Handle for views with no media loaded; commands are only logged
#[derive(Debug, Clone)]
pub struct PlaceholderControls {
    owner: String,
}

impl PlaceholderControls {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

impl VideoControls for PlaceholderControls {
    fn play(&self) {
        tracing::debug!(tab = %self.owner, "play requested with no media loaded");
    }

    fn pause(&self) {
        tracing::debug!(tab = %self.owner, "pause requested with no media loaded");
    }

    fn stop(&self) {
        tracing::debug!(tab = %self.owner, "stop requested with no media loaded");
    }

    fn restart(&self) {
        tracing::debug!(tab = %self.owner, "restart requested with no media loaded");
    }
}

/// Transport command issued by the tool bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
    Stop,
    Restart,
}

#[derive(Default)]
pub struct VideoControlBridge {
    handles: HashMap<String, Arc<dyn VideoControls>>,
    active: Option<String>,
}

impl VideoControlBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tab's handle, replacing whatever that tab registered before
    pub fn register(&mut self, tab: impl Into<String>, handle: Arc<dyn VideoControls>) {
        let tab = tab.into();
        tracing::debug!(tab = %tab, "Video controls registered");
        self.handles.insert(tab, handle);
    }

    pub fn unregister(&mut self, tab: &str) {
        self.handles.remove(tab);
    }

    /// Follow the active tab
    pub fn set_active(&mut self, tab: Option<&str>) {
        self.active = tab.map(str::to_string);
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.active = None;
    }

    pub fn is_registered(&self, tab: &str) -> bool {
        self.handles.contains_key(tab)
    }

    fn active_handle(&self) -> Option<&Arc<dyn VideoControls>> {
        self.active
            .as_deref()
            .and_then(|name| self.handles.get(name))
    }

    /// Forward a command; returns false when no handle is registered for the active tab
    pub fn dispatch(&self, command: TransportCommand) -> bool {
        let Some(handle) = self.active_handle() else {
            return false;
        };
        match command {
            TransportCommand::Play => handle.play(),
            TransportCommand::Pause => handle.pause(),
            TransportCommand::Stop => handle.stop(),
            TransportCommand::Restart => handle.restart(),
        }
        true
    }

    pub fn play(&self) -> bool {
        self.dispatch(TransportCommand::Play)
    }

    pub fn pause(&self) -> bool {
        self.dispatch(TransportCommand::Pause)
    }

    pub fn stop(&self) -> bool {
        self.dispatch(TransportCommand::Stop)
    }

    pub fn restart(&self) -> bool {
        self.dispatch(TransportCommand::Restart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().clone()
        }
    }

    impl VideoControls for Recorder {
        fn play(&self) {
            self.calls.lock().push("play");
        }
        fn pause(&self) {
            self.calls.lock().push("pause");
        }
        fn stop(&self) {
            self.calls.lock().push("stop");
        }
        fn restart(&self) {
            self.calls.lock().push("restart");
        }
    }

    #[test]
    fn test_no_handle_is_noop() {
        let bridge = VideoControlBridge::new();
        assert!(!bridge.play());
        assert!(!bridge.restart());
    }

    #[test]
    fn test_last_registration_wins() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let mut bridge = VideoControlBridge::new();
        bridge.set_active(Some("Drive Lab"));

        bridge.register("Drive Lab", a.clone());
        bridge.register("Drive Lab", b.clone());
        assert!(bridge.play());

        assert!(a.calls().is_empty());
        assert_eq!(b.calls(), vec!["play"]);
    }

    #[test]
    fn test_inactive_registration_does_not_steal() {
        let active = Arc::new(Recorder::default());
        let background = Arc::new(Recorder::default());
        let mut bridge = VideoControlBridge::new();
        bridge.set_active(Some("Critical Event Sieve"));
        bridge.register("Critical Event Sieve", active.clone());
        bridge.register("Drive Lab", background.clone());

        bridge.pause();
        bridge.stop();

        assert_eq!(active.calls(), vec!["pause", "stop"]);
        assert!(background.calls().is_empty());
    }

    #[test]
    fn test_follows_active_tab() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut bridge = VideoControlBridge::new();
        bridge.register("one", first.clone());
        bridge.register("two", second.clone());

        bridge.set_active(Some("one"));
        bridge.play();
        bridge.set_active(Some("two"));
        bridge.restart();
        bridge.set_active(None);
        assert!(!bridge.stop());

        assert_eq!(first.calls(), vec!["play"]);
        assert_eq!(second.calls(), vec!["restart"]);
    }

    #[test]
    fn test_unregister() {
        let handle = Arc::new(Recorder::default());
        let mut bridge = VideoControlBridge::new();
        bridge.set_active(Some("x"));
        bridge.register("x", handle.clone());
        bridge.unregister("x");
        assert!(!bridge.play());
        assert!(!bridge.is_registered("x"));
    }
}
