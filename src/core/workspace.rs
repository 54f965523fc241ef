//! Owning state container for the navigation core.
//!
//! Every mutation of the tab registry goes through here so the control bridge
//! and view mode never drift from the open tabs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::controls::{PlaceholderControls, VideoControlBridge, VideoControls};
use super::status::StatusAggregator;
use super::tab_registry::{Tab, TabRegistry};
use super::tasks::{BackgroundTaskTracker, TaskId, DEFAULT_COMPLETION_GRACE};
use super::view_mode::{ViewMode, ViewModeController, DEFAULT_LANDING_DEBOUNCE};

/// Content stored in a tab
pub trait TabContent {
    /// Transport controls for the media this content shows, if any
    fn controls(&self) -> Option<Arc<dyn VideoControls>> {
        None
    }
}

/// Result of a periodic [`Workspace::tick`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub removed_tasks: Vec<TaskId>,
    pub returned_to_landing: bool,
}

pub struct Workspace<C> {
    tabs: TabRegistry<C>,
    view: ViewModeController,
    controls: VideoControlBridge,
    tasks: BackgroundTaskTracker,
    status: StatusAggregator,
}

impl<C: TabContent> Default for Workspace<C> {
    fn default() -> Self {
        Self::new(DEFAULT_LANDING_DEBOUNCE, DEFAULT_COMPLETION_GRACE)
    }
}

impl<C: TabContent> Workspace<C> {
    pub fn new(landing_debounce: Duration, completion_grace: Duration) -> Self {
        Self {
            tabs: TabRegistry::new(),
            view: ViewModeController::new(landing_debounce),
            controls: VideoControlBridge::new(),
            tasks: BackgroundTaskTracker::new(completion_grace),
            status: StatusAggregator::new(),
        }
    }

    pub fn tabs(&self) -> &TabRegistry<C> {
        &self.tabs
    }

    pub fn view(&self) -> &ViewModeController {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewModeController {
        &mut self.view
    }

    pub fn view_mode(&self, now: Instant) -> ViewMode {
        self.view.mode(self.tabs.len(), now)
    }

    pub fn explorer_open(&self) -> bool {
        self.view.explorer_open()
    }

    pub fn controls(&self) -> &VideoControlBridge {
        &self.controls
    }

    pub fn tasks(&self) -> &BackgroundTaskTracker {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut BackgroundTaskTracker {
        &mut self.tasks
    }

    pub fn status(&self) -> &StatusAggregator {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusAggregator {
        &mut self.status
    }

    pub fn active_content(&self) -> Option<&C> {
        self.tabs.active_tab().map(|tab| &tab.content)
    }

    /// Mutable access to the active tab's content. Call
    /// [`Workspace::refresh_controls`] afterwards if its media changed.
    pub fn active_content_mut(&mut self) -> Option<&mut C> {
        self.tabs.active_tab_mut().map(|tab| &mut tab.content)
    }

    pub fn content_mut(&mut self, name: &str) -> Option<&mut C> {
        self.tabs.get_mut(name).map(|tab| &mut tab.content)
    }

    pub fn contents_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.tabs.tabs_mut().iter_mut().map(|tab| &mut tab.content)
    }

    /// Add (or replace) a tab and make it active
    pub fn open(&mut self, tab: Tab<C>) {
        self.tabs.add(tab);
        self.refresh_controls();
    }

    pub fn activate(&mut self, name: &str) {
        self.tabs.set_active(name);
        self.refresh_controls();
    }

    pub fn activate_next(&mut self) {
        self.tabs.activate_next();
        self.refresh_controls();
    }

    pub fn activate_prev(&mut self) {
        self.tabs.activate_prev();
        self.refresh_controls();
    }

    pub fn activate_index(&mut self, index: usize) -> bool {
        let switched = self.tabs.activate_index(index);
        if switched {
            self.refresh_controls();
        }
        switched
    }

    /// Close a tab. Closing the last one schedules the return to landing.
    pub fn close_tab(&mut self, name: &str, now: Instant) -> bool {
        if self.tabs.remove(name).is_none() {
            return false;
        }
        self.controls.unregister(name);
        if self.tabs.is_empty() {
            self.view.last_tab_closed(now);
        }
        self.refresh_controls();
        true
    }

    pub fn close_active(&mut self, now: Instant) -> bool {
        match self.tabs.active_tab().map(|tab| tab.name.clone()) {
            Some(name) => self.close_tab(&name, now),
            None => false,
        }
    }

    /// Drop every tab and show the landing page immediately
    pub fn go_landing(&mut self) {
        self.tabs.clear();
        self.controls.clear();
        self.view.enter_landing();
    }

    /// Re-register the active tab's controls with the bridge
    pub fn refresh_controls(&mut self) {
        self.controls.set_active(self.tabs.active_name());
        let Some(tab) = self.tabs.active_tab() else {
            return;
        };
        let handle: Arc<dyn VideoControls> = match tab.content.controls() {
            Some(handle) => handle,
            None => Arc::new(PlaceholderControls::new(tab.name.clone())),
        };
        let name = tab.name.clone();
        self.controls.register(name, handle);
    }

    /// Resolve timers: expired task removals and the landing debounce
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let removed_tasks = self.tasks.sweep(now);
        let returned_to_landing = self.view.settle(self.tabs.len(), now);
        if returned_to_landing {
            self.controls.clear();
        }
        TickOutcome {
            removed_tasks,
            returned_to_landing,
        }
    }
}
