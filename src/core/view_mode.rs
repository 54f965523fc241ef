//! Landing vs. workspace layout selection.
//!
//! The mode is derived from the tab registry rather than stored: the shell is
//! in `Landing` only when no tabs are open and no close-debounce hold is
//! pending. The controller also owns the project explorer panel state, since
//! its visibility follows mode transitions.

use std::time::{Duration, Instant};

pub const DEFAULT_LANDING_DEBOUNCE: Duration = Duration::from_millis(100);

/// Top-level shell layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Full-bleed dashboard, no tabs
    #[default]
    Landing,
    /// Tabs, explorer and side panels
    Workspace,
}

impl ViewMode {
    pub fn is_landing(self) -> bool {
        self == ViewMode::Landing
    }
}

#[derive(Debug, Clone)]
pub struct ViewModeController {
    /// Delay between the last tab closing and the landing page appearing
    landing_debounce: Duration,
    /// While set, an empty registry still reports `Workspace`
    hold_until: Option<Instant>,
    /// Project explorer panel visibility
    explorer_open: bool,
}

impl ViewModeController {
    pub fn new(landing_debounce: Duration) -> Self {
        Self {
            landing_debounce,
            hold_until: None,
            explorer_open: false,
        }
    }

    /// Current mode for a registry with `tab_count` tabs
    pub fn mode(&self, tab_count: usize, now: Instant) -> ViewMode {
        if tab_count > 0 {
            return ViewMode::Workspace;
        }
        match self.hold_until {
            Some(deadline) if now < deadline => ViewMode::Workspace,
            _ => ViewMode::Landing,
        }
    }

    /// A non-landing navigation happened: drop any pending hold and open the explorer
    pub fn enter_workspace(&mut self) {
        self.hold_until = None;
        if !self.explorer_open {
            tracing::debug!("Explorer opened by navigation");
        }
        self.explorer_open = true;
    }

    /// Explicit switch to the landing page
    pub fn enter_landing(&mut self) {
        self.hold_until = None;
        self.explorer_open = false;
    }

    /// The last tab was just closed; keep the workspace chrome briefly
    pub fn last_tab_closed(&mut self, now: Instant) {
        self.hold_until = Some(now + self.landing_debounce);
    }

    /// Resolve an expired hold. Returns true when this call moved the shell to
    /// `Landing`.
    pub fn settle(&mut self, tab_count: usize, now: Instant) -> bool {
        let Some(deadline) = self.hold_until else {
            return false;
        };
        if tab_count > 0 {
            self.hold_until = None;
            return false;
        }
        if now < deadline {
            return false;
        }
        self.hold_until = None;
        self.explorer_open = false;
        tracing::debug!("Returned to landing after last tab closed");
        true
    }

    pub fn has_pending_hold(&self) -> bool {
        self.hold_until.is_some()
    }

    pub fn explorer_open(&self) -> bool {
        self.explorer_open
    }

    pub fn set_explorer_open(&mut self, open: bool) {
        self.explorer_open = open;
    }

    pub fn toggle_explorer(&mut self) {
        self.explorer_open = !self.explorer_open;
    }
}

impl Default for ViewModeController {
    fn default() -> Self {
        Self::new(DEFAULT_LANDING_DEBOUNCE)
    }
}
