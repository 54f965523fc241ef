use uuid::Uuid;

use crate::core::{ExtractionEvent, RunId};
use crate::services::SearchUpdate;

/// Messages from background producers to the UI task
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Progress from one extraction simulator run
    Extraction { run: RunId, event: ExtractionEvent },

    /// Location search results for the panel with this id
    Search { panel: Uuid, update: SearchUpdate },

    /// Host acknowledged the readiness signal
    Ready,

    /// Request to quit the application
    Quit,
}

/// Which panel receives unbound keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys go to the landing dashboard or the active tab
    #[default]
    Normal,
    SidebarNavigation,
    ExplorerNavigation,
    /// Typing into the active tab's location search
    Searching,
}
