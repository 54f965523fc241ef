//! Navigation core: tabs, view mode, dispatch, background tasks, status and
//! transport control routing.

pub mod controls;
pub mod extraction;
pub mod navigation;
pub mod status;
pub mod tab_registry;
pub mod tasks;
pub mod view_mode;
pub mod workspace;

pub use controls::{PlaceholderControls, TransportCommand, VideoControlBridge, VideoControls};
pub use extraction::{
    spawn_extraction, ExtractionConfig, ExtractionDriver, ExtractionEvent, ExtractionHandle,
    ExtractionStage, RunId,
};
pub use navigation::{
    FeatureKey, FeatureRegistry, NavigationDispatcher, NavigationOutcome, LANDING_TARGET,
};
pub use status::{ShellSignal, ShellStatus, StatusAggregator};
pub use tab_registry::{Tab, TabRegistry};
pub use tasks::{
    BackgroundTask, BackgroundTaskTracker, TaskId, TaskStatus, DEFAULT_COMPLETION_GRACE,
};
pub use view_mode::{ViewMode, ViewModeController, DEFAULT_LANDING_DEBOUNCE};
pub use workspace::{TabContent, TickOutcome, Workspace};
