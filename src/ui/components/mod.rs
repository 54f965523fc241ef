mod landing;
mod menu_bar;
mod project_explorer;
mod sidebar;
mod status_bar;
mod tab_bar;
pub mod theme;
mod title_bar;
mod tool_bar;

pub use landing::{LandingDashboard, LandingState};
pub use menu_bar::{MenuBar, MENU_LABELS};
pub use project_explorer::{ExplorerState, ProjectExplorer, PROJECT_FILES, PROJECT_NAME};
pub use sidebar::{sidebar_entries, Sidebar, SidebarState};
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use title_bar::{TitleBar, PRODUCT_NAME};
pub use tool_bar::ToolBar;
