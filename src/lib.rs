pub mod config;
pub mod core;
pub mod services;
pub mod ui;
pub mod util;

pub use config::Config;
pub use crate::core::{FeatureKey, NavigationDispatcher, NavigationOutcome, ViewMode, Workspace};
pub use services::{Geocoder, NominatimGeocoder};
pub use ui::App;
