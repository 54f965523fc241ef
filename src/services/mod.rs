//! Collaborators the shell talks to: host window, geocoding, map and media.

pub mod geocoding;
pub mod host;
pub mod map;
pub mod media;

pub use geocoding::{
    GeocodeCandidate, GeocodeError, Geocoder, GeocodingConfig, LocationSearch, NominatimGeocoder,
    SearchUpdate,
};
pub use host::{readiness_channel, HostError, ReadinessListener, ReadinessSignal, TerminalChrome, WindowChrome};
pub use map::{MapClick, MapError, SimulationPoint, TileInfo};
pub use media::{MediaPlayer, MediaSource, PlaybackState};
