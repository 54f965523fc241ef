//! Map selections: clicked coordinates to simulation points and slippy-map tiles.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest zoom level commonly served by tile providers
pub const MAX_ZOOM: u8 = 19;

/// Web-mercator latitude limit
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("Latitude out of range: {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude out of range: {0}")]
    LongitudeOutOfRange(f64),
    #[error("Zoom level {0} exceeds the maximum of 19")]
    ZoomOutOfRange(u8),
}

/// Coordinate reported by the map renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapClick {
    pub lat: f64,
    pub lon: f64,
}

/// Validated location a simulation is anchored to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

impl SimulationPoint {
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Result<Self, MapError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MapError::LatitudeOutOfRange(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(MapError::LongitudeOutOfRange(lon));
        }
        Ok(Self {
            lat,
            lon,
            label: label.into(),
        })
    }

    pub fn from_click(click: MapClick) -> Result<Self, MapError> {
        let label = format!("{:.5}, {:.5}", click.lat, click.lon);
        Self::new(click.lat, click.lon, label)
    }
}

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// A slippy-map tile and the area it covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileInfo {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
    pub bounds: Bounds,
}

impl TileInfo {
    /// Tile containing a coordinate at `zoom`
    pub fn from_coordinate(lat: f64, lon: f64, zoom: u8) -> Result<Self, MapError> {
        if zoom > MAX_ZOOM {
            return Err(MapError::ZoomOutOfRange(zoom));
        }
        let point = SimulationPoint::new(lat, lon, "")?;

        let n = f64::from(1u32 << zoom);
        let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let lat_rad = lat.to_radians();

        let max_index = (1u32 << zoom) - 1;
        let x = (((point.lon + 180.0) / 360.0) * n).floor() as u32;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32;
        let (x, y) = (x.min(max_index), y.min(max_index));

        Ok(Self {
            x,
            y,
            zoom,
            bounds: tile_bounds(x, y, zoom),
        })
    }

    /// `zoom/x/y` path used by tile servers
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.zoom, self.x, self.y)
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat <= self.bounds.north
            && lat >= self.bounds.south
            && lon >= self.bounds.west
            && lon <= self.bounds.east
    }
}

impl fmt::Display for TileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn tile_bounds(x: u32, y: u32, zoom: u8) -> Bounds {
    let n = f64::from(1u32 << zoom);
    let lon_at = |x: f64| x / n * 360.0 - 180.0;
    let lat_at = |y: f64| (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
    Bounds {
        north: lat_at(f64::from(y)),
        south: lat_at(f64::from(y) + 1.0),
        east: lon_at(f64::from(x) + 1.0),
        west: lon_at(f64::from(x)),
    }
}
