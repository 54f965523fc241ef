//! App fixtures backed by an offline geocoder

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use drivelab::services::{GeocodeCandidate, GeocodeError, HostError, WindowChrome};
use drivelab::{App, Config, Geocoder};

/// Answers every query with one candidate in Munich
pub struct MunichGeocoder;

#[async_trait]
impl Geocoder for MunichGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        Ok(vec![GeocodeCandidate {
            display_name: format!("{query}, Bavaria, Germany"),
            lat: 48.1351,
            lon: 11.582,
            class: "place".into(),
            kind: "city".into(),
        }])
    }
}

/// Records which window controls were used
#[derive(Default)]
pub struct RecordingChrome {
    pub closed: AtomicBool,
    pub maximized: AtomicBool,
    pub minimized: AtomicBool,
}

impl WindowChrome for RecordingChrome {
    fn minimize(&self) -> Result<(), HostError> {
        self.minimized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn maximize(&self) -> Result<(), HostError> {
        self.maximized.fetch_xor(true, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) -> Result<(), HostError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_maximized(&self) -> bool {
        self.maximized.load(Ordering::SeqCst)
    }
}

/// Defaults without the playback-triggered workflow, which needs a runtime
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.tasks.auto_extract = false;
    config
}

pub fn test_app(config: Config) -> App {
    App::new(config, Arc::new(MunichGeocoder))
}

pub fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
}

pub fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
    app.handle_key(KeyEvent::new(code, modifiers), now);
}

pub fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}
