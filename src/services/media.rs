//! Simulated media element backing the video feature views.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::VideoControls;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    pub name: String,
    pub duration: Duration,
}

#[derive(Debug, Default)]
struct PlayerState {
    source: Option<MediaSource>,
    playback: PlaybackState,
    position: Duration,
}

/// Shared player; clones refer to the same element
#[derive(Debug, Clone, Default)]
pub struct MediaPlayer {
    state: Arc<Mutex<PlayerState>>,
}

impl MediaPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a source, resetting playback
    pub fn load(&self, source: MediaSource) {
        let mut state = self.state.lock();
        tracing::debug!(source = %source.name, "Media loaded");
        state.source = Some(source);
        state.playback = PlaybackState::Stopped;
        state.position = Duration::ZERO;
    }

    pub fn source(&self) -> Option<MediaSource> {
        self.state.lock().source.clone()
    }

    pub fn has_source(&self) -> bool {
        self.state.lock().source.is_some()
    }

    pub fn playback(&self) -> PlaybackState {
        self.state.lock().playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback() == PlaybackState::Playing
    }

    pub fn position(&self) -> Duration {
        self.state.lock().position
    }

    pub fn seek(&self, position: Duration) {
        let mut state = self.state.lock();
        let limit = state
            .source
            .as_ref()
            .map(|source| source.duration)
            .unwrap_or(Duration::ZERO);
        state.position = position.min(limit);
    }

    /// Advance the playhead; playback stops at the end of the source
    pub fn advance(&self, elapsed: Duration) {
        let mut state = self.state.lock();
        if state.playback != PlaybackState::Playing {
            return;
        }
        let Some(duration) = state.source.as_ref().map(|source| source.duration) else {
            return;
        };
        state.position = (state.position + elapsed).min(duration);
        if state.position >= duration {
            state.playback = PlaybackState::Stopped;
        }
    }

    /// Transport handle to hand to the control bridge
    pub fn controls(&self) -> Arc<dyn VideoControls> {
        Arc::new(self.clone())
    }
}

impl VideoControls for MediaPlayer {
    fn play(&self) {
        let mut state = self.state.lock();
        if state.source.is_some() {
            state.playback = PlaybackState::Playing;
        }
    }

    fn pause(&self) {
        let mut state = self.state.lock();
        if state.playback == PlaybackState::Playing {
            state.playback = PlaybackState::Paused;
        }
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        state.playback = PlaybackState::Stopped;
        state.position = Duration::ZERO;
    }

    fn restart(&self) {
        let mut state = self.state.lock();
        state.position = Duration::ZERO;
        if state.source.is_some() {
            state.playback = PlaybackState::Playing;
        }
    }
}
