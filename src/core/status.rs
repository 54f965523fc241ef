//! Shell-wide status flags derived from feature signals.

use std::fmt;

/// Legacy message fragments older feature views broadcast as free text
pub const LOCATION_SELECTED_MARKER: &str = "Location selected";
pub const TILE_SELECTED_MARKER: &str = "Tile selected";
pub const RESET_MARKER: &str = "Reset to clean state";

/// Notification from a feature view to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellSignal {
    /// A geocoded location was chosen
    LocationSelected { name: String },
    /// A map tile was chosen; `coords` is `zoom/x/y`
    TileSelected { coords: String },
    /// Selections cleared
    Reset,
    /// Anything else worth showing as the current task text
    Message(String),
}

impl fmt::Display for ShellSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellSignal::LocationSelected { name } => {
                write!(f, "{}: {}", LOCATION_SELECTED_MARKER, name)
            }
            ShellSignal::TileSelected { coords } => {
                write!(f, "{}: {}", TILE_SELECTED_MARKER, coords)
            }
            ShellSignal::Reset => f.write_str(RESET_MARKER),
            ShellSignal::Message(text) => f.write_str(text),
        }
    }
}

/// Snapshot consumed by the tool bar and status bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellStatus {
    pub current_task: String,
    pub has_location: bool,
    pub has_tile: bool,
    pub has_content: bool,
    pub is_playing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StatusAggregator {
    current_task: String,
    has_location: bool,
    has_tile: bool,
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a signal into the flags; the signal text becomes the current task
    pub fn apply(&mut self, signal: &ShellSignal) {
        match signal {
            ShellSignal::LocationSelected { .. } => self.has_location = true,
            ShellSignal::TileSelected { .. } => self.has_tile = true,
            ShellSignal::Reset => {
                self.has_location = false;
                self.has_tile = false;
            }
            ShellSignal::Message(text) => {
                // Each marker is an independent trigger; reset wins
                if text.contains(LOCATION_SELECTED_MARKER) {
                    self.has_location = true;
                }
                if text.contains(TILE_SELECTED_MARKER) {
                    self.has_tile = true;
                }
                if text.contains(RESET_MARKER) {
                    self.has_location = false;
                    self.has_tile = false;
                }
            }
        }
        self.current_task = signal.to_string();
    }

    /// Convenience for producers that still speak free text
    pub fn apply_message(&mut self, text: &str) {
        self.apply(&ShellSignal::Message(text.to_string()));
    }

    pub fn has_location(&self) -> bool {
        self.has_location
    }

    pub fn has_tile(&self) -> bool {
        self.has_tile
    }

    pub fn current_task(&self) -> &str {
        &self.current_task
    }

    /// Union of the video and map domains: either an upload exists or a
    /// location and tile are both chosen
    pub fn has_content(&self, uploaded_video_count: usize) -> bool {
        uploaded_video_count > 0 || (self.has_location && self.has_tile)
    }

    pub fn snapshot(&self, uploaded_video_count: usize, is_playing: bool) -> ShellStatus {
        ShellStatus {
            current_task: self.current_task.clone(),
            has_location: self.has_location,
            has_tile: self.has_tile,
            has_content: self.has_content(uploaded_video_count),
            is_playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_signals_set_flags() {
        let mut status = StatusAggregator::new();
        status.apply(&ShellSignal::LocationSelected {
            name: "Munich".into(),
        });
        assert!(status.has_location());
        assert!(!status.has_tile());
        assert_eq!(status.current_task(), "Location selected: Munich");

        status.apply(&ShellSignal::TileSelected {
            coords: "15/17448/11360".into(),
        });
        assert!(status.has_tile());
        assert!(status.has_content(0));
    }

    #[test]
    fn test_flags_persist_across_unrelated_messages() {
        let mut status = StatusAggregator::new();
        status.apply_message("Location selected: Berlin");
        status.apply_message("Rendering preview");
        assert!(status.has_location());
        assert_eq!(status.current_task(), "Rendering preview");
    }

    #[test]
    fn test_reset_clears_both_flags() {
        let sequences: &[&[&str]] = &[
            &["Location selected: X"],
            &["Tile selected: Y"],
            &["Location selected: X", "Tile selected: Y"],
            &["Tile selected: Y", "Location selected: X", "Tile selected: Z"],
        ];
        for sequence in sequences {
            let mut status = StatusAggregator::new();
            for message in *sequence {
                status.apply_message(message);
            }
            status.apply_message("Reset to clean state");
            assert!(!status.has_location(), "sequence {:?}", sequence);
            assert!(!status.has_tile(), "sequence {:?}", sequence);
        }
    }

    #[test]
    fn test_message_markers_are_independent() {
        let mut status = StatusAggregator::new();
        status.apply_message("Location selected: Munich | Tile selected: 16/34876/22744");
        assert!(status.has_location());
        assert!(status.has_tile());
        assert!(status.has_content(0));

        status.apply_message("Uploading clip");
        assert!(status.has_location());
        assert_eq!(status.current_task(), "Uploading clip");

        status.apply_message("Tile selected: 1/0/0, Reset to clean state");
        assert!(!status.has_location());
        assert!(!status.has_tile());
    }

    #[test]
    fn test_has_content_union() {
        let mut status = StatusAggregator::new();
        assert!(!status.has_content(0));
        assert!(status.has_content(1));

        status.apply(&ShellSignal::LocationSelected { name: "A".into() });
        assert!(!status.has_content(0));
        status.apply(&ShellSignal::TileSelected { coords: "1/0/0".into() });
        assert!(status.has_content(0));
    }

    #[test]
    fn test_snapshot() {
        let mut status = StatusAggregator::new();
        status.apply(&ShellSignal::Reset);
        let snapshot = status.snapshot(2, true);
        assert_eq!(
            snapshot,
            ShellStatus {
                current_task: "Reset to clean state".into(),
                has_location: false,
                has_tile: false,
                has_content: true,
                is_playing: true,
            }
        );
    }
}
