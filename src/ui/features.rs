//! Feature views hosted in workspace tabs.
//!
//! Every view is built through [`default_features`], the single registry the
//! sidebar, dashboard cards and project explorer all resolve through.

use std::sync::Arc;
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::core::{FeatureKey, FeatureRegistry, ShellSignal, TabContent, VideoControls};
use crate::services::{
    GeocodeCandidate, Geocoder, GeocodingConfig, LocationSearch, MapClick, MediaPlayer,
    MediaSource, PlaybackState, SearchUpdate, SimulationPoint, TileInfo,
};
use crate::ui::components::theme::{
    ACCENT_ERROR, ACCENT_PRIMARY, ACCENT_SUCCESS, BG_BASE, BORDER_DEFAULT, BORDER_FOCUSED,
    SELECTED_BG, TEXT_BRIGHT, TEXT_FAINT, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::ui::events::AppEvent;

/// Zoom level used when picking a tile for the chosen location
pub const TILE_ZOOM: u8 = 16;

const UPLOAD_DURATION: Duration = Duration::from_secs(120);
const DRIVE_LAB_SOURCE: &str = "drive_lab_session.mp4";
const DRIVE_LAB_DURATION: Duration = Duration::from_secs(180);

/// Half-width in degrees of the map window around a chosen location
const MAP_SPAN_DEG: f64 = 0.05;

/// Everything a feature factory may draw on
#[derive(Clone)]
pub struct ShellContext {
    pub events: mpsc::UnboundedSender<AppEvent>,
    pub geocoder: Arc<dyn Geocoder>,
    pub geocoding: GeocodingConfig,
}

pub fn default_features() -> FeatureRegistry<FeatureView, ShellContext> {
    FeatureRegistry::new()
        .with(FeatureKey::CriticalEventSieve, |_| {
            FeatureView::Sieve(SieveView::new())
        })
        .with(FeatureKey::SceneGeneration, |ctx| {
            FeatureView::Location(LocationView::new(FeatureKey::SceneGeneration, ctx))
        })
        .with(FeatureKey::ScenarioGeneration, |ctx| {
            FeatureView::Location(LocationView::new(FeatureKey::ScenarioGeneration, ctx))
        })
        .with(FeatureKey::DriveLab, |_| FeatureView::DriveLab(DriveLabView::new()))
}

pub enum FeatureView {
    Sieve(SieveView),
    Location(LocationView),
    DriveLab(DriveLabView),
    /// Project files with no feature behind them
    Document(DocumentView),
}

impl TabContent for FeatureView {
    fn controls(&self) -> Option<Arc<dyn VideoControls>> {
        self.player().map(MediaPlayer::controls)
    }
}

impl FeatureView {
    pub fn document(file_name: impl Into<String>) -> Self {
        FeatureView::Document(DocumentView {
            file_name: file_name.into(),
        })
    }

    pub fn feature(&self) -> Option<FeatureKey> {
        match self {
            FeatureView::Sieve(_) => Some(FeatureKey::CriticalEventSieve),
            FeatureView::Location(view) => Some(view.feature),
            FeatureView::DriveLab(_) => Some(FeatureKey::DriveLab),
            FeatureView::Document(_) => None,
        }
    }

    pub fn player(&self) -> Option<&MediaPlayer> {
        match self {
            FeatureView::Sieve(view) => Some(&view.player),
            FeatureView::DriveLab(view) => Some(&view.player),
            FeatureView::Location(_) | FeatureView::Document(_) => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.player().is_some_and(MediaPlayer::is_playing)
    }

    pub fn advance(&self, elapsed: Duration) {
        if let Some(player) = self.player() {
            player.advance(elapsed);
        }
    }

    pub fn as_location_mut(&mut self) -> Option<&mut LocationView> {
        match self {
            FeatureView::Location(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_sieve_mut(&mut self) -> Option<&mut SieveView> {
        match self {
            FeatureView::Sieve(view) => Some(view),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        match self {
            FeatureView::Sieve(view) => view.select_next(),
            FeatureView::Location(view) => view.select_next(),
            FeatureView::DriveLab(_) | FeatureView::Document(_) => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self {
            FeatureView::Sieve(view) => view.select_prev(),
            FeatureView::Location(view) => view.select_prev(),
            FeatureView::DriveLab(_) | FeatureView::Document(_) => {}
        }
    }

    /// Act on the highlighted item; location picks become shell signals
    pub fn confirm(&mut self) -> Option<ShellSignal> {
        match self {
            FeatureView::Sieve(view) => {
                view.load_selected();
                None
            }
            FeatureView::Location(view) => view.confirm(),
            FeatureView::DriveLab(_) | FeatureView::Document(_) => None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, searching: bool) {
        Block::default()
            .style(Style::default().bg(BG_BASE))
            .render(area, buf);
        match self {
            FeatureView::Sieve(view) => view.render(area, buf),
            FeatureView::Location(view) => view.render(area, buf, searching),
            FeatureView::DriveLab(view) => view.render(area, buf),
            FeatureView::Document(view) => view.render(area, buf),
        }
    }
}

/// Critical Event Sieve: uploaded recordings plus a player
pub struct SieveView {
    player: MediaPlayer,
    uploads: Vec<String>,
    selected: usize,
}

impl SieveView {
    pub fn new() -> Self {
        Self {
            player: MediaPlayer::new(),
            uploads: Vec::new(),
            selected: 0,
        }
    }

    pub fn uploads(&self) -> &[String] {
        &self.uploads
    }

    pub fn player(&self) -> &MediaPlayer {
        &self.player
    }

    /// Accept an uploaded recording; the first one is loaded into the player
    pub fn upload(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.player.has_source() {
            self.player.load(MediaSource {
                name: name.clone(),
                duration: UPLOAD_DURATION,
            });
        }
        self.uploads.push(name);
        self.selected = self.uploads.len() - 1;
    }

    fn select_next(&mut self) {
        if !self.uploads.is_empty() {
            self.selected = (self.selected + 1) % self.uploads.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.uploads.is_empty() {
            self.selected = (self.selected + self.uploads.len() - 1) % self.uploads.len();
        }
    }

    fn load_selected(&mut self) {
        if let Some(name) = self.uploads.get(self.selected) {
            self.player.load(MediaSource {
                name: name.clone(),
                duration: UPLOAD_DURATION,
            });
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(area);
        render_player(&self.player, "Recording", rows[0], buf);

        let block = Block::default()
            .title(" Uploads ")
            .borders(Borders::TOP)
            .border_style(Style::default().fg(BORDER_DEFAULT));
        let lines: Vec<Line> = if self.uploads.is_empty() {
            vec![Line::from(Span::styled(
                "No recordings yet. Press u to upload one.",
                Style::default().fg(TEXT_MUTED),
            ))]
        } else {
            self.uploads
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let style = if i == self.selected {
                        Style::default().fg(TEXT_BRIGHT).bg(SELECTED_BG)
                    } else {
                        Style::default().fg(TEXT_PRIMARY)
                    };
                    Line::from(Span::styled(format!(" {} ", name), style))
                })
                .collect()
        };
        Paragraph::new(lines).block(block).render(rows[1], buf);
    }
}

impl Default for SieveView {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive Lab: a preloaded session recording
pub struct DriveLabView {
    player: MediaPlayer,
}

impl DriveLabView {
    pub fn new() -> Self {
        let player = MediaPlayer::new();
        player.load(MediaSource {
            name: DRIVE_LAB_SOURCE.to_string(),
            duration: DRIVE_LAB_DURATION,
        });
        Self { player }
    }

    pub fn player(&self) -> &MediaPlayer {
        &self.player
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);
        render_player(&self.player, "Session", rows[0], buf);
        Paragraph::new(Line::from(Span::styled(
            "Replay the simulated drive with the transport controls.",
            Style::default().fg(TEXT_MUTED),
        )))
        .render(rows[1], buf);
    }
}

impl Default for DriveLabView {
    fn default() -> Self {
        Self::new()
    }
}

fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn render_player(player: &MediaPlayer, title: &str, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_DEFAULT));
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(source) = player.source() else {
        Paragraph::new(Span::styled(
            "No media loaded",
            Style::default().fg(TEXT_FAINT),
        ))
        .render(inner, buf);
        return;
    };

    let (glyph, color) = match player.playback() {
        PlaybackState::Playing => ("▶", ACCENT_SUCCESS),
        PlaybackState::Paused => ("⏸", ACCENT_PRIMARY),
        PlaybackState::Stopped => ("■", TEXT_MUTED),
    };
    let position = player.position();
    let ratio = if source.duration.is_zero() {
        0.0
    } else {
        (position.as_secs_f64() / source.duration.as_secs_f64()).clamp(0.0, 1.0)
    };
    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(BG_BASE))
        .ratio(ratio)
        .label(format!(
            "{} {}  {} / {}",
            glyph,
            source.name,
            format_clock(position),
            format_clock(source.duration)
        ))
        .render(inner, buf);
}

/// Location search plus map selection, shared by scene and scenario views
pub struct LocationView {
    id: Uuid,
    feature: FeatureKey,
    events: mpsc::UnboundedSender<AppEvent>,
    search: LocationSearch,
    query: String,
    pending: bool,
    results: Vec<GeocodeCandidate>,
    selected: usize,
    error: Option<String>,
    location: Option<SimulationPoint>,
    tile: Option<TileInfo>,
    /// Where the map was last drawn, for mouse picks
    map_area: Option<Rect>,
}

impl LocationView {
    pub fn new(feature: FeatureKey, ctx: &ShellContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            feature,
            events: ctx.events.clone(),
            search: LocationSearch::new(ctx.geocoder.clone(), &ctx.geocoding),
            query: String::new(),
            pending: false,
            results: Vec::new(),
            selected: 0,
            error: None,
            location: None,
            tile: None,
            map_area: None,
        }
    }

    /// Routing key for search results
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[GeocodeCandidate] {
        &self.results
    }

    pub fn location(&self) -> Option<&SimulationPoint> {
        self.location.as_ref()
    }

    pub fn tile(&self) -> Option<&TileInfo> {
        self.tile.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.submit();
    }

    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.submit();
        }
    }

    fn submit(&mut self) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.search.submit(&self.query, tx);
        self.pending = true;

        // Ends once the lookup finishes or is superseded
        let events = self.events.clone();
        let panel = self.id;
        tokio::spawn(async move {
            while let Some(update) = rx.recv().await {
                if events.send(AppEvent::Search { panel, update }).is_err() {
                    break;
                }
            }
        });
    }

    pub fn apply_update(&mut self, update: SearchUpdate) {
        match update {
            SearchUpdate::Cleared => {
                self.pending = false;
                self.results.clear();
                self.error = None;
            }
            SearchUpdate::Results { query, candidates } => {
                if query != self.query.trim() {
                    return;
                }
                self.pending = false;
                self.results = candidates;
                self.selected = 0;
                self.error = None;
            }
            SearchUpdate::Failed { query, error } => {
                if query != self.query.trim() {
                    return;
                }
                self.pending = false;
                self.results.clear();
                self.error = Some(error);
            }
        }
    }

    fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + self.results.len() - 1) % self.results.len();
        }
    }

    /// Choose the highlighted search result
    pub fn confirm(&mut self) -> Option<ShellSignal> {
        let candidate = self.results.get(self.selected)?;
        match SimulationPoint::new(candidate.lat, candidate.lon, candidate.display_name.clone()) {
            Ok(point) => Some(self.set_location(point)),
            Err(e) => {
                tracing::warn!(error = %e, "Geocoder returned an unusable coordinate");
                None
            }
        }
    }

    /// A tile chosen for the previous location no longer applies
    fn set_location(&mut self, point: SimulationPoint) -> ShellSignal {
        let name = point.label.clone();
        self.location = Some(point);
        self.tile = None;
        ShellSignal::LocationSelected { name }
    }

    /// Pick the map tile under the chosen location
    pub fn select_tile(&mut self) -> Option<ShellSignal> {
        let point = self.location.as_ref()?;
        match TileInfo::from_coordinate(point.lat, point.lon, TILE_ZOOM) {
            Ok(tile) => {
                let coords = tile.path();
                self.tile = Some(tile);
                Some(ShellSignal::TileSelected { coords })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve tile");
                None
            }
        }
    }

    /// Choose a point directly on the map
    pub fn pick_point(&mut self, click: MapClick) -> Option<ShellSignal> {
        match SimulationPoint::from_click(click) {
            Ok(point) => Some(self.set_location(point)),
            Err(e) => {
                tracing::warn!(error = %e, "Map click outside valid range");
                None
            }
        }
    }

    /// Translate a terminal cell inside the drawn map to a coordinate
    pub fn click_at(&self, column: u16, row: u16) -> Option<MapClick> {
        let area = self.map_area?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside || area.width == 0 || area.height == 0 {
            return None;
        }
        let (north, south, west, east) = self.map_window();
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(MapClick {
            lat: north - fy * (north - south),
            lon: west + fx * (east - west),
        })
    }

    /// (north, south, west, east) of the region the map shows
    fn map_window(&self) -> (f64, f64, f64, f64) {
        if let Some(tile) = &self.tile {
            let b = tile.bounds;
            return (b.north, b.south, b.west, b.east);
        }
        if let Some(point) = &self.location {
            return (
                (point.lat + MAP_SPAN_DEG).min(90.0),
                (point.lat - MAP_SPAN_DEG).max(-90.0),
                (point.lon - MAP_SPAN_DEG).max(-180.0),
                (point.lon + MAP_SPAN_DEG).min(180.0),
            );
        }
        (85.0, -85.0, -180.0, 180.0)
    }

    /// Clear every selection
    pub fn reset(&mut self) -> ShellSignal {
        self.search.cancel();
        self.query.clear();
        self.pending = false;
        self.results.clear();
        self.selected = 0;
        self.error = None;
        self.location = None;
        self.tile = None;
        ShellSignal::Reset
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, searching: bool) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(columns[0]);

        let border = if searching {
            BORDER_FOCUSED
        } else {
            BORDER_DEFAULT
        };
        let cursor = if searching { "▏" } else { "" };
        let placeholder = self.query.is_empty() && !searching;
        let query_line = if placeholder {
            Span::styled("Press / to search for a place", Style::default().fg(TEXT_FAINT))
        } else {
            Span::styled(
                format!("{}{}", self.query, cursor),
                Style::default().fg(TEXT_BRIGHT),
            )
        };
        Paragraph::new(Line::from(query_line))
            .block(
                Block::default()
                    .title(format!(" {} · Location ", self.feature.display_name()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .render(left[0], buf);

        let mut lines = Vec::new();
        if self.pending {
            lines.push(Line::from(Span::styled(
                "Searching…",
                Style::default().fg(TEXT_MUTED),
            )));
        } else if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("Search failed: {}", error),
                Style::default().fg(ACCENT_ERROR),
            )));
        }
        for (i, candidate) in self.results.iter().enumerate() {
            let style = if i == self.selected {
                Style::default().fg(TEXT_BRIGHT).bg(SELECTED_BG)
            } else {
                Style::default().fg(TEXT_PRIMARY)
            };
            lines.push(Line::from(Span::styled(
                format!(" {} ", candidate.display_name),
                style,
            )));
        }
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Results ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(BORDER_DEFAULT)),
            )
            .wrap(Wrap { trim: true })
            .render(left[1], buf);

        let map_block = Block::default()
            .title(" Map ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_DEFAULT));
        let map_inner = map_block.inner(columns[1]);
        map_block.render(columns[1], buf);
        self.map_area = Some(map_inner);

        let mut info = Vec::new();
        match &self.location {
            Some(point) => {
                info.push(Line::from(vec![
                    Span::styled("Location ", Style::default().fg(TEXT_MUTED)),
                    Span::styled(
                        point.label.clone(),
                        Style::default()
                            .fg(ACCENT_PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                info.push(Line::from(Span::styled(
                    format!("{:.5}, {:.5}", point.lat, point.lon),
                    Style::default().fg(TEXT_PRIMARY),
                )));
            }
            None => info.push(Line::from(Span::styled(
                "Click the map or pick a search result",
                Style::default().fg(TEXT_FAINT),
            ))),
        }
        if let Some(tile) = &self.tile {
            info.push(Line::from(vec![
                Span::styled("Tile ", Style::default().fg(TEXT_MUTED)),
                Span::styled(tile.path(), Style::default().fg(ACCENT_SUCCESS)),
            ]));
        } else if self.location.is_some() {
            info.push(Line::from(Span::styled(
                "Press t to select the tile",
                Style::default().fg(TEXT_FAINT),
            )));
        }
        Paragraph::new(info)
            .wrap(Wrap { trim: true })
            .render(map_inner, buf);
    }
}

/// Placeholder for project files with no feature behind them
pub struct DocumentView {
    file_name: String,
}

impl DocumentView {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                self.file_name.clone(),
                Style::default()
                    .fg(TEXT_BRIGHT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "No viewer is available for this file.",
                Style::default().fg(TEXT_MUTED),
            )),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}
