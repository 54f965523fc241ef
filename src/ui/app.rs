use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Paragraph, Widget},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::{Config, KeyCombo, KeyContext};
use crate::core::{
    spawn_extraction, ExtractionDriver, ExtractionHandle, FeatureKey, NavigationDispatcher,
    NavigationOutcome, ShellSignal, ShellStatus, ViewMode, Workspace, LANDING_TARGET,
};
use crate::services::{
    readiness_channel, Geocoder, ReadinessListener, ReadinessSignal, TerminalChrome,
    WindowChrome,
};
use crate::ui::action::Action;
use crate::ui::components::theme::{BG_BASE, TEXT_FAINT};
use crate::ui::components::{
    ExplorerState, LandingDashboard, LandingState, MenuBar, ProjectExplorer, Sidebar,
    SidebarState, StatusBar, TabBar, TitleBar, ToolBar,
};
use crate::ui::events::{AppEvent, InputMode};
use crate::ui::features::{default_features, FeatureView, ShellContext};
use crate::ui::terminal_guard::TerminalGuard;

/// Main application state
pub struct App {
    config: Config,
    workspace: Workspace<FeatureView>,
    dispatcher: NavigationDispatcher<FeatureView, ShellContext>,
    /// Shared context handed to feature factories
    context: ShellContext,
    input_mode: InputMode,
    sidebar: SidebarState,
    explorer: ExplorerState,
    landing: LandingState,
    uploaded_video_count: usize,
    /// Playback state seen on the previous tick, for edge detection
    was_playing: bool,
    extraction: Option<ExtractionHandle>,
    extraction_driver: ExtractionDriver,
    chrome: Arc<dyn WindowChrome>,
    readiness: ReadinessSignal,
    readiness_listener: Option<ReadinessListener>,
    splash_visible: bool,
    last_tick: Option<Instant>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, geocoder: Arc<dyn Geocoder>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (readiness, readiness_listener) = readiness_channel();
        let context = ShellContext {
            events: event_tx.clone(),
            geocoder,
            geocoding: config.geocoding.clone(),
        };

        Self {
            workspace: Workspace::new(
                config.shell.landing_debounce,
                config.tasks.completion_grace,
            ),
            dispatcher: NavigationDispatcher::new(default_features()),
            context,
            input_mode: InputMode::Normal,
            sidebar: SidebarState::default(),
            explorer: ExplorerState::default(),
            landing: LandingState::default(),
            uploaded_video_count: 0,
            was_playing: false,
            extraction: None,
            extraction_driver: ExtractionDriver::new(),
            chrome: Arc::new(TerminalChrome::new()),
            readiness,
            readiness_listener: Some(readiness_listener),
            splash_visible: config.shell.show_splash,
            last_tick: None,
            event_tx,
            event_rx,
            should_quit: false,
            config,
        }
    }

    /// Replace the window chrome the title bar drives
    pub fn with_chrome(mut self, chrome: Arc<dyn WindowChrome>) -> Self {
        self.chrome = chrome;
        self
    }

    pub fn workspace(&self) -> &Workspace<FeatureView> {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace<FeatureView> {
        &mut self.workspace
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    pub fn uploaded_video_count(&self) -> usize {
        self.uploaded_video_count
    }

    pub fn splash_visible(&self) -> bool {
        self.splash_visible
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    /// Drain queued background events without blocking
    pub fn drain_events(&mut self, now: Instant) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_app_event(event, now);
        }
    }

    /// Navigate to a sidebar target (feature display name or the landing entry)
    pub fn navigate(&mut self, target: &str) -> NavigationOutcome {
        let icon = FeatureKey::from_display_name(target).map(|key| key.icon().to_string());
        let outcome = self.dispatcher.navigate(
            &mut self.workspace,
            &self.context,
            target,
            FeatureView::document(target),
            icon,
        );
        self.sidebar.select_target(target);
        if outcome == NavigationOutcome::Landing {
            self.set_input_mode(InputMode::Normal);
        }
        outcome
    }

    /// Open a project explorer file
    pub fn open_file(&mut self, file_name: &str) -> NavigationOutcome {
        self.dispatcher.open_file(
            &mut self.workspace,
            &self.context,
            file_name,
            FeatureView::document(file_name),
        )
    }

    /// True while any open tab's media is playing
    pub fn is_video_playing(&self) -> bool {
        self.workspace
            .tabs()
            .tabs()
            .iter()
            .any(|tab| tab.content.is_playing())
    }

    pub fn status(&self) -> ShellStatus {
        self.workspace
            .status()
            .snapshot(self.uploaded_video_count, self.is_video_playing())
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.sidebar.focused = mode == InputMode::SidebarNavigation;
        self.explorer.focused = mode == InputMode::ExplorerNavigation;
    }

    fn apply_signal(&mut self, signal: ShellSignal) {
        tracing::info!(signal = %signal, "Shell signal");
        self.workspace.status_mut().apply(&signal);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let combo = KeyCombo::from_key_event(&key);
        let context = KeyContext::from_input_mode(self.input_mode, self.workspace.view_mode(now));
        if let Some(action) = self.config.keybindings.get_action(&combo, context).cloned() {
            self.execute_action(action, now);
            return;
        }

        if self.input_mode == InputMode::Searching {
            if let KeyCode::Char(c) = key.code {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    if let Some(view) = self
                        .workspace
                        .active_content_mut()
                        .and_then(FeatureView::as_location_mut)
                    {
                        view.push_char(c);
                    }
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || self.workspace.view_mode(now).is_landing()
        {
            return;
        }
        let Some(view) = self
            .workspace
            .active_content_mut()
            .and_then(FeatureView::as_location_mut)
        else {
            return;
        };
        let Some(click) = view.click_at(mouse.column, mouse.row) else {
            return;
        };
        if let Some(signal) = view.pick_point(click) {
            self.apply_signal(signal);
        }
    }

    pub fn execute_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => {
                if let Err(e) = self.chrome.close() {
                    tracing::warn!(error = %e, "Window close failed");
                }
                self.should_quit = true;
            }
            Action::Maximize => {
                if let Err(e) = self.chrome.maximize() {
                    tracing::warn!(error = %e, "Window maximize failed");
                }
                if self.chrome.is_maximized() && self.input_mode == InputMode::SidebarNavigation {
                    self.set_input_mode(InputMode::Normal);
                }
            }
            Action::Minimize => {
                if let Err(e) = self.chrome.minimize() {
                    tracing::warn!(error = %e, "Window minimize failed");
                }
            }
            Action::ToggleSidebar => {
                self.sidebar.visible = !self.sidebar.visible;
                if !self.sidebar.visible && self.input_mode == InputMode::SidebarNavigation {
                    self.set_input_mode(InputMode::Normal);
                }
            }
            Action::ToggleExplorer => {
                self.workspace.view_mut().toggle_explorer();
                if !self.workspace.explorer_open()
                    && self.input_mode == InputMode::ExplorerNavigation
                {
                    self.set_input_mode(InputMode::Normal);
                }
            }
            Action::GoHome => {
                self.navigate(LANDING_TARGET);
            }
            Action::CloseTab => {
                if self.workspace.close_active(now) {
                    self.leave_search();
                }
            }
            Action::NextTab => {
                self.workspace.activate_next();
                self.leave_search();
            }
            Action::PrevTab => {
                self.workspace.activate_prev();
                self.leave_search();
            }
            Action::SwitchToTab(n) => {
                if n > 0 && self.workspace.activate_index(usize::from(n) - 1) {
                    self.leave_search();
                }
            }
            Action::FocusSidebar => {
                if self.input_mode == InputMode::SidebarNavigation {
                    self.set_input_mode(InputMode::Normal);
                } else if self.sidebar.visible && !self.chrome.is_maximized() {
                    self.set_input_mode(InputMode::SidebarNavigation);
                }
            }
            Action::FocusExplorer => {
                if self.input_mode == InputMode::ExplorerNavigation {
                    self.set_input_mode(InputMode::Normal);
                } else if self.workspace.view_mode(now) == ViewMode::Workspace {
                    self.workspace.view_mut().set_explorer_open(true);
                    self.set_input_mode(InputMode::ExplorerNavigation);
                }
            }
            Action::Play => self.transport("play", |ws| ws.controls().play()),
            Action::Pause => self.transport("pause", |ws| ws.controls().pause()),
            Action::Stop => self.transport("stop", |ws| ws.controls().stop()),
            Action::Restart => self.transport("restart", |ws| ws.controls().restart()),
            Action::SelectNext => self.move_selection(now, true),
            Action::SelectPrev => self.move_selection(now, false),
            Action::Confirm => self.confirm(now),
            Action::Cancel => self.set_input_mode(InputMode::Normal),
            Action::StartSearch => {
                let has_search = self
                    .workspace
                    .active_content_mut()
                    .and_then(FeatureView::as_location_mut)
                    .is_some();
                if has_search {
                    self.set_input_mode(InputMode::Searching);
                }
            }
            Action::Backspace => {
                if let Some(view) = self
                    .workspace
                    .active_content_mut()
                    .and_then(FeatureView::as_location_mut)
                {
                    view.backspace();
                }
            }
            Action::Upload => self.upload(),
            Action::SelectTile => {
                let signal = self
                    .workspace
                    .active_content_mut()
                    .and_then(FeatureView::as_location_mut)
                    .and_then(|view| view.select_tile());
                if let Some(signal) = signal {
                    self.apply_signal(signal);
                }
            }
            Action::ResetSelection => {
                let signal = self
                    .workspace
                    .active_content_mut()
                    .and_then(FeatureView::as_location_mut)
                    .map(|view| view.reset());
                if let Some(signal) = signal {
                    self.set_input_mode(InputMode::Normal);
                    self.apply_signal(signal);
                }
            }
        }
    }

    fn transport(&self, command: &str, send: impl Fn(&Workspace<FeatureView>) -> bool) {
        if !send(&self.workspace) {
            tracing::debug!(command, "No active tab for transport command");
        }
    }

    fn leave_search(&mut self) {
        if self.input_mode == InputMode::Searching {
            self.set_input_mode(InputMode::Normal);
        }
        if self.workspace.tabs().is_empty() && self.input_mode == InputMode::ExplorerNavigation {
            self.set_input_mode(InputMode::Normal);
        }
    }

    fn move_selection(&mut self, now: Instant, forward: bool) {
        match self.input_mode {
            InputMode::SidebarNavigation => {
                if forward {
                    self.sidebar.select_next();
                } else {
                    self.sidebar.select_prev();
                }
            }
            InputMode::ExplorerNavigation => {
                if forward {
                    self.explorer.select_next();
                } else {
                    self.explorer.select_prev();
                }
            }
            InputMode::Normal | InputMode::Searching => {
                if self.workspace.view_mode(now).is_landing() {
                    if forward {
                        self.landing.select_next();
                    } else {
                        self.landing.select_prev();
                    }
                } else if let Some(content) = self.workspace.active_content_mut() {
                    if forward {
                        content.select_next();
                    } else {
                        content.select_prev();
                    }
                }
            }
        }
    }

    fn confirm(&mut self, now: Instant) {
        match self.input_mode {
            InputMode::SidebarNavigation => {
                let target = self.sidebar.selected_target();
                self.set_input_mode(InputMode::Normal);
                self.navigate(target);
            }
            InputMode::ExplorerNavigation => {
                let file = self.explorer.selected_file();
                self.open_file(file);
            }
            InputMode::Normal if self.workspace.view_mode(now).is_landing() => {
                let feature = self.landing.selected_feature();
                self.navigate(feature.display_name());
            }
            InputMode::Normal | InputMode::Searching => {
                if self.input_mode == InputMode::Searching {
                    self.set_input_mode(InputMode::Normal);
                }
                let signal = self
                    .workspace
                    .active_content_mut()
                    .and_then(FeatureView::confirm);
                if let Some(signal) = signal {
                    self.apply_signal(signal);
                }
                // Confirming a sieve upload may swap its media
                self.workspace.refresh_controls();
            }
        }
    }

    fn upload(&mut self) {
        let name = format!("recording_{:03}.mp4", self.uploaded_video_count + 1);
        let Some(sieve) = self
            .workspace
            .active_content_mut()
            .and_then(FeatureView::as_sieve_mut)
        else {
            tracing::debug!("Upload ignored outside the Critical Event Sieve");
            return;
        };
        sieve.upload(name.clone());
        self.uploaded_video_count += 1;
        tracing::info!(file = %name, count = self.uploaded_video_count, "Video uploaded");
    }

    pub fn handle_app_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Extraction { run, event } => {
                self.extraction_driver
                    .apply(self.workspace.tasks_mut(), run, event, now);
            }
            AppEvent::Search { panel, update } => {
                let target = self
                    .workspace
                    .contents_mut()
                    .filter_map(FeatureView::as_location_mut)
                    .find(|view| view.id() == panel);
                match target {
                    Some(view) => view.apply_update(update),
                    None => tracing::debug!(%panel, "Search result for a closed panel"),
                }
            }
            AppEvent::Ready => {
                self.splash_visible = false;
            }
            AppEvent::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Advance media clocks, resolve timers, and start the demonstration
    /// workflow when playback begins
    pub fn tick(&mut self, now: Instant) {
        let elapsed = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);
        for content in self.workspace.contents_mut() {
            content.advance(elapsed);
        }

        let outcome = self.workspace.tick(now);
        if outcome.returned_to_landing {
            tracing::debug!("Returned to landing after last tab closed");
            self.set_input_mode(InputMode::Normal);
        }
        for id in outcome.removed_tasks {
            tracing::debug!(task_id = %id, "Removed finished task");
        }

        let playing = self.is_video_playing();
        if playing && !self.was_playing {
            self.on_playback_started(now);
        }
        self.was_playing = playing;
    }

    /// True while a simulator is alive or its stages are still tracked
    fn extraction_active(&self) -> bool {
        self.extraction_driver.is_running()
            || self
                .extraction
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    fn on_playback_started(&mut self, now: Instant) {
        if !self.config.tasks.auto_extract || self.extraction_active() {
            return;
        }
        let run = self
            .extraction_driver
            .begin(self.workspace.tasks_mut(), now);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_extraction(self.config.extraction(), tx);
        let events = self.event_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if events.send(AppEvent::Extraction { run, event }).is_err() {
                    break;
                }
            }
        });
        tracing::info!(run, "Started extraction workflow");
        self.extraction = Some(handle);
    }

    /// Fire the readiness signal once a frame has been drawn
    pub fn after_draw(&self) {
        if self.readiness.fire() {
            tracing::debug!("Readiness signalled to host");
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        if let Some(listener) = self.readiness_listener.take() {
            let events = self.event_tx.clone();
            tokio::spawn(async move {
                if listener.wait().await {
                    let _ = events.send(AppEvent::Ready);
                }
            });
        }

        let result = self.event_loop(&mut terminal).await;

        self.extraction = None;
        guard.cleanup()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f, Instant::now()))?;
            self.after_draw();

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        let now = Instant::now();
                        match event::read()? {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key, now);
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
                            _ => {}
                        }
                    }
                    self.tick(Instant::now());
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event, Instant::now());
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame, now: Instant) {
        let area = frame.area();
        self.render(area, frame.buffer_mut(), now);
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, now: Instant) {
        Block::default()
            .style(Style::default().bg(BG_BASE))
            .render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(1), // Menu bar
                Constraint::Length(1), // Tool bar
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let mode = self.workspace.view_mode(now);
        let status = self.status();
        let maximized = self.chrome.is_maximized();

        let active_name = self.workspace.tabs().active_name().map(str::to_string);
        let subtitle = match mode {
            ViewMode::Landing => None,
            ViewMode::Workspace => active_name.as_deref(),
        };
        TitleBar::new(subtitle)
            .maximized(maximized)
            .render(rows[0], buf);
        MenuBar.render(rows[1], buf);
        ToolBar::new(status.has_content).render(rows[2], buf);

        let show_sidebar = self.sidebar.visible && !maximized;
        let body = if show_sidebar {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(self.config.shell.sidebar_width),
                    Constraint::Min(0),
                ])
                .split(rows[3]);
            let current = match mode {
                ViewMode::Landing => Some(LANDING_TARGET),
                ViewMode::Workspace => active_name.as_deref(),
            };
            Sidebar::new(&self.sidebar)
                .current(current)
                .render(columns[0], buf);
            columns[1]
        } else {
            rows[3]
        };

        match mode {
            ViewMode::Landing => {
                LandingDashboard::new(&self.landing)
                    .splash(self.splash_visible)
                    .render(body, buf);
            }
            ViewMode::Workspace => self.render_workspace(body, buf),
        }

        let tasks = self.workspace.tasks();
        StatusBar::new(&status)
            .tasks(tasks.current(), tasks.active_count())
            .render(rows[4], buf);
    }

    fn render_workspace(&mut self, area: Rect, buf: &mut Buffer) {
        let main = if self.workspace.explorer_open() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(self.config.shell.explorer_width),
                    Constraint::Min(0),
                ])
                .split(area);
            ProjectExplorer::new(&self.explorer).render(columns[0], buf);
            columns[1]
        } else {
            area
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(main);

        let tabs = self.workspace.tabs();
        let labels: Vec<(&str, Option<&str>)> = tabs
            .tabs()
            .iter()
            .map(|tab| (tab.name.as_str(), tab.icon.as_deref()))
            .collect();
        TabBar::new(labels, tabs.active_index())
            .focused(self.input_mode == InputMode::Normal)
            .render(rows[0], buf);

        let searching = self.input_mode == InputMode::Searching;
        match self.workspace.active_content_mut() {
            Some(content) => content.render(rows[1], buf, searching),
            None => {
                Paragraph::new(Span::styled(
                    "No tab open",
                    Style::default().fg(TEXT_FAINT),
                ))
                .render(rows[1], buf);
            }
        }
    }
}
