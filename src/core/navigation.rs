//! Navigation intents from the sidebar, explorer and dashboard.
//!
//! Both entry points resolve their target through one [`FeatureRegistry`]:
//! known features get content from a factory wired with the shared shell
//! context, everything else keeps the caller's content.

use std::collections::HashMap;
use std::fmt;

use super::workspace::{TabContent, Workspace};
use super::Tab;

/// Sidebar entry that returns the shell to the landing dashboard
pub const LANDING_TARGET: &str = "Home";

/// Feature screens the shell knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKey {
    CriticalEventSieve,
    SceneGeneration,
    ScenarioGeneration,
    DriveLab,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 4] = [
        FeatureKey::CriticalEventSieve,
        FeatureKey::SceneGeneration,
        FeatureKey::ScenarioGeneration,
        FeatureKey::DriveLab,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            FeatureKey::CriticalEventSieve => "Critical Event Sieve",
            FeatureKey::SceneGeneration => "Scene Generation",
            FeatureKey::ScenarioGeneration => "Scenario Generation",
            FeatureKey::DriveLab => "Drive Lab",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FeatureKey::CriticalEventSieve => "◈",
            FeatureKey::SceneGeneration => "▦",
            FeatureKey::ScenarioGeneration => "⬡",
            FeatureKey::DriveLab => "▶",
        }
    }

    /// Project-file extension that opens this feature from the explorer
    pub fn file_extension(self) -> &'static str {
        match self {
            FeatureKey::CriticalEventSieve => "ces",
            FeatureKey::SceneGeneration => "scn",
            FeatureKey::ScenarioGeneration => "sce",
            FeatureKey::DriveLab => "dlab",
        }
    }

    /// Resolve a sidebar / dashboard label (case-insensitive)
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.display_name().eq_ignore_ascii_case(name))
    }

    /// Resolve an explorer file name by its extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        Self::ALL
            .into_iter()
            .find(|key| key.file_extension().eq_ignore_ascii_case(extension))
    }

    /// Resolve a CLI argument: display name, kebab-case slug or extension
    pub fn parse_loose(input: &str) -> Option<Self> {
        let normalized = input.trim().replace(['-', '_'], " ");
        Self::from_display_name(&normalized).or_else(|| {
            Self::ALL
                .into_iter()
                .find(|key| key.file_extension().eq_ignore_ascii_case(input.trim()))
        })
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

type Factory<C, X> = Box<dyn Fn(&X) -> C + Send + Sync>;

/// Maps each feature to the function that builds its content from the shared context
pub struct FeatureRegistry<C, X> {
    factories: HashMap<FeatureKey, Factory<C, X>>,
}

impl<C, X> Default for FeatureRegistry<C, X> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<C, X> FeatureRegistry<C, X> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, key: FeatureKey, factory: F)
    where
        F: Fn(&X) -> C + Send + Sync + 'static,
    {
        self.factories.insert(key, Box::new(factory));
    }

    pub fn with<F>(mut self, key: FeatureKey, factory: F) -> Self
    where
        F: Fn(&X) -> C + Send + Sync + 'static,
    {
        self.register(key, factory);
        self
    }

    pub fn build(&self, key: FeatureKey, context: &X) -> Option<C> {
        self.factories.get(&key).map(|factory| factory(context))
    }
}

/// What a navigation call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Tabs cleared, landing page shown
    Landing,
    /// Existing tab brought to front
    Activated(String),
    /// New tab created and activated
    Opened(String),
}

pub struct NavigationDispatcher<C, X> {
    features: FeatureRegistry<C, X>,
}

impl<C: TabContent, X> NavigationDispatcher<C, X> {
    pub fn new(features: FeatureRegistry<C, X>) -> Self {
        Self { features }
    }

    /// Show `target`, creating its tab with `content` if it is not open yet.
    ///
    /// The explorer is opened on every non-landing navigation, including
    /// re-activation of an existing tab.
    pub fn navigate(
        &self,
        workspace: &mut Workspace<C>,
        context: &X,
        target: &str,
        content: C,
        icon: Option<String>,
    ) -> NavigationOutcome {
        if target == LANDING_TARGET {
            workspace.go_landing();
            tracing::debug!("Navigated to landing");
            return NavigationOutcome::Landing;
        }
        let feature = FeatureKey::from_display_name(target);
        self.open_or_activate(workspace, context, target, feature, content, icon)
    }

    /// Open a project file. File names resolve by extension, never to the
    /// landing page.
    pub fn open_file(
        &self,
        workspace: &mut Workspace<C>,
        context: &X,
        file_name: &str,
        content: C,
    ) -> NavigationOutcome {
        let feature = FeatureKey::from_file_name(file_name);
        let icon = feature.map(|key| key.icon().to_string());
        self.open_or_activate(workspace, context, file_name, feature, content, icon)
    }

    fn open_or_activate(
        &self,
        workspace: &mut Workspace<C>,
        context: &X,
        name: &str,
        feature: Option<FeatureKey>,
        content: C,
        icon: Option<String>,
    ) -> NavigationOutcome {
        workspace.view_mut().enter_workspace();

        if workspace.tabs().contains(name) {
            workspace.activate(name);
            tracing::debug!(tab = %name, "Activated existing tab");
            return NavigationOutcome::Activated(name.to_string());
        }

        let content = feature
            .and_then(|key| self.features.build(key, context))
            .unwrap_or(content);
        let mut tab = Tab::new(name, content);
        tab.icon = icon;
        workspace.open(tab);
        tracing::info!(tab = %name, feature = ?feature, "Opened tab");
        NavigationOutcome::Opened(name.to_string())
    }
}
