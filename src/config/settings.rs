use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::extraction::ExtractionConfig;
use crate::core::tasks::DEFAULT_COMPLETION_GRACE;
use crate::core::view_mode::DEFAULT_LANDING_DEBOUNCE;
use crate::services::geocoding::GeocodingConfig;
use crate::ui::action::parse_action;
use crate::util::paths::config_path;

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeyCombo, KeyContext, KeybindingConfig};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub shell: ShellConfig,
    pub tasks: TasksConfig,
    pub geocoding: GeocodingConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// How long the workspace stays up after the last tab closes
    pub landing_debounce: Duration,
    pub explorer_width: u16,
    pub sidebar_width: u16,
    pub show_splash: bool,
}

#[derive(Debug, Clone)]
pub struct TasksConfig {
    /// How long finished tasks stay listed
    pub completion_grace: Duration,
    pub extracting_tick: Duration,
    pub extraction_tick: Duration,
    /// Start the extraction workflow when playback begins
    pub auto_extract: bool,
}

impl Default for Config {
    fn default() -> Self {
        let extraction = ExtractionConfig::default();
        Self {
            shell: ShellConfig {
                landing_debounce: DEFAULT_LANDING_DEBOUNCE,
                explorer_width: 28,
                sidebar_width: 24,
                show_splash: true,
            },
            tasks: TasksConfig {
                completion_grace: DEFAULT_COMPLETION_GRACE,
                extracting_tick: extraction.extracting_tick,
                extraction_tick: extraction.extraction_tick,
                auto_extract: true,
            },
            geocoding: GeocodingConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlShellConfig {
    pub landing_debounce_ms: Option<u64>,
    pub explorer_width: Option<u16>,
    pub sidebar_width: Option<u16>,
    pub show_splash: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlTasksConfig {
    pub completion_grace_ms: Option<u64>,
    pub extracting_tick_ms: Option<u64>,
    pub extraction_tick_ms: Option<u64>,
    pub auto_extract: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlGeocodingConfig {
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub min_query_len: Option<usize>,
    pub result_limit: Option<usize>,
    pub user_agent: Option<String>,
}

/// TOML representation of keybinding configuration: `action = "key"`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlKeybindings {
    #[serde(flatten)]
    pub global: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<BTreeMap<String, String>>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    pub shell: Option<TomlShellConfig>,
    pub tasks: Option<TomlTasksConfig>,
    pub geocoding: Option<TomlGeocodingConfig>,
    pub keys: Option<TomlKeybindings>,
}

impl TomlKeybindings {
    fn to_keybinding_config(&self) -> KeybindingConfig {
        let mut config = KeybindingConfig::new();
        parse_bindings(&mut config.global, &self.global);

        let contexts = [
            (KeyContext::Landing, &self.landing),
            (KeyContext::Workspace, &self.workspace),
            (KeyContext::Sidebar, &self.sidebar),
            (KeyContext::Explorer, &self.explorer),
            (KeyContext::Search, &self.search),
        ];
        for (context, bindings) in contexts {
            if let Some(bindings) = bindings {
                parse_bindings(config.context.entry(context).or_default(), bindings);
            }
        }
        config
    }

    fn from_keybinding_config(config: &KeybindingConfig) -> Self {
        let scoped = |context: KeyContext| config.context.get(&context).map(render_bindings);
        Self {
            global: render_bindings(&config.global),
            landing: scoped(KeyContext::Landing),
            workspace: scoped(KeyContext::Workspace),
            sidebar: scoped(KeyContext::Sidebar),
            explorer: scoped(KeyContext::Explorer),
            search: scoped(KeyContext::Search),
        }
    }
}

fn parse_bindings(
    target: &mut HashMap<KeyCombo, crate::ui::action::Action>,
    bindings: &BTreeMap<String, String>,
) {
    for (action_name, key_str) in bindings {
        let Some(action) = parse_action(action_name) else {
            tracing::warn!(action = %action_name, "Unknown action in keybinding config");
            continue;
        };
        match parse_key_notation(key_str) {
            Ok(combo) => {
                target.insert(combo, action);
            }
            Err(e) => {
                tracing::warn!(action = %action_name, key = %key_str, error = %e, "Invalid key notation");
            }
        }
    }
}

/// One key per action; the lexically smallest wins so output is stable
fn render_bindings(
    bindings: &HashMap<KeyCombo, crate::ui::action::Action>,
) -> BTreeMap<String, String> {
    let mut rendered: BTreeMap<String, String> = BTreeMap::new();
    for (combo, action) in bindings {
        let key = combo.to_string();
        rendered
            .entry(action.config_name().into_owned())
            .and_modify(|existing| {
                if key < *existing {
                    *existing = key.clone();
                }
            })
            .or_insert(key);
    }
    rendered
}

impl Config {
    /// Load configuration from the default location, merging with defaults.
    ///
    /// Creates the example config on first run. Problems are logged and the
    /// defaults kept.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Config::default()
            }
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text and merge it over the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.merge(toml_config);
        Ok(config)
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(shell) = toml_config.shell {
            if let Some(ms) = shell.landing_debounce_ms {
                self.shell.landing_debounce = Duration::from_millis(ms);
            }
            if let Some(width) = shell.explorer_width {
                self.shell.explorer_width = width;
            }
            if let Some(width) = shell.sidebar_width {
                self.shell.sidebar_width = width;
            }
            if let Some(show) = shell.show_splash {
                self.shell.show_splash = show;
            }
        }

        if let Some(tasks) = toml_config.tasks {
            if let Some(ms) = tasks.completion_grace_ms {
                self.tasks.completion_grace = Duration::from_millis(ms);
            }
            if let Some(ms) = tasks.extracting_tick_ms {
                self.tasks.extracting_tick = Duration::from_millis(ms.max(1));
            }
            if let Some(ms) = tasks.extraction_tick_ms {
                self.tasks.extraction_tick = Duration::from_millis(ms.max(1));
            }
            if let Some(auto) = tasks.auto_extract {
                self.tasks.auto_extract = auto;
            }
        }

        if let Some(geocoding) = toml_config.geocoding {
            if let Some(endpoint) = geocoding.endpoint {
                self.geocoding.endpoint = endpoint;
            }
            if let Some(ms) = geocoding.debounce_ms {
                self.geocoding.debounce = Duration::from_millis(ms);
            }
            if let Some(len) = geocoding.min_query_len {
                self.geocoding.min_query_len = len;
            }
            if let Some(limit) = geocoding.result_limit {
                self.geocoding.result_limit = limit;
            }
            if let Some(agent) = geocoding.user_agent {
                self.geocoding.user_agent = agent;
            }
        }

        if let Some(keys) = toml_config.keys {
            self.keybindings.merge(keys.to_keybinding_config());
        }
    }

    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "Failed to create config directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write default config");
        }
    }

    /// Extraction simulator settings
    pub fn extraction(&self) -> ExtractionConfig {
        ExtractionConfig {
            extracting_tick: self.tasks.extracting_tick,
            extraction_tick: self.tasks.extraction_tick,
            seed: None,
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let millis = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        let rendered = TomlConfig {
            shell: Some(TomlShellConfig {
                landing_debounce_ms: Some(millis(self.shell.landing_debounce)),
                explorer_width: Some(self.shell.explorer_width),
                sidebar_width: Some(self.shell.sidebar_width),
                show_splash: Some(self.shell.show_splash),
            }),
            tasks: Some(TomlTasksConfig {
                completion_grace_ms: Some(millis(self.tasks.completion_grace)),
                extracting_tick_ms: Some(millis(self.tasks.extracting_tick)),
                extraction_tick_ms: Some(millis(self.tasks.extraction_tick)),
                auto_extract: Some(self.tasks.auto_extract),
            }),
            geocoding: Some(TomlGeocodingConfig {
                endpoint: Some(self.geocoding.endpoint.clone()),
                debounce_ms: Some(millis(self.geocoding.debounce)),
                min_query_len: Some(self.geocoding.min_query_len),
                result_limit: Some(self.geocoding.result_limit),
                user_agent: Some(self.geocoding.user_agent.clone()),
            }),
            keys: Some(TomlKeybindings::from_keybinding_config(&self.keybindings)),
        };
        Ok(toml::to_string_pretty(&rendered)?)
    }
}
