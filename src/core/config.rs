//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.captr/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Screen;
use crate::core::notes;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CaptrConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub chat_name: Option<String>,
    pub start_screen: Option<Screen>,
    pub max_input_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulatorConfig {
    pub reply_delay_ms: Option<u64>,
    pub reply_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotesConfig {
    pub document_file: Option<String>,
    pub export_dir: Option<String>,
    pub allow_raw_html: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub toast_ms: Option<u64>,
    pub carousel_interval_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MAX_INPUT_CHARS: usize = 4000;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_REPLY_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_TOAST_MS: u64 = 3000;
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 3000;

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub screen: Option<Screen>,
    pub chat_name: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub notes_file: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub chat_name: Option<String>,
    pub start_screen: Screen,
    pub max_input_chars: usize,
    pub reply_delay: Duration,
    pub reply_timeout: Duration,
    /// Markdown file replacing the bundled notes document.
    pub notes_file: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub allow_raw_html: bool,
    pub toast_duration: Duration,
    pub carousel_interval_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&CaptrConfig::default(), &CliOverrides::default(), |_| None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.captr`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".captr"))
}

/// Returns the path to `~/.captr/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.captr/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CaptrConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CaptrConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CaptrConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CaptrConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<CaptrConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CaptrConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Captr Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# chat_name = "AI Notes Chat"        # Or set CAPTR_CHAT_NAME
# start_screen = "landing"           # "landing", "notes" or "prototype"
# max_input_chars = 4000

# [simulator]
# reply_delay_ms = 1000              # Or set CAPTR_REPLY_DELAY_MS
# reply_timeout_ms = 10000

# [notes]
# document_file = "notes.md"         # Path relative to ~/.captr/
# export_dir = "~/Downloads"         # Or set CAPTR_EXPORT_DIR
# allow_raw_html = false             # Show inline HTML verbatim instead of dropping it

# [ui]
# toast_ms = 3000
# carousel_interval_ms = 3000
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CaptrConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup.
fn resolve_with(
    config: &CaptrConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Chat name: CLI → env → config → content default
    let chat_name = cli
        .chat_name
        .clone()
        .or_else(|| env("CAPTR_CHAT_NAME"))
        .or_else(|| config.general.chat_name.clone());

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| env("CAPTR_REPLY_DELAY_MS").and_then(|v| parse_env_u64("CAPTR_REPLY_DELAY_MS", &v)))
        .or(config.simulator.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    // Reply timeout: config → default, always longer than the delay
    let configured_timeout_ms = config
        .simulator
        .reply_timeout_ms
        .unwrap_or(DEFAULT_REPLY_TIMEOUT_MS);
    let reply_timeout_ms = if configured_timeout_ms <= reply_delay_ms {
        let raised = reply_delay_ms.saturating_add(DEFAULT_REPLY_TIMEOUT_MS);
        warn!(
            "reply_timeout_ms ({}) does not exceed reply_delay_ms ({}); using {}ms",
            configured_timeout_ms, reply_delay_ms, raised
        );
        raised
    } else {
        configured_timeout_ms
    };

    // Export dir: CLI → env → config → downloads folder
    let export_dir = cli
        .export_dir
        .clone()
        .or_else(|| env("CAPTR_EXPORT_DIR").map(PathBuf::from))
        .or_else(|| config.notes.export_dir.as_deref().map(expand_home))
        .unwrap_or_else(notes::default_export_dir);

    // Notes file: CLI path as given; config path relative to ~/.captr/
    let notes_file = cli.notes_file.clone().or_else(|| {
        config
            .notes
            .document_file
            .as_deref()
            .and_then(|f| config_dir().map(|d| d.join(f)))
    });

    ResolvedConfig {
        chat_name,
        start_screen: cli
            .screen
            .or(config.general.start_screen)
            .unwrap_or_default(),
        max_input_chars: config
            .general
            .max_input_chars
            .unwrap_or(DEFAULT_MAX_INPUT_CHARS),
        reply_delay: Duration::from_millis(reply_delay_ms),
        reply_timeout: Duration::from_millis(reply_timeout_ms),
        notes_file,
        export_dir,
        allow_raw_html: config.notes.allow_raw_html.unwrap_or(false),
        toast_duration: Duration::from_millis(config.ui.toast_ms.unwrap_or(DEFAULT_TOAST_MS)),
        carousel_interval_ms: config
            .ui
            .carousel_interval_ms
            .unwrap_or(DEFAULT_CAROUSEL_INTERVAL_MS),
    }
}

fn parse_env_u64(key: &str, value: &str) -> Option<u64> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring {key}={value:?}: {e}");
            None
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
