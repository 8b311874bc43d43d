use serde::Deserialize;
use std::path::PathBuf;

/// The TOML file structure for shellguard.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub general: Option<GeneralConfig>,
    pub safety: Option<SafetyConfig>,
    pub history: Option<HistoryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    pub shell: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SafetyConfig {
    /// Word that must be typed to run a dangerous command.
    pub confirm_token: Option<String>,
    /// Skip the confirmation prompt entirely.
    pub assume_yes: Option<bool>,
    /// Print an undo hint after each command.
    pub undo_hints: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryConfig {
    pub path: Option<String>,
    pub enabled: Option<bool>,
}

/// Fully-resolved runtime configuration. All fields have values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub shell: String,
    pub timeout_secs: u64,
    pub confirm_token: String,
    pub assume_yes: bool,
    pub undo_hints: bool,
    pub history_enabled: bool,
    pub history_path: PathBuf,
}

/// Partial config used during merge. All fields are Option so that
/// missing fields don't override lower-priority values.
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub shell: Option<String>,
    pub timeout_secs: Option<u64>,
    pub confirm_token: Option<String>,
    pub assume_yes: Option<bool>,
    pub undo_hints: Option<bool>,
    pub history_enabled: Option<bool>,
    pub history_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Flatten the sectioned file layout into a mergeable partial config.
    pub fn to_partial(self) -> PartialConfig {
        let general = self.general;
        let safety = self.safety;
        let history = self.history;

        PartialConfig {
            shell: general.as_ref().and_then(|g| g.shell.clone()),
            timeout_secs: general.as_ref().and_then(|g| g.timeout_secs),
            confirm_token: safety.as_ref().and_then(|s| s.confirm_token.clone()),
            assume_yes: safety.as_ref().and_then(|s| s.assume_yes),
            undo_hints: safety.as_ref().and_then(|s| s.undo_hints),
            history_enabled: history.as_ref().and_then(|h| h.enabled),
            history_path: history
                .as_ref()
                .and_then(|h| h.path.as_ref())
                .map(PathBuf::from),
        }
    }
}
