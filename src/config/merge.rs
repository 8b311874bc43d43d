use super::schema::{AppConfig, PartialConfig};
use crate::exec::DEFAULT_SHELL;
use crate::safety::DEFAULT_CONFIRM_TOKEN;
use std::path::PathBuf;

/// Default command timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl PartialConfig {
    /// Merge self with a lower-priority fallback.
    /// Self's non-None values take precedence.
    pub fn with_fallback(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            shell: self.shell.or(fallback.shell),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
            confirm_token: self.confirm_token.or(fallback.confirm_token),
            assume_yes: self.assume_yes.or(fallback.assume_yes),
            undo_hints: self.undo_hints.or(fallback.undo_hints),
            history_enabled: self.history_enabled.or(fallback.history_enabled),
            history_path: self.history_path.or(fallback.history_path),
        }
    }

    /// Convert to AppConfig, filling any remaining gaps with defaults.
    ///
    /// A blank confirmation token falls back to the default token, and a zero
    /// timeout falls back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn finalize(self) -> AppConfig {
        let confirm_token = self
            .confirm_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIRM_TOKEN.to_string());

        AppConfig {
            shell: self.shell.unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            timeout_secs: self
                .timeout_secs
                .filter(|&t| t > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            confirm_token,
            assume_yes: self.assume_yes.unwrap_or(false),
            undo_hints: self.undo_hints.unwrap_or(true),
            history_enabled: self.history_enabled.unwrap_or(true),
            history_path: self.history_path.unwrap_or_else(default_history_path),
        }
    }
}

/// `<platform data dir>/history.jsonl`, or a file in the working directory
/// when no home directory can be determined.
fn default_history_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "shellguard")
        .map(|dirs| dirs.data_dir().join("history.jsonl"))
        .unwrap_or_else(|| PathBuf::from("shellguard-history.jsonl"))
}
