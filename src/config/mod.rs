pub mod merge;
pub mod schema;

pub use merge::DEFAULT_TIMEOUT_SECS;
pub use schema::*;

use crate::cli::{Cli, Commands};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// File name searched for in the working directory and the global config dir.
pub const CONFIG_FILE_NAME: &str = "shellguard.toml";

/// Load configuration by merging global, project, and CLI sources.
/// Precedence: CLI > project config (./shellguard.toml) > global config > defaults.
///
/// With `--config`, that file replaces both the project and global layers and
/// must exist and parse. Missing files in the default search are skipped.
pub fn load_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let cli_partial = cli_to_partial(cli);

    let config = match &cli.config {
        Some(path) => cli_partial.with_fallback(read_config_file(path)?),
        None => {
            // Layer 1: Global config (~/.config/shellguard/shellguard.toml or platform equivalent)
            let global = load_global_config();
            // Layer 2: Project config in the working directory
            let project = load_toml_file(Path::new(CONFIG_FILE_NAME)).unwrap_or_default();
            cli_partial.with_fallback(project).with_fallback(global)
        }
    };

    Ok(config.finalize())
}

/// Read and parse a config file, surfacing every failure.
pub fn read_config_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(path, &contents)
}

/// Parse TOML `contents` that were read from `path`.
pub fn parse_config(path: &Path, contents: &str) -> Result<PartialConfig, ConfigError> {
    toml::from_str::<ConfigFile>(contents)
        .map(ConfigFile::to_partial)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Load global config from the platform-specific config directory.
/// Returns empty PartialConfig if file not found.
fn load_global_config() -> PartialConfig {
    match global_config_path() {
        Some(p) => load_toml_file(&p).unwrap_or_default(),
        None => {
            tracing::debug!("Could not determine global config directory");
            PartialConfig::default()
        }
    }
}

/// Load a config file from the default search path.
/// Returns None on file-not-found; logs and ignores parse errors.
fn load_toml_file(path: &Path) -> Option<PartialConfig> {
    match read_config_file(path) {
        Ok(partial) => {
            tracing::info!("Loaded config from {}", path.display());
            Some(partial)
        }
        Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Config error: {}", e);
            None
        }
    }
}

/// Resolve the platform-specific global config path.
/// Linux: ~/.config/shellguard/shellguard.toml
/// macOS: ~/Library/Application Support/shellguard/shellguard.toml
fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "shellguard")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Convert CLI arguments to a PartialConfig for merging.
fn cli_to_partial(cli: &Cli) -> PartialConfig {
    match &cli.command {
        Commands::Run {
            yes,
            timeout,
            shell,
            no_undo_hint,
            ..
        } => PartialConfig {
            shell: shell.clone(),
            timeout_secs: *timeout,
            // Unset flags defer to the config files.
            assume_yes: yes.then_some(true),
            undo_hints: no_undo_hint.then_some(false),
            ..Default::default()
        },
        _ => PartialConfig::default(),
    }
}
