use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use shellguard::cli::{Cli, Commands};
use shellguard::config;
use shellguard::flow::{Executor, exit_code_for};
use shellguard::history::{HistoryEntry, HistoryLog};
use shellguard::safety::{self, DangerLevel};
use shellguard::undo;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config(&cli).context("Failed to load configuration")?;
    tracing::debug!(
        shell = %config.shell,
        timeout_secs = config.timeout_secs,
        history = %config.history_path.display(),
        "Config loaded"
    );

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Check { command, json } => {
            let analysis = safety::analyze(&command);
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&analysis)?)?;
            } else if analysis.level >= DangerLevel::Caution {
                writeln!(
                    stdout,
                    "{}",
                    safety::format_warning_with_token(&command, &config.confirm_token)
                )?;
            } else {
                writeln!(stdout, "{}", safety::level_name(analysis.level))?;
            }
        }
        Commands::Undo { command, json } => {
            let suggestion = undo::suggest_undo(&command);
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&suggestion)?)?;
            } else if suggestion.can_undo {
                writeln!(stdout, "{}", undo::format_suggestion(&suggestion))?;
            } else {
                writeln!(stdout, "{}", suggestion.description)?;
            }
        }
        Commands::Run { command, .. } => {
            let executor = Executor::new(config);
            let mut stdin = io::stdin().lock();
            let outcome = executor
                .run(&command, &mut stdin, &mut stdout)
                .await
                .with_context(|| format!("Failed to run `{command}`"))?;
            stdout.flush()?;
            return Ok(ExitCode::from(exit_code_for(&outcome).clamp(0, 255) as u8));
        }
        Commands::History {
            limit,
            search,
            clear,
        } => {
            let log = HistoryLog::new(&config.history_path);
            if clear {
                log.clear()
                    .with_context(|| format!("Failed to clear history at {}", log.path().display()))?;
                writeln!(stdout, "History cleared.")?;
                return Ok(ExitCode::SUCCESS);
            }

            let entries = match &search {
                Some(query) => log.search(query).map(|mut found| {
                    found.drain(..found.len().saturating_sub(limit));
                    found
                }),
                None => log.load(limit),
            }
            .with_context(|| format!("Failed to read history at {}", log.path().display()))?;

            if entries.is_empty() {
                match &search {
                    Some(query) => writeln!(stdout, "No history entries match '{query}'.")?,
                    None => writeln!(stdout, "No history yet.")?,
                }
            }
            for entry in entries {
                writeln!(stdout, "{}", format_history_entry(&entry))?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn format_history_entry(entry: &HistoryEntry) -> String {
    let status = match (entry.executed, entry.exit_code) {
        (false, _) => "cancelled".to_string(),
        (true, _) if entry.timed_out => "timed out".to_string(),
        (true, Some(code)) => format!("exit {code}"),
        (true, None) => "killed".to_string(),
    };
    format!(
        "{}  [{}] {}  ({})",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level,
        entry.command,
        status
    )
}
