//! Interactive execution flow: review, confirm, execute, record, hint.
//!
//! [`Executor`] is the single entry point for running a user-approved command.
//! Dangerous commands (see [`crate::safety::requires_confirmation`]) only run after the user
//! types the configured confirmation token, unless `assume_yes` is set.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::exec::{ExecResult, execute_shell_with};
use crate::history::{HistoryEntry, HistoryLog};
use crate::safety::{analyze, format_analysis};
use crate::undo::{format_suggestion, suggest_undo};

/// What happened to a command handed to [`Executor::run`].
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Executed(ExecResult),
    /// The command needed confirmation and did not get it.
    Cancelled,
}

pub struct Executor {
    config: AppConfig,
    history: Option<HistoryLog>,
    working_dir: PathBuf,
}

impl Executor {
    /// Build an executor that runs commands in the current directory.
    pub fn new(config: AppConfig) -> Self {
        let history = config
            .history_enabled
            .then(|| HistoryLog::new(config.history_path.clone()));
        let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            config,
            history,
            working_dir,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Run `command` through the safety pipeline.
    ///
    /// 1. Print the warning banner for anything at `Caution` or above.
    /// 2. If confirmation is required, read one line from `input` and
    ///    cancel unless it matches the confirmation token.
    /// 3. Execute with the configured shell and timeout, echoing output.
    /// 4. Record the attempt in the history log.
    /// 5. Print the undo hint, whatever the exit status.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        command: &str,
        input: &mut R,
        out: &mut W,
    ) -> anyhow::Result<RunOutcome> {
        let analysis = analyze(command);

        let prompt_token =
            (!self.config.assume_yes).then_some(self.config.confirm_token.as_str());
        let banner = format_analysis(&analysis, prompt_token);
        if !banner.is_empty() {
            writeln!(out, "{banner}")?;
        }

        if analysis.is_dangerous {
            tracing::warn!(level = %analysis.level, command, "Dangerous command requires confirmation");
            if self.config.assume_yes {
                tracing::info!("Confirmation skipped (assume_yes)");
            } else if !self.confirm(input, out)? {
                tracing::warn!(command, "Execution cancelled");
                writeln!(out, "Cancelled.")?;
                self.record(HistoryEntry::new(command, analysis.level));
                return Ok(RunOutcome::Cancelled);
            }
        }

        tracing::info!(command, shell = %self.config.shell, "Executing command");
        let result = execute_shell_with(
            &self.config.shell,
            command,
            &self.working_dir,
            self.config.timeout_secs,
        )
        .await?;

        out.write_all(result.stdout.as_bytes())?;
        out.write_all(result.stderr.as_bytes())?;
        if result.timed_out {
            writeln!(out, "Command timed out after {}s", self.config.timeout_secs)?;
        }

        self.record(HistoryEntry {
            executed: true,
            exit_code: result.exit_code,
            timed_out: result.timed_out,
            ..HistoryEntry::new(command, analysis.level)
        });

        if self.config.undo_hints {
            let suggestion = suggest_undo(command);
            if suggestion.can_undo {
                tracing::debug!(undo = %suggestion.undo_command, "Undo hint available");
                writeln!(out)?;
                writeln!(out, "{}", format_suggestion(&suggestion))?;
            }
        }

        Ok(RunOutcome::Executed(result))
    }

    /// Prompt on `out` and read the answer from `input`. EOF counts as "no".
    fn confirm<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> std::io::Result<bool> {
        write!(out, "> ")?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(answer.trim().eq_ignore_ascii_case(&self.config.confirm_token))
    }

    fn record(&self, entry: HistoryEntry) {
        let Some(log) = &self.history else {
            return;
        };
        if let Err(e) = log.append(&entry) {
            tracing::warn!("Failed to record history at {}: {}", log.path().display(), e);
        }
    }
}

/// Process exit code the CLI reports for an outcome.
///
/// Mirrors the command's own code; 124 on timeout (as `timeout(1)` does) and
/// 1 for a cancelled run or a signal-terminated child.
pub fn exit_code_for(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::Cancelled => 1,
        RunOutcome::Executed(result) if result.timed_out => 124,
        RunOutcome::Executed(result) => result.exit_code.unwrap_or(1),
    }
}
