use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::Instant;

use crate::error::ExecError;

/// Shell used when none is configured.
pub const DEFAULT_SHELL: &str = "sh";

/// Result of a shell command execution.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }
}

/// Run `command` with `sh -c` in `cwd`, killing it after `timeout_secs`.
pub async fn execute_shell(
    command: &str,
    cwd: &Path,
    timeout_secs: u64,
) -> Result<ExecResult, ExecError> {
    execute_shell_with(DEFAULT_SHELL, command, cwd, timeout_secs).await
}

/// Run `command` with `<shell> -c` in `cwd`, killing it after `timeout_secs`.
///
/// The child gets its own process group so that a timeout kills everything
/// it spawned, not just the shell. A timed-out run reports `exit_code: None`
/// and whatever output was captured before the kill.
pub async fn execute_shell_with(
    shell: &str,
    command: &str,
    cwd: &Path,
    timeout_secs: u64,
) -> Result<ExecResult, ExecError> {
    let mut child = Command::new(shell)
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .process_group(0)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ExecError::SpawnFailed(format!("{shell}: {e}")))?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ExecError::ProcessFailed("stdout not captured".into()))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| ExecError::ProcessFailed("stderr not captured".into()))?;

    // Drain both pipes concurrently so a chatty child never blocks on a full pipe.
    let mut stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf).await;
        buf
    });
    let mut stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr.read_to_end(&mut buf).await;
        buf
    });

    let pid = child.id();
    // One deadline covers the wait and both drains: background jobs can keep
    // the pipes open after the shell itself has exited.
    let deadline = Instant::now() + Duration::from_secs(timeout_secs);

    let (mut exit_code, mut timed_out) =
        match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => (status.code(), false),
            Ok(Err(e)) => return Err(ExecError::ProcessFailed(e.to_string())),
            Err(_) => (None, true),
        };

    let mut stdout_done = None;
    let mut stderr_done = None;
    if !timed_out {
        stdout_done = tokio::time::timeout_at(deadline, &mut stdout_task).await.ok();
        stderr_done = tokio::time::timeout_at(deadline, &mut stderr_task).await.ok();
        timed_out = stdout_done.is_none() || stderr_done.is_none();
    }

    if timed_out {
        tracing::warn!(command, timeout_secs, "Command timed out; killing process group");
        if let Some(pid) = pid {
            kill_group(pid);
        }
        // Reap the shell so it does not linger as a zombie.
        let _ = child.kill().await;
        exit_code = None;
    }

    let stdout = match stdout_done {
        Some(done) => done,
        None => stdout_task.await,
    }
    .map_err(|e| ExecError::ProcessFailed(format!("stdout reader failed: {e}")))?;
    let stderr = match stderr_done {
        Some(done) => done,
        None => stderr_task.await,
    }
    .map_err(|e| ExecError::ProcessFailed(format!("stderr reader failed: {e}")))?;

    Ok(ExecResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code,
        timed_out,
    })
}

/// SIGKILL every process in the group led by `pid`.
fn kill_group(pid: u32) {
    let pgid = nix::unistd::Pid::from_raw(pid as i32);
    if let Err(e) = nix::sys::signal::killpg(pgid, nix::sys::signal::Signal::SIGKILL) {
        tracing::debug!("killpg({pid}) failed: {e}");
    }
}
