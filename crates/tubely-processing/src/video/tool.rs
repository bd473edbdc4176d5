//! Subprocess runner shared by the ffprobe and ffmpeg wrappers.

use std::ffi::OsStr;
use std::io;
use std::process::{Output, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub(crate) enum ToolError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Run `program` to completion and capture its output.
///
/// The child is killed if the returned future is dropped or the timeout elapses.
pub(crate) async fn run<I, S>(
    program: &str,
    args: I,
    timeout: Option<Duration>,
) -> Result<Output, ToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                return Err(ToolError::TimedOut {
                    program: program.to_string(),
                    timeout: limit,
                })
            }
        },
        None => command.output().await,
    }
    .map_err(|source| ToolError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

/// `0` disables the timeout.
pub(crate) fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Write an executable that ignores its arguments and sleeps, standing in for a stuck
/// ffmpeg or ffprobe.
#[cfg(all(test, unix))]
pub(crate) fn stalled_tool(dir: &std::path::Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("stalled-tool");
    std::fs::write(&path, "#!/bin/sh\nexec sleep 30\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
