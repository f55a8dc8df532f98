// src/compiler/invoker.rs
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::config::CompilerConfig;
use crate::errors::Result;

use super::workspace::ScratchWorkspace;

/// Captured outcome of one engine subprocess run.
///
/// A non-zero exit code is not treated as fatal here: pdflatex routinely
/// exits non-zero on recoverable warnings while still producing a usable
/// PDF. The extractor decides success by looking for the output file.
#[derive(Debug)]
pub struct EngineRun {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

/// Writes `source` to the workspace's `.tex` file and runs the engine
/// against it with a bounded execution budget.
///
/// The child runs in batch mode (`-interaction=nonstopmode`) so it never
/// blocks on interactive prompts, with MiKTeX's update check suppressed to
/// avoid network stalls. On timeout the whole process group is killed and
/// the run is marked `timed_out`.
pub async fn run(
    config: &CompilerConfig,
    workspace: &ScratchWorkspace,
    source: &str,
) -> Result<EngineRun> {
    tokio::fs::write(workspace.tex_path(), source).await?;

    let mut command = Command::new(&config.engine_bin);
    command
        .arg("-interaction=nonstopmode")
        .arg("-output-directory")
        .arg(workspace.root())
        .arg(workspace.tex_path())
        .current_dir(workspace.root())
        .env("MIKTEX_DISABLE_UPDATE_CHECK", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Own process group, so a timeout kill also reaps engine helpers.
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command.spawn()?;

    // Drain the pipes concurrently with waiting, otherwise a chatty engine
    // can fill the pipe buffer and deadlock against our wait().
    let stdout_task = tokio::spawn(read_to_end(child.stdout.take()));
    let stderr_task = tokio::spawn(read_to_end(child.stderr.take()));

    let (exit_code, timed_out) = match tokio::time::timeout(config.timeout, child.wait()).await {
        Ok(status) => (status?.code(), false),
        Err(_) => {
            log::warn!(
                "Engine exceeded its {}s budget, killing process group",
                config.timeout.as_secs()
            );
            terminate(&mut child).await;
            (None, true)
        }
    };

    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    Ok(EngineRun {
        exit_code,
        stdout,
        stderr,
        timed_out,
    })
}

async fn read_to_end<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut buf).await;
    }
    buf
}

/// Forcibly terminates a timed-out engine run. The group signal catches any
/// helper processes the engine spawned; the direct kill reaps the child.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        unsafe {
            libc::killpg(pid as libc::pid_t, libc::SIGKILL);
        }
    }

    if let Err(e) = child.kill().await {
        log::warn!("Failed to kill timed-out engine process: {}", e);
    }
}
