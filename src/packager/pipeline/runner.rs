//! Step execution with streamed output.

use super::step::Step;
use super::tool_detection::resolve_tool;
use crate::cli::RuntimeConfig;
use crate::packager::error::{Error, Result};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Executes [`Step`]s one at a time.
///
/// Both stdout and stderr of the child are echoed line by line while it
/// runs. The runner waits for the child without a timeout; a step whose
/// exit status fails its [`SuccessCriteria`](super::SuccessCriteria) is an
/// error.
pub struct StepRunner<'a> {
    runtime: &'a RuntimeConfig,
}

impl<'a> StepRunner<'a> {
    /// Creates a runner reporting through `runtime`.
    pub fn new(runtime: &'a RuntimeConfig) -> Self {
        Self { runtime }
    }

    /// Runs `step` to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program is not on `PATH`
    /// - [`Error::Launch`] if spawning fails otherwise
    /// - [`Error::OutputStream`] if reading the child's output fails
    /// - [`Error::ToolFailed`] if the exit status is not a success
    pub async fn run(&self, step: &Step) -> Result<()> {
        self.runtime.progress(&format!("Running: {step}"));

        let program = resolve_tool(step.program())?;
        let mut command = Command::new(&program);
        command
            .args(step.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = step.working_dir() {
            command.current_dir(dir);
        }

        log::debug!("Spawning {} {:?}", program.display(), step.arguments());
        let mut child = command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::ToolNotFound {
                    tool: step.program().to_string(),
                }
            } else {
                Error::Launch {
                    tool: step.program().to_string(),
                    source,
                }
            }
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout_result, stderr_result) = tokio::join!(
            self.echo_lines(stdout),
            self.echo_lines(stderr)
        );

        if let Err(source) = stdout_result.and(stderr_result) {
            if let Err(e) = child.kill().await {
                log::warn!("Failed to kill {}: {}", step.program(), e);
            }
            return Err(Error::OutputStream {
                tool: step.program().to_string(),
                source,
            });
        }

        let status = child.wait().await.map_err(|source| Error::OutputStream {
            tool: step.program().to_string(),
            source,
        })?;
        log::debug!("{} finished with {}", step.program(), status);

        if !step.criteria().is_success(status) {
            return Err(Error::ToolFailed {
                step: step.name().to_string(),
                tool: step.program().to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }

    /// Echoes a pipe until EOF. Invalid UTF-8 is replaced, not fatal.
    async fn echo_lines<R>(&self, pipe: Option<R>) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let Some(pipe) = pipe else {
            return Ok(());
        };
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);
            self.runtime.indent(line.trim_end_matches(['\n', '\r']));
        }
    }
}
