use std::{
    io::Read,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    time::{Duration, Instant},
};

use crate::{
    export::bridge::RasterBridge,
    foundation::error::{SlideError, SlideResult},
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Rasterizes through an external converter process, e.g. `rsvg-convert`.
#[derive(Clone, Debug)]
pub struct CommandBridge {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandBridge {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

impl RasterBridge for CommandBridge {
    fn name(&self) -> &str {
        &self.program
    }

    fn probe(&self) -> bool {
        is_program_on_path(&self.program, self.timeout)
    }

    #[tracing::instrument(skip(self), fields(program = %self.program))]
    fn rasterize(&self, document: &Path, output: &Path) -> SlideResult<PathBuf> {
        let child = Command::new(&self.program)
            .args(self.expand_args(document, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SlideError::export(format!("failed to spawn '{}': {e}", self.program))
            })?;
        let mut guard = ChildGuard(Some(child));
        let stderr_drain = guard.0.as_mut().and_then(|c| c.stderr.take()).map(|mut stderr| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf);
                buf
            })
        });

        let status = wait_with_timeout(&mut guard, self.timeout).map_err(|e| match e {
            WaitError::Timeout => SlideError::export(format!(
                "'{}' did not finish within {} ms",
                self.program,
                self.timeout.as_millis()
            )),
            WaitError::Io(e) => {
                SlideError::export(format!("failed to wait for '{}': {e}", self.program))
            }
        })?;

        if !status.success() {
            let stderr = stderr_drain
                .and_then(|h| h.join().ok())
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default();
            return Err(SlideError::export(format!(
                "'{}' exited with status {}: {}",
                self.program,
                status,
                stderr.trim()
            )));
        }
        if !output.is_file() {
            return Err(SlideError::export(format!(
                "'{}' reported success but wrote no file at '{}'",
                self.program,
                output.display()
            )));
        }
        Ok(output.to_path_buf())
    }
}

/// Kills and reaps the child when dropped unless it already exited.
struct ChildGuard(Option<Child>);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.0.take()
            && matches!(child.try_wait(), Ok(None))
        {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

enum WaitError {
    Timeout,
    Io(std::io::Error),
}

fn wait_with_timeout(guard: &mut ChildGuard, timeout: Duration) -> Result<ExitStatus, WaitError> {
    let Some(child) = guard.0.as_mut() else {
        return Err(WaitError::Io(std::io::Error::other("child already reaped")));
    };
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(WaitError::Io)? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            return Err(WaitError::Timeout);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Return `true` when `program --version` exits successfully within `timeout`.
pub fn is_program_on_path(program: &str, timeout: Duration) -> bool {
    let child = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let Ok(child) = child else {
        return false;
    };
    let mut guard = ChildGuard(Some(child));
    match wait_with_timeout(&mut guard, timeout) {
        Ok(status) => status.success(),
        Err(WaitError::Timeout) => {
            tracing::warn!(program, "version probe timed out");
            false
        }
        Err(WaitError::Io(_)) => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/command.rs"]
mod tests;
