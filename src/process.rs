//! External tool invocations (`wasm-pack`, `cargo`).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// A fully described child process. Built by `tasks`, executed by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: &'static str) -> Self {
        Self { program, args: Vec::new(), current_dir: None, envs: Vec::new() }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.envs.push((key.to_owned(), value.into()));
        self
    }

    /// Shell-like rendering for logs and errors.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.to_owned())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run to completion with inherited stdio.
///
/// # Errors
///
/// `ToolMissing` if the program is not on `PATH`, `CommandFailed` on a
/// non-zero exit, `Io` for any other spawn failure.
pub async fn run(invocation: &Invocation) -> Result<(), CliError> {
    let mut cmd = tokio::process::Command::new(invocation.program);
    cmd.args(&invocation.args);
    if let Some(dir) = &invocation.current_dir {
        cmd.current_dir(dir);
    }
    cmd.envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let command = invocation.display();
    tracing::info!(%command, "executing");
    let status = cmd.status().await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => CliError::ToolMissing(invocation.program),
        _ => CliError::Io(e),
    })?;
    if !status.success() {
        return Err(CliError::CommandFailed { command, status });
    }
    Ok(())
}

#[cfg(test)]
#[path = "process_test.rs"]
mod tests;
