// src/recipe/kitchen/runner.rs

//! Process execution for build steps
//!
//! The Kitchen never spawns processes itself; it hands a [`BuildStep`] to a
//! [`BuildRunner`]. [`SystemRunner`] is the real implementation.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// One external command in a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    /// Phase name for logs and errors (`configure`, `make`, `install`)
    pub phase: String,
    /// Program to run; a path containing `/` is relative to `workdir`
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
    /// Variables added to the inherited environment
    pub env: Vec<(String, String)>,
}

impl BuildStep {
    pub fn new(phase: &str, program: &str, workdir: &Path) -> Self {
        Self {
            phase: phase.to_string(),
            program: program.to_string(),
            args: Vec::new(),
            workdir: workdir.to_path_buf(),
            env: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    /// The command as a shell would read it, every argument single-quoted
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        line
    }
}

/// Single-quote an argument for display
pub fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Captured result of a finished step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutput {
    /// Exit code; `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes build steps
///
/// Returning `Ok` with a failing [`StepOutput`] is how a process failure is
/// reported; `Err` is reserved for failing to launch at all.
pub trait BuildRunner: Send + Sync {
    fn run(&self, step: &BuildStep) -> Result<StepOutput>;
}

/// Runs steps as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn resolve_program(step: &BuildStep) -> Result<PathBuf> {
        if step.program.contains('/') {
            let path = step.workdir.join(&step.program);
            if !path.exists() {
                return Err(Error::NotFound(format!(
                    "{} not found in {}",
                    step.program,
                    step.workdir.display()
                )));
            }
            return Ok(path);
        }

        which::which(&step.program)
            .map_err(|e| Error::ToolNotFound(format!("{}: {}", step.program, e)))
    }
}

impl BuildRunner for SystemRunner {
    fn run(&self, step: &BuildStep) -> Result<StepOutput> {
        let program = Self::resolve_program(step)?;
        debug!("Spawning {} in {}", program.display(), step.workdir.display());

        let output = Command::new(&program)
            .args(&step.args)
            .current_dir(&step.workdir)
            .envs(step.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to run {} phase: {}", step.phase, e),
                ))
            })?;

        Ok(StepOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_args() {
        let step = BuildStep::new("configure", "./Configure", Path::new("/src"))
            .args(["enable-pic", "--prefix=/pkg dir"]);
        assert_eq!(
            step.command_line(),
            "./Configure 'enable-pic' '--prefix=/pkg dir'"
        );
    }

    #[test]
    fn test_shell_quote_escapes_single_quote() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_missing_relative_program() {
        let dir = tempfile::tempdir().unwrap();
        let step = BuildStep::new("configure", "./Configure", dir.path());
        let err = SystemRunner.run(&step).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_missing_tool_on_path() {
        let dir = tempfile::tempdir().unwrap();
        let step = BuildStep::new("make", "definitely-not-a-real-make-binary", dir.path());
        let err = SystemRunner.run(&step).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_script_with_env_and_captures_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("Configure");
        std::fs::write(&script, "#!/bin/sh\necho \"$CFLAGS $1\"\necho oops >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let step = BuildStep::new("configure", "./Configure", dir.path())
            .args(["linux-x86_64"])
            .envs(vec![("CFLAGS".to_string(), "-fPIC".to_string())]);
        let output = SystemRunner.run(&step).unwrap();

        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "-fPIC linux-x86_64");
        assert_eq!(output.stderr.trim(), "oops");
    }
}
