// src/recipe/kitchen/cook.rs

//! Cook: the actual build execution for a single plan

use super::cleanup::{remove_files_by_mask, LIBTOOL_ARCHIVE_MASK};
use super::plan::BuildPlan;
use super::runner::BuildStep;
use super::Kitchen;
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A single cook operation
pub struct Cook<'a> {
    pub(super) kitchen: &'a Kitchen,
    pub(super) plan: &'a BuildPlan,
    /// Build log accumulator
    pub(super) log: String,
    /// Warnings
    pub(super) warnings: Vec<String>,
}

impl<'a> Cook<'a> {
    pub(super) fn new(kitchen: &'a Kitchen, plan: &'a BuildPlan) -> Self {
        Self {
            kitchen,
            plan,
            log: String::new(),
            warnings: Vec::new(),
        }
    }

    /// Phase 1: run `Configure` with the resolved target and options
    pub(super) fn configure(&mut self) -> Result<()> {
        info!("configure-args: {}", self.plan.args_string());
        for (var, value) in self.plan.env.to_env() {
            debug!("{}={}", var, value);
        }
        self.run_build_step(self.plan.configure_step())
    }

    /// Phase 2: Simmer - run make
    pub(super) fn simmer(&mut self) -> Result<()> {
        self.run_build_step(self.plan.make_step())
    }

    /// Phase 3: Plate - install into the package directory and drop
    /// libtool archives
    pub(super) fn plate(&mut self) -> Result<Vec<PathBuf>> {
        self.run_build_step(self.plan.install_step())?;

        let mut removed = Vec::new();
        let mut found_libdir = false;
        for dir in &self.kitchen.config.library_dirs {
            let libdir = self.plan.package_dir.join(dir);
            found_libdir |= libdir.is_dir();
            removed.extend(remove_files_by_mask(&libdir, LIBTOOL_ARCHIVE_MASK)?);
        }

        if !found_libdir {
            let msg = format!(
                "No library directory ({}) under {}",
                self.kitchen.config.library_dirs.join(", "),
                self.plan.package_dir.display()
            );
            warn!("{}", msg);
            self.warnings.push(msg);
        }

        if !removed.is_empty() {
            info!("Removed {} libtool archive(s)", removed.len());
            self.log_line(&format!("Removed {} libtool archive(s)", removed.len()));
        }

        Ok(removed)
    }

    /// Run a build step, failing on a non-zero exit
    fn run_build_step(&mut self, step: BuildStep) -> Result<()> {
        info!("Running {} phase", step.phase);
        let command = step.command_line();
        debug!("Command: {}", command);

        let output = self.kitchen.runner.run(&step)?;
        self.log_build_output(&step.phase, &output.stdout, &output.stderr);

        if !output.success() {
            return Err(Error::CommandFailed {
                phase: step.phase,
                command,
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(())
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    /// Log build step output (stdout/stderr) with a phase header
    fn log_build_output(&mut self, phase: &str, stdout: &str, stderr: &str) {
        self.log_line(&format!("=== {} ===", phase));
        if !stdout.is_empty() {
            self.log.push_str(stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(stderr);
            self.log.push('\n');
        }
    }
}
