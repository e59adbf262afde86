// src/recipe/kitchen/plan.rs

//! Build plan: everything decided before a process is spawned

use super::runner::{shell_quote, BuildStep};
use crate::platform::{ConfigureTarget, Platform};
use crate::recipe::flags::FlagSet;
use serde::Serialize;
use std::path::PathBuf;

/// Resolved target, configure arguments and flag environment for one build
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    /// Platform compiler flags were assembled for
    pub platform: Platform,
    /// Platform the Configure target was resolved from
    pub target_platform: Platform,
    pub target: ConfigureTarget,
    /// Package options, library options, then target tokens
    pub configure_args: Vec<String>,
    pub env: FlagSet,
    pub source_dir: PathBuf,
    pub package_dir: PathBuf,
    pub jobs: u32,
}

impl BuildPlan {
    /// Configure arguments, each single-quoted, space separated
    pub fn args_string(&self) -> String {
        self.configure_args
            .iter()
            .map(|a| shell_quote(a))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn jobs_arg(&self) -> String {
        format!("-j{}", self.jobs)
    }

    /// `./Configure <args>`
    pub fn configure_step(&self) -> BuildStep {
        BuildStep::new("configure", "./Configure", &self.source_dir)
            .args(self.configure_args.iter().cloned())
            .envs(self.env.to_env())
    }

    /// `make -j<jobs>`
    pub fn make_step(&self) -> BuildStep {
        BuildStep::new("make", "make", &self.source_dir)
            .args([self.jobs_arg()])
            .envs(self.env.to_env())
    }

    /// `make install_sw install_ssldirs -j<jobs>`
    pub fn install_step(&self) -> BuildStep {
        BuildStep::new("install", "make", &self.source_dir)
            .args(["install_sw".to_string(), "install_ssldirs".to_string(), self.jobs_arg()])
            .envs(self.env.to_env())
    }
}
