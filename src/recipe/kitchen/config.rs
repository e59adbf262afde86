// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen build system

use crate::recipe::flags::{sysroot_from_env, AmbientEnv};
use crate::recipe::kitchen::plan::BuildPlan;
use std::path::PathBuf;

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Unpacked OpenSSL source tree (contains `Configure`)
    pub source_dir: PathBuf,
    /// Install prefix handed to `Configure --prefix`
    pub package_dir: PathBuf,
    /// Number of parallel make jobs
    pub jobs: u32,
    /// Sysroot supplied by the orchestrator for cross builds
    pub sysroot: Option<PathBuf>,
    /// Root that replaces the source directory in debug info
    pub prefix_map_root: String,
    /// Compiler flags inherited from the invoking environment
    pub ambient: AmbientEnv,
    /// Library directories below the prefix scrubbed of libtool archives
    pub library_dirs: Vec<String>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            source_dir: PathBuf::from("."),
            package_dir: PathBuf::from("package"),
            jobs,
            sysroot: None,
            prefix_map_root: "pkg".to_string(),
            ambient: AmbientEnv::default(),
            // OpenSSL installs into lib64 on some 64-bit Linux profiles
            library_dirs: vec!["lib".to_string(), "lib64".to_string()],
        }
    }
}

impl KitchenConfig {
    /// Default configuration plus ambient `*FLAGS` and `SYSROOT` from the
    /// process environment
    pub fn from_env() -> Self {
        Self {
            ambient: AmbientEnv::from_env(),
            sysroot: sysroot_from_env(),
            ..Self::default()
        }
    }
}

/// Result of cooking a recipe
#[derive(Debug)]
pub struct CookResult {
    /// The plan that was executed
    pub plan: BuildPlan,
    /// Build log (captured process output per phase)
    pub log: String,
    /// Libtool archives deleted after install
    pub removed_archives: Vec<PathBuf>,
    /// Warnings generated during build
    pub warnings: Vec<String>,
}
