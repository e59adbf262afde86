// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use openssl_recipe::recipe::{BuildRunner, BuildStep, StepOutput};
use openssl_recipe::{KitchenConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Runner that records every step and fakes OpenSSL's install layout.
///
/// Once Configure has run, the `install` phase writes `lib/libssl.so`, `lib/libssl.la`,
/// `lib/pkgconfig/openssl.pc` and `lib/engines-3/afalg.la` under the
/// `--prefix` passed to Configure.
#[derive(Default)]
pub struct FakeOpenSslRunner {
    pub steps: Mutex<Vec<BuildStep>>,
    pub fail_phase: Option<&'static str>,
    prefix: Mutex<Option<PathBuf>>,
}

impl FakeOpenSslRunner {
    pub fn failing(phase: &'static str) -> Self {
        Self {
            fail_phase: Some(phase),
            ..Self::default()
        }
    }

    pub fn phases(&self) -> Vec<String> {
        self.steps
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.phase.clone())
            .collect()
    }

    pub fn step(&self, phase: &str) -> Option<BuildStep> {
        self.steps
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.phase == phase)
            .cloned()
    }
}

impl BuildRunner for FakeOpenSslRunner {
    fn run(&self, step: &BuildStep) -> Result<StepOutput> {
        self.steps.lock().unwrap().push(step.clone());

        if self.fail_phase == Some(step.phase.as_str()) {
            return Ok(StepOutput {
                code: Some(2),
                stdout: String::new(),
                stderr: format!("{}: *** Error 2", step.program),
            });
        }

        if let Some(prefix) = step.args.iter().find_map(|a| a.strip_prefix("--prefix=")) {
            *self.prefix.lock().unwrap() = Some(PathBuf::from(prefix));
        }

        if step.phase == "install" {
            if let Some(prefix) = self.prefix.lock().unwrap().as_deref() {
                fake_install(prefix);
            }
        }

        Ok(StepOutput {
            code: Some(0),
            stdout: format!("{} done", step.phase),
            stderr: String::new(),
        })
    }
}

/// Lay out an install tree the way `make install_sw` does
pub fn fake_install(prefix: &Path) {
    let lib = prefix.join("lib");
    fs::create_dir_all(lib.join("pkgconfig")).unwrap();
    fs::create_dir_all(lib.join("engines-3")).unwrap();
    fs::create_dir_all(prefix.join("include/openssl")).unwrap();
    fs::write(lib.join("libssl.so"), b"elf").unwrap();
    fs::write(lib.join("libssl.la"), b"# libtool").unwrap();
    fs::write(lib.join("pkgconfig/openssl.pc"), b"Name: OpenSSL").unwrap();
    fs::write(lib.join("engines-3/afalg.la"), b"# libtool").unwrap();
    fs::write(prefix.join("include/openssl/ssl.h"), b"/* ssl */").unwrap();
}

/// Write a recipe file into a temp directory.
///
/// Returns (TempDir, recipe_path) - keep the TempDir alive to prevent cleanup.
pub fn write_recipe(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("openssl.toml");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// Recipe for the given settings table body
pub fn recipe_toml(settings: &str, options: &str) -> String {
    format!(
        r#"[package]
name = "openssl"
version = "3.2.0"
description = "TLS/SSL and crypto library"
license = "Apache-2.0"

[settings]
{settings}

[options]
{options}
"#
    )
}

/// Kitchen config rooted in a temp directory with no ambient environment
pub fn kitchen_config(root: &Path) -> KitchenConfig {
    let source_dir = root.join("openssl-3.2.0");
    fs::create_dir_all(&source_dir).unwrap();
    KitchenConfig {
        source_dir,
        package_dir: root.join("package"),
        jobs: 4,
        ..KitchenConfig::default()
    }
}
