// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a TOML file describing one OpenSSL build: package metadata,
//! the platform settings it is built for, and the package options that
//! shape the configure flags.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};

/// A complete recipe for building OpenSSL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Platform the build runs for
    pub settings: Platform,

    /// Platform the built artifacts target, when cross-building a tool
    ///
    /// Only the Configure target follows this; compiler and linker flags
    /// are still assembled for `settings`.
    #[serde(default)]
    pub settings_target: Option<Platform>,

    /// Package options
    #[serde(default)]
    pub options: OptionsSection,
}

impl Recipe {
    /// Platform used to pick the Configure target
    pub fn target_platform(&self) -> &Platform {
        self.settings_target.as_ref().unwrap_or(&self.settings)
    }

    /// Whether the recipe builds for a different target than it runs on
    pub fn is_cross_target(&self) -> bool {
        self.settings_target
            .as_ref()
            .is_some_and(|t| *t != self.settings)
    }

    /// `name-version`, used in log lines
    pub fn label(&self) -> String {
        format!("{}-{}", self.package.name, self.package.version)
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Package options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Build shared libraries (`enable-shared`) instead of static ones
    #[serde(default = "default_true")]
    pub shared: bool,

    /// Build position-independent code
    #[serde(rename = "fPIC", default = "default_true")]
    pub fpic: bool,
}

impl Default for OptionsSection {
    fn default() -> Self {
        Self {
            shared: true,
            fpic: true,
        }
    }
}

fn default_true() -> bool {
    true
}
