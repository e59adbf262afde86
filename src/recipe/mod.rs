// src/recipe/mod.rs

//! Recipe system for building OpenSSL from its vendored sources
//!
//! A recipe names the package, the platform settings it is built for and
//! the `shared`/`fPIC` options. The Kitchen turns it into a build:
//!
//! # Culinary Terminology
//!
//! - **Recipe**: The build description
//! - **Cook**: Configure, build and install a recipe
//! - **Kitchen**: Holds the configuration and the process runner
//! - **Simmer**: The `make` step
//! - **Plate**: Install into the package directory and tidy it
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "openssl"
//! version = "3.2.0"
//!
//! [settings]
//! os = "Android"
//! arch = "armv8"
//! compiler = "clang"
//!
//! [options]
//! shared = false
//! fPIC = true
//! ```

pub mod flags;
mod format;
mod kitchen;
pub mod parser;

pub use flags::{AmbientEnv, BuildFlags, FlagSet};
pub use format::{OptionsSection, PackageSection, Recipe};
pub use kitchen::{
    remove_files_by_mask, BuildPlan, BuildRunner, BuildStep, Cook, CookResult, Kitchen,
    KitchenConfig, StepOutput, SystemRunner, LIBTOOL_ARCHIVE_MASK,
};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};
