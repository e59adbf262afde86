// src/lib.rs

//! openssl-recipe
//!
//! Builds OpenSSL from its vendored sources for a given platform by
//! driving OpenSSL's own `Configure`/`make` toolchain.
//!
//! # Architecture
//!
//! - `platform`: platform descriptors and the Configure target table
//! - `recipe`: recipe files, flag assembly and the Kitchen that runs the
//!   build and install steps

mod error;
pub mod platform;
pub mod recipe;

pub use error::{Error, Result};
pub use platform::{resolve, Arch, BuildType, Compiler, ConfigureTarget, Os, Platform, Sdk};
pub use recipe::{Cook, CookResult, Kitchen, KitchenConfig, Recipe};
