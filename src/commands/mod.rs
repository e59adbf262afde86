// src/commands/mod.rs
//! Command implementations for the openssl-recipe CLI

mod cook;
mod plan;
mod target;

pub use cook::{cmd_check, cmd_cook, CookMode};
pub use plan::cmd_plan;
pub use target::{cmd_target, cmd_targets};

use crate::cli::KitchenArgs;
use openssl_recipe::KitchenConfig;
use std::path::PathBuf;

/// Environment-derived config with CLI overrides applied
fn kitchen_config(args: &KitchenArgs) -> KitchenConfig {
    let mut config = KitchenConfig::from_env();
    config.source_dir = PathBuf::from(&args.source_dir);
    config.package_dir = PathBuf::from(&args.package_dir);
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if let Some(sysroot) = &args.sysroot {
        config.sysroot = Some(PathBuf::from(sysroot));
    }
    config
}
