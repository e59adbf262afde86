// src/cli.rs
//! CLI definitions for openssl-recipe
//!
//! Only clap types live here so `build.rs` can render the man page from
//! the same definitions. Command implementations are in `commands`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "openssl-recipe")]
#[command(author = "openssl-recipe Contributors")]
#[command(version)]
#[command(about = "Build OpenSSL for a target platform with its own Configure/make", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the build runs and where it installs
#[derive(Args, Clone, Debug)]
pub struct KitchenArgs {
    /// OpenSSL source directory (contains Configure)
    #[arg(short, long, default_value = ".")]
    pub source_dir: String,

    /// Install prefix for the packaged build
    #[arg(short, long, default_value = "package")]
    pub package_dir: String,

    /// Parallel make jobs (default: CPU count)
    #[arg(short, long)]
    pub jobs: Option<u32>,

    /// Sysroot for cross builds (default: $SYSROOT)
    #[arg(long)]
    pub sysroot: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure, build and install OpenSSL from a recipe
    Cook {
        /// Path to the recipe file
        recipe: String,

        #[command(flatten)]
        kitchen: KitchenArgs,

        /// Stop after make; do not install
        #[arg(long, conflicts_with = "package_only")]
        build_only: bool,

        /// Only install an already built tree
        #[arg(long)]
        package_only: bool,
    },

    /// Show the Configure arguments and flag environment for a recipe
    Plan {
        /// Path to the recipe file
        recipe: String,

        #[command(flatten)]
        kitchen: KitchenArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the OpenSSL Configure target for a platform
    Target {
        /// Operating system (Linux, Macos, Windows, Android, iOS, ...)
        #[arg(long)]
        os: String,

        /// Architecture (x86, x86_64, armv7, armv8, ...)
        #[arg(long)]
        arch: String,

        /// Compiler (gcc, clang, apple-clang, msvc)
        #[arg(long, default_value = "gcc")]
        compiler: String,

        /// Apple SDK (iphoneos, iphonesimulator, ...)
        #[arg(long)]
        sdk: Option<String>,
    },

    /// List every supported platform and its Configure target
    Targets,

    /// Validate a recipe file
    Check {
        /// Path to the recipe file
        recipe: String,
    },
}
