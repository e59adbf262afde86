// src/commands/target.rs

//! Target commands - inspect the Configure target table

use anyhow::{Context, Result};
use openssl_recipe::platform::supported_targets;
use openssl_recipe::{resolve, Arch, Compiler, Os, Platform, Sdk};

/// Resolve and print the Configure target for one platform
pub fn cmd_target(os: &str, arch: &str, compiler: &str, sdk: Option<&str>) -> Result<()> {
    let os: Os = os.parse()?;
    let arch: Arch = arch.parse()?;
    let compiler: Compiler = compiler.parse()?;

    let mut platform = Platform::new(os, arch, compiler);
    if let Some(sdk) = sdk {
        platform = platform.with_sdk(sdk.parse::<Sdk>()?);
    }

    let target = resolve(&platform)
        .with_context(|| format!("No Configure target for {}", platform))?;
    println!("{}", target);
    Ok(())
}

/// Print the full target table
pub fn cmd_targets() -> Result<()> {
    println!("{:<8} {:<8} {:<16} TARGET", "OS", "ARCH", "SDK");
    for rule in supported_targets() {
        println!("{}", rule);
    }
    println!("{:<8} {:<8} {:<16} linux-armv4 -march=<arch>", "Linux", "arm*", "*");
    Ok(())
}
