// src/commands/cook.rs

//! Cook command - build OpenSSL from a recipe

use super::kitchen_config;
use crate::cli::KitchenArgs;
use anyhow::{Context, Result};
use openssl_recipe::recipe::{parse_recipe_file, validate_recipe};
use openssl_recipe::{resolve, Kitchen, Recipe};
use std::path::Path;
use tracing::info;

/// Which part of the cook to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookMode {
    /// Configure, make and install
    Full,
    /// Configure and make
    BuildOnly,
    /// Install only
    PackageOnly,
}

fn load_recipe(recipe_path: &str) -> Result<(Recipe, Vec<String>)> {
    let recipe_path = Path::new(recipe_path);
    let recipe = parse_recipe_file(recipe_path)
        .with_context(|| format!("Failed to parse recipe: {}", recipe_path.display()))?;
    let warnings = validate_recipe(&recipe).with_context(|| "Recipe validation failed")?;
    Ok((recipe, warnings))
}

/// Cook OpenSSL from a recipe
pub fn cmd_cook(recipe_path: &str, args: &KitchenArgs, mode: CookMode) -> Result<()> {
    println!("Reading recipe: {}", recipe_path);
    let (recipe, warnings) = load_recipe(recipe_path)?;
    for warning in &warnings {
        println!("Warning: {}", warning);
    }

    let config = kitchen_config(args);
    std::fs::create_dir_all(&config.package_dir).with_context(|| {
        format!(
            "Failed to create package directory: {}",
            config.package_dir.display()
        )
    })?;

    let kitchen = Kitchen::new(config);
    println!(
        "Cooking {} for {} with {} parallel jobs...",
        recipe.label(),
        recipe.target_platform(),
        kitchen.config().jobs
    );

    let result = match mode {
        CookMode::Full => kitchen.cook(&recipe),
        CookMode::BuildOnly => kitchen.build(&recipe),
        CookMode::PackageOnly => kitchen.package(&recipe),
    }
    .with_context(|| format!("Failed to cook {}", recipe.label()))?;

    println!("\n[COMPLETE] Configure target: {}", result.plan.target);
    if mode != CookMode::BuildOnly {
        println!("Installed to: {}", result.plan.package_dir.display());
        if !result.removed_archives.is_empty() {
            println!("Removed {} libtool archive(s)", result.removed_archives.len());
        }
    }

    if !result.warnings.is_empty() {
        println!("\nBuild warnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    info!("Successfully cooked {}", recipe.label());
    Ok(())
}

/// Validate a recipe and print its warnings
pub fn cmd_check(recipe_path: &str) -> Result<()> {
    let (recipe, warnings) = load_recipe(recipe_path)?;

    println!("Recipe: {} for {}", recipe.label(), recipe.target_platform());
    let target = resolve(recipe.target_platform())
        .with_context(|| format!("No Configure target for {}", recipe.target_platform()))?;
    println!("Configure target: {}", target);

    for warning in &warnings {
        println!("Warning: {}", warning);
    }

    if warnings.is_empty() {
        println!("[OK] No issues found");
    } else {
        println!("[OK] {} warning(s)", warnings.len());
    }
    Ok(())
}
