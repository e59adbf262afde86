// src/commands/plan.rs

//! Plan command - show what a cook would run

use super::kitchen_config;
use crate::cli::KitchenArgs;
use anyhow::{Context, Result};
use openssl_recipe::recipe::parse_recipe_file;
use openssl_recipe::Kitchen;
use std::path::Path;

/// Print the Configure arguments and flag environment for a recipe
pub fn cmd_plan(recipe_path: &str, args: &KitchenArgs, json: bool) -> Result<()> {
    let recipe = parse_recipe_file(Path::new(recipe_path))
        .with_context(|| format!("Failed to parse recipe: {}", recipe_path))?;

    let kitchen = Kitchen::new(kitchen_config(args));
    let plan = kitchen
        .plan(&recipe)
        .with_context(|| format!("Failed to plan {}", recipe.label()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Recipe:    {}", recipe.label());
    println!("Platform:  {}", plan.platform);
    if plan.target_platform != plan.platform {
        println!("Target:    {}", plan.target_platform);
    }
    println!("Configure: {}", plan.target);
    println!("Jobs:      {}", plan.jobs);
    println!();
    println!("./Configure {}", plan.args_string());
    println!();
    for (var, value) in plan.env.to_env() {
        println!("{}={}", var, value);
    }

    Ok(())
}
