// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::platform::Os;
use crate::recipe::format::Recipe;
use std::path::Path;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "Recipe file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    parse_recipe(&content)
}

/// Validate a recipe for completeness and correctness
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.trim().is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if recipe.package.version.trim().is_empty() {
        return Err(Error::ParseError("Recipe package version cannot be empty".to_string()));
    }

    // The prefix map embeds the name in every object file
    if recipe.package.name.contains(['"', '/', ' ']) {
        return Err(Error::ParseError(format!(
            "Recipe package name '{}' may not contain quotes, slashes or spaces",
            recipe.package.name
        )));
    }

    if recipe.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }

    if recipe.settings.os == Os::Windows && recipe.options.fpic {
        warnings.push("fPIC has no effect on Windows".to_string());
    } else if recipe.settings.os != Os::Windows
        && recipe.options.shared
        && !recipe.options.fpic
    {
        warnings.push(
            "fPIC = false is overridden for shared builds; objects are still compiled with -fPIC"
                .to_string(),
        );
    }

    Ok(warnings)
}
