// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CookMode;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Cook {
            recipe,
            kitchen,
            build_only,
            package_only,
        }) => {
            let mode = if build_only {
                CookMode::BuildOnly
            } else if package_only {
                CookMode::PackageOnly
            } else {
                CookMode::Full
            };
            commands::cmd_cook(&recipe, &kitchen, mode)
        }
        Some(Commands::Plan {
            recipe,
            kitchen,
            json,
        }) => commands::cmd_plan(&recipe, &kitchen, json),
        Some(Commands::Target {
            os,
            arch,
            compiler,
            sdk,
        }) => commands::cmd_target(&os, &arch, &compiler, sdk.as_deref()),
        Some(Commands::Targets) => commands::cmd_targets(),
        Some(Commands::Check { recipe }) => commands::cmd_check(&recipe),
        None => {
            // No command provided, show help
            println!("openssl-recipe v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'openssl-recipe --help' for usage information");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cook_flags() {
        let cli = Cli::try_parse_from([
            "openssl-recipe",
            "cook",
            "openssl.toml",
            "--source-dir",
            "/src",
            "--jobs",
            "8",
            "--build-only",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Cook {
                recipe,
                kitchen,
                build_only,
                package_only,
            }) => {
                assert_eq!(recipe, "openssl.toml");
                assert_eq!(kitchen.source_dir, "/src");
                assert_eq!(kitchen.package_dir, "package");
                assert_eq!(kitchen.jobs, Some(8));
                assert!(build_only);
                assert!(!package_only);
            }
            _ => panic!("expected cook command"),
        }
    }

    #[test]
    fn test_build_only_conflicts_with_package_only() {
        let result = Cli::try_parse_from([
            "openssl-recipe",
            "cook",
            "openssl.toml",
            "--build-only",
            "--package-only",
        ]);
        assert!(result.is_err());
    }
}
