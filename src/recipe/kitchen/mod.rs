// src/recipe/kitchen/mod.rs

//! Kitchen: drives OpenSSL's own build system for a recipe
//!
//! Cooking runs four steps strictly in order, stopping at the first
//! failure:
//! - Resolve the Configure target for the recipe's platform
//! - Assemble configure options and compiler/linker flags
//! - Run `./Configure` and `make`
//! - Run `make install_sw install_ssldirs` and drop libtool archives

mod cleanup;
mod config;
mod cook;
mod plan;
pub mod runner;

pub use cleanup::{remove_files_by_mask, LIBTOOL_ARCHIVE_MASK};
pub use config::{CookResult, KitchenConfig};
pub use cook::Cook;
pub use plan::BuildPlan;
pub use runner::{BuildRunner, BuildStep, StepOutput, SystemRunner};

use crate::error::Result;
use crate::platform::resolve;
use crate::recipe::flags::{assemble, library_options, FlagInputs};
use crate::recipe::format::Recipe;
use std::path::absolute;
use std::sync::Arc;
use tracing::info;

/// The Kitchen: where recipes are cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    runner: Arc<dyn BuildRunner>,
}

impl Kitchen {
    /// Create a new Kitchen that spawns real processes
    pub fn new(config: KitchenConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    /// Create a new Kitchen with a custom process runner
    pub fn with_runner(config: KitchenConfig, runner: Arc<dyn BuildRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Resolve the target and assemble flags without running anything
    pub fn plan(&self, recipe: &Recipe) -> Result<BuildPlan> {
        let target_platform = *recipe.target_platform();
        let target = resolve(&target_platform)?;

        let source_dir = absolute(&self.config.source_dir)?;
        let package_dir = absolute(&self.config.package_dir)?;
        let mapped_source = format!(
            "{}/{}",
            self.config.prefix_map_root, recipe.package.name
        );

        let flags = assemble(&FlagInputs {
            platform: &recipe.settings,
            options: recipe.options,
            ambient: &self.config.ambient,
            source_dir: &source_dir,
            mapped_source: &mapped_source,
            sysroot: self.config.sysroot.as_deref(),
        });

        let mut configure_args = flags.options;
        configure_args.extend(library_options(&package_dir));
        configure_args.extend(target.tokens().iter().cloned());

        Ok(BuildPlan {
            platform: recipe.settings,
            target_platform,
            target,
            configure_args,
            env: flags.env,
            source_dir,
            package_dir,
            jobs: self.config.jobs,
        })
    }

    /// Configure and compile
    pub fn build(&self, recipe: &Recipe) -> Result<CookResult> {
        let plan = self.plan(recipe)?;
        info!(
            "Building {} for {} (target {})",
            recipe.label(),
            plan.target_platform,
            plan.target
        );

        let mut cook = Cook::new(self, &plan);
        cook.configure()?;
        cook.simmer()?;

        let (log, warnings) = (cook.log, cook.warnings);
        Ok(CookResult {
            plan,
            log,
            removed_archives: Vec::new(),
            warnings,
        })
    }

    /// Install a finished build into the package directory
    pub fn package(&self, recipe: &Recipe) -> Result<CookResult> {
        let plan = self.plan(recipe)?;
        info!(
            "Packaging {} into {}",
            recipe.label(),
            plan.package_dir.display()
        );

        let mut cook = Cook::new(self, &plan);
        let removed_archives = cook.plate()?;

        let (log, warnings) = (cook.log, cook.warnings);
        Ok(CookResult {
            plan,
            log,
            removed_archives,
            warnings,
        })
    }

    /// Configure, compile and install a recipe
    pub fn cook(&self, recipe: &Recipe) -> Result<CookResult> {
        let plan = self.plan(recipe)?;
        info!(
            "Cooking {} for {} (target {})",
            recipe.label(),
            plan.target_platform,
            plan.target
        );

        let mut cook = Cook::new(self, &plan);

        info!("Configuring...");
        cook.configure()?;

        info!("Simmering: running make with {} jobs...", plan.jobs);
        cook.simmer()?;

        info!("Plating: installing to {}...", plan.package_dir.display());
        let removed_archives = cook.plate()?;

        info!("Cooked {} into {}", recipe.label(), plan.package_dir.display());

        let (log, warnings) = (cook.log, cook.warnings);
        Ok(CookResult {
            plan,
            log,
            removed_archives,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::platform::{Arch, Compiler, Os, Platform};
    use crate::recipe::flags::AmbientEnv;
    use crate::recipe::format::{OptionsSection, PackageSection};
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Records steps and fails the phases it is told to
    #[derive(Default)]
    struct RecordingRunner {
        steps: Mutex<Vec<BuildStep>>,
        fail_phase: Option<&'static str>,
    }

    impl RecordingRunner {
        fn failing(phase: &'static str) -> Self {
            Self {
                fail_phase: Some(phase),
                ..Self::default()
            }
        }

        fn phases(&self) -> Vec<String> {
            self.steps
                .lock()
                .unwrap()
                .iter()
                .map(|s| s.phase.clone())
                .collect()
        }
    }

    impl BuildRunner for RecordingRunner {
        fn run(&self, step: &BuildStep) -> Result<StepOutput> {
            self.steps.lock().unwrap().push(step.clone());
            if self.fail_phase == Some(step.phase.as_str()) {
                return Ok(StepOutput {
                    code: Some(1),
                    stdout: String::new(),
                    stderr: format!("{} exploded", step.phase),
                });
            }
            Ok(StepOutput {
                code: Some(0),
                stdout: format!("{} ok", step.phase),
                stderr: String::new(),
            })
        }
    }

    fn make_test_recipe(os: Os, arch: Arch) -> Recipe {
        Recipe {
            package: PackageSection {
                name: "openssl".to_string(),
                version: "3.2.0".to_string(),
                description: None,
                license: None,
                homepage: None,
            },
            settings: Platform::new(os, arch, Compiler::Gcc),
            settings_target: None,
            options: OptionsSection::default(),
        }
    }

    fn test_config(root: &Path) -> KitchenConfig {
        KitchenConfig {
            source_dir: root.join("src"),
            package_dir: root.join("pkg"),
            jobs: 6,
            ..KitchenConfig::default()
        }
    }

    fn kitchen(root: &Path, runner: Arc<RecordingRunner>) -> Kitchen {
        Kitchen::with_runner(test_config(root), runner)
    }

    #[test]
    fn test_plan_linux() {
        let root = PathBuf::from("/work");
        let kitchen = kitchen(&root, Arc::new(RecordingRunner::default()));
        let plan = kitchen.plan(&make_test_recipe(Os::Linux, Arch::X86_64)).unwrap();

        assert_eq!(
            plan.configure_args,
            vec![
                "enable-pic",
                "enable-shared",
                "enable-threads",
                "no-tests",
                "--prefix=/work/pkg",
                "linux-x86_64",
            ]
        );
        assert_eq!(
            plan.args_string(),
            "'enable-pic' 'enable-shared' 'enable-threads' 'no-tests' '--prefix=/work/pkg' 'linux-x86_64'"
        );
        assert!(plan.env.contains(
            "CFLAGS",
            "-ffile-prefix-map=\"/work/src\"=\"pkg/openssl\""
        ));
    }

    #[test]
    fn test_plan_splits_target_tokens() {
        let kitchen = kitchen(Path::new("/work"), Arc::new(RecordingRunner::default()));
        let plan = kitchen.plan(&make_test_recipe(Os::Android, Arch::X86_64)).unwrap();
        let tail = &plan.configure_args[plan.configure_args.len() - 2..];
        assert_eq!(tail, ["no-asm", "android-x86_64"]);
    }

    #[test]
    fn test_plan_uses_target_settings_for_resolution_only() {
        let kitchen = kitchen(Path::new("/work"), Arc::new(RecordingRunner::default()));
        let mut recipe = make_test_recipe(Os::Linux, Arch::X86_64);
        recipe.settings_target = Some(Platform::new(Os::Android, Arch::Armv8, Compiler::Clang));

        let plan = kitchen.plan(&recipe).unwrap();
        assert_eq!(plan.target.to_string(), "android-arm64");
        // Host is still Linux, so the linker flag stays
        assert!(plan.env.contains("LDFLAGS", "-Wl,--enable-new-dtags"));
    }

    #[test]
    fn test_plan_carries_sysroot_and_ambient() {
        let mut config = test_config(Path::new("/work"));
        config.sysroot = Some(PathBuf::from("/opt/sysroot"));
        config.ambient = AmbientEnv::from_pairs([("CXXFLAGS", "-O3")]);
        let kitchen = Kitchen::with_runner(config, Arc::new(RecordingRunner::default()));

        let plan = kitchen.plan(&make_test_recipe(Os::Linux, Arch::Armv8)).unwrap();
        assert_eq!(plan.env.flags("CXXFLAGS")[0], "-O3");
        assert!(plan.env.contains("CFLAGS", "--sysroot=/opt/sysroot"));
    }

    #[test]
    fn test_cook_runs_phases_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::default());
        let kitchen = kitchen(dir.path(), runner.clone());

        let result = kitchen.cook(&make_test_recipe(Os::Linux, Arch::X86_64)).unwrap();

        assert_eq!(runner.phases(), vec!["configure", "make", "install"]);
        let steps = runner.steps.lock().unwrap();
        assert_eq!(steps[0].program, "./Configure");
        assert_eq!(steps[1].args, vec!["-j6"]);
        assert_eq!(steps[2].args, vec!["install_sw", "install_ssldirs", "-j6"]);
        assert!(steps.iter().all(|s| s.workdir == dir.path().join("src")));
        assert!(steps[0].env.iter().any(|(k, v)| k == "CFLAGS" && v.contains("-fPIC")));

        assert!(result.log.contains("=== configure ==="));
        assert!(result.log.contains("make ok"));
        // Fake install created no lib directory
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unsupported_platform_spawns_nothing() {
        let runner = Arc::new(RecordingRunner::default());
        let kitchen = kitchen(Path::new("/work"), runner.clone());

        let err = kitchen
            .cook(&make_test_recipe(Os::FreeBsd, Arch::X86_64))
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedPlatform { .. }));
        assert!(runner.phases().is_empty());
    }

    #[test]
    fn test_configure_failure_stops_build() {
        let runner = Arc::new(RecordingRunner::failing("configure"));
        let kitchen = kitchen(Path::new("/work"), runner.clone());

        let err = kitchen
            .cook(&make_test_recipe(Os::Linux, Arch::X86_64))
            .unwrap_err();

        match err {
            Error::CommandFailed {
                phase,
                code,
                stderr,
                command,
                ..
            } => {
                assert_eq!(phase, "configure");
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "configure exploded");
                assert!(command.starts_with("./Configure 'enable-pic'"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.phases(), vec!["configure"]);
    }

    #[test]
    fn test_make_failure_skips_install() {
        let runner = Arc::new(RecordingRunner::failing("make"));
        let kitchen = kitchen(Path::new("/work"), runner.clone());

        assert!(kitchen.cook(&make_test_recipe(Os::Linux, Arch::X86_64)).is_err());
        assert_eq!(runner.phases(), vec!["configure", "make"]);
    }

    #[test]
    fn test_build_and_package_split() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("pkg/lib");
        std::fs::create_dir_all(&lib).unwrap();
        std::fs::write(lib.join("libssl.la"), b"").unwrap();
        std::fs::write(lib.join("libssl.so"), b"").unwrap();

        let runner = Arc::new(RecordingRunner::default());
        let kitchen = kitchen(dir.path(), runner.clone());
        let recipe = make_test_recipe(Os::Linux, Arch::X86_64);

        let built = kitchen.build(&recipe).unwrap();
        assert!(built.removed_archives.is_empty());
        assert_eq!(runner.phases(), vec!["configure", "make"]);

        let packaged = kitchen.package(&recipe).unwrap();
        assert_eq!(runner.phases(), vec!["configure", "make", "install"]);
        assert_eq!(packaged.removed_archives, vec![lib.join("libssl.la")]);
        assert!(packaged.warnings.is_empty());
        assert!(lib.join("libssl.so").exists());
    }
}
