// src/recipe/flags.rs

//! Configure options and compiler/linker flag assembly
//!
//! Package options become `Configure` options (`enable-pic`, `no-shared`,
//! ...). Compiler and linker flags are collected into a [`FlagSet`] that is
//! exported as `CFLAGS`/`CXXFLAGS`/`LDFLAGS` while `Configure` and `make`
//! run.

use crate::platform::{Os, Platform};
use crate::recipe::format::OptionsSection;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

/// Environment variables whose ambient values are carried into the build
pub const AMBIENT_FLAG_VARS: [&str; 5] = ["CFLAGS", "CXXFLAGS", "LDFLAGS", "CPPFLAGS", "CXXCPPFLAGS"];

/// Options passed to `Configure` regardless of platform
const LIBRARY_OPTIONS: [&str; 2] = ["enable-threads", "no-tests"];

/// Ordered compiler/linker flags keyed by environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    vars: Vec<(String, Vec<String>)>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a flag to a variable, keeping flags already present
    pub fn append(&mut self, var: &str, flag: impl Into<String>) {
        let flag = flag.into();
        match self.vars.iter_mut().find(|(name, _)| name == var) {
            Some((_, flags)) => flags.push(flag),
            None => self.vars.push((var.to_string(), vec![flag])),
        }
    }

    /// Flags recorded for a variable, in order
    pub fn flags(&self, var: &str) -> &[String] {
        self.vars
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, flags)| flags.as_slice())
            .unwrap_or(&[])
    }

    /// The variable's value as exported (space separated)
    pub fn value(&self, var: &str) -> Option<String> {
        let flags = self.flags(var);
        if flags.is_empty() {
            None
        } else {
            Some(flags.join(" "))
        }
    }

    /// Check whether a variable carries a flag
    pub fn contains(&self, var: &str, flag: &str) -> bool {
        self.flags(var).iter().any(|f| f == flag)
    }

    /// Variable names in first-insertion order
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Freeze into `(name, value)` pairs for a child process environment
    pub fn to_env(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(name, flags)| (name.clone(), flags.join(" ")))
            .collect()
    }
}

impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.vars.len()))?;
        for (name, flags) in &self.vars {
            map.serialize_entry(name, &flags.join(" "))?;
        }
        map.end()
    }
}

/// Snapshot of the compiler flag variables set in the invoking environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientEnv {
    vars: Vec<(String, String)>,
}

impl AmbientEnv {
    /// Capture `CFLAGS`, `CXXFLAGS`, `LDFLAGS`, `CPPFLAGS` and `CXXCPPFLAGS`
    pub fn from_env() -> Self {
        Self::from_pairs(
            AMBIENT_FLAG_VARS
                .iter()
                .filter_map(|var| std::env::var(var).ok().map(|v| (var.to_string(), v))),
        )
    }

    /// Build from explicit pairs; variables outside [`AMBIENT_FLAG_VARS`] are ignored
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| AMBIENT_FLAG_VARS.contains(&k.as_str()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, v)| v.as_str())
    }
}

/// Read the sysroot handed down by the build orchestrator
pub fn sysroot_from_env() -> Option<std::path::PathBuf> {
    std::env::var_os("SYSROOT")
        .filter(|v| !v.is_empty())
        .map(std::path::PathBuf::from)
}

/// Everything the assembler looks at
#[derive(Debug, Clone, Copy)]
pub struct FlagInputs<'a> {
    /// Platform the compiler runs for
    pub platform: &'a Platform,
    pub options: OptionsSection,
    pub ambient: &'a AmbientEnv,
    /// Absolute source directory, remapped in debug info
    pub source_dir: &'a Path,
    /// Replacement for `source_dir` in debug info (e.g. `pkg/openssl`)
    pub mapped_source: &'a str,
    pub sysroot: Option<&'a Path>,
}

/// Output of flag assembly
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BuildFlags {
    /// Configure options derived from package options
    pub options: Vec<String>,
    /// Environment for `Configure` and `make`
    pub env: FlagSet,
}

/// `enable-pic`/`no-pic` then `enable-shared`/`no-shared`
pub fn std_options(options: &OptionsSection) -> Vec<String> {
    let pic = if options.fpic { "enable-pic" } else { "no-pic" };
    let shared = if options.shared {
        "enable-shared"
    } else {
        "no-shared"
    };
    vec![pic.to_string(), shared.to_string()]
}

/// Fixed library options plus the install prefix
pub fn library_options(prefix: &Path) -> Vec<String> {
    let mut opts: Vec<String> = LIBRARY_OPTIONS.iter().map(|o| o.to_string()).collect();
    opts.push(format!("--prefix={}", prefix.display()));
    opts
}

/// Whether `-fPIC` is added to the compiler flags
///
/// Windows never gets it; elsewhere it is dropped only for a static,
/// non-PIC build.
pub fn wants_pic_flag(os: Os, options: &OptionsSection) -> bool {
    os != Os::Windows && (options.fpic || options.shared)
}

/// Assemble configure options and the compiler/linker flag set
pub fn assemble(inputs: &FlagInputs<'_>) -> BuildFlags {
    let mut env = FlagSet::new();

    for var in AMBIENT_FLAG_VARS {
        if let Some(value) = inputs.ambient.get(var) {
            env.append(var, value);
        }
    }

    let prefix_map = format!(
        "-ffile-prefix-map=\"{}\"=\"{}\"",
        inputs.source_dir.display(),
        inputs.mapped_source
    );
    env.append("CFLAGS", prefix_map.clone());
    env.append("CXXFLAGS", prefix_map);

    env.append("CFLAGS", "-fexceptions");
    env.append("CXXFLAGS", "-fexceptions");

    if inputs.platform.os == Os::Linux {
        env.append("LDFLAGS", "-Wl,--enable-new-dtags");
    }

    if wants_pic_flag(inputs.platform.os, &inputs.options) {
        env.append("CFLAGS", "-fPIC");
        env.append("CXXFLAGS", "-fPIC");
    }

    if let Some(sysroot) = inputs.sysroot {
        let flag = if inputs.platform.compiler.is_clang() && inputs.platform.os.is_apple() {
            format!("-isysroot {}", sysroot.display())
        } else {
            format!("--sysroot={}", sysroot.display())
        };
        env.append("CFLAGS", flag.clone());
        env.append("CXXFLAGS", flag);
    }

    BuildFlags {
        options: std_options(&inputs.options),
        env,
    }
}
