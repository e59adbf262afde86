// src/platform/target.rs

//! OpenSSL Configure target resolution
//!
//! OpenSSL's `Configure` script selects its compiler and assembler profile
//! from a target name such as `linux-x86_64` or `darwin64-arm64`. The
//! mapping from a [`Platform`] is a fixed dispatch table keyed by
//! (os, arch, sdk); the only computed entry is the generic ARM profile for
//! Linux ARM variants without a dedicated row.

use super::{Arch, Os, Platform, Sdk};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use self::ArchMatch::{Any as AnyArch, Exact as ArchIs};
use self::SdkMatch::{Any as AnySdk, Exact as SdkIs};

/// Generic 32-bit ARM profile, tuned with an explicit `-march`
const LINUX_GENERIC_ARM: &str = "linux-armv4";

/// Architecture column of the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchMatch {
    Any,
    Exact(Arch),
}

/// SDK column of the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkMatch {
    Any,
    Exact(Sdk),
}

/// One row of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct TargetRule {
    pub os: Os,
    pub arch: ArchMatch,
    pub sdk: SdkMatch,
    /// Configure tokens, in order
    pub tokens: &'static [&'static str],
}

impl TargetRule {
    const fn new(os: Os, arch: ArchMatch, sdk: SdkMatch, tokens: &'static [&'static str]) -> Self {
        Self {
            os,
            arch,
            sdk,
            tokens,
        }
    }

    /// Check whether this row applies to the platform
    pub fn matches(&self, platform: &Platform) -> bool {
        if self.os != platform.os {
            return false;
        }
        let arch_ok = match self.arch {
            ArchMatch::Any => true,
            ArchMatch::Exact(arch) => arch == platform.arch,
        };
        let sdk_ok = match self.sdk {
            SdkMatch::Any => true,
            SdkMatch::Exact(sdk) => platform.sdk == Some(sdk),
        };
        arch_ok && sdk_ok
    }
}

impl fmt::Display for TargetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arch = match self.arch {
            ArchMatch::Any => "*",
            ArchMatch::Exact(arch) => arch.name(),
        };
        let sdk = match self.sdk {
            SdkMatch::Any => "*",
            SdkMatch::Exact(sdk) => sdk.name(),
        };
        write!(
            f,
            "{:<8} {:<8} {:<16} {}",
            self.os.name(),
            arch,
            sdk,
            self.tokens.join(" ")
        )
    }
}

/// First matching row wins.
static TARGET_TABLE: &[TargetRule] = &[
    // asm on android-x86_64 is broken with clang
    TargetRule::new(Os::Android, ArchIs(Arch::X86_64), AnySdk, &["no-asm", "android-x86_64"]),
    TargetRule::new(Os::Android, ArchIs(Arch::Armv7), AnySdk, &["android-arm"]),
    TargetRule::new(Os::Android, ArchIs(Arch::Armv8), AnySdk, &["android-arm64"]),
    TargetRule::new(Os::Android, ArchIs(Arch::X86), AnySdk, &["android-x86"]),
    TargetRule::new(Os::Windows, ArchIs(Arch::X86_64), AnySdk, &["mingw64"]),
    TargetRule::new(Os::Ios, AnyArch, SdkIs(Sdk::IphoneOs), &["ios64-xcrun"]),
    TargetRule::new(Os::Ios, ArchIs(Arch::Armv8), SdkIs(Sdk::IphoneSimulator), &["iossimulatorarm-xcrun"]),
    TargetRule::new(Os::Ios, ArchIs(Arch::X86_64), SdkIs(Sdk::IphoneSimulator), &["iossimulator-xcrun"]),
    TargetRule::new(Os::Macos, ArchIs(Arch::Armv8), AnySdk, &["darwin64-arm64"]),
    TargetRule::new(Os::Macos, ArchIs(Arch::X86_64), AnySdk, &["darwin64-x86_64"]),
    TargetRule::new(Os::Linux, ArchIs(Arch::X86_64), AnySdk, &["linux-x86_64"]),
    TargetRule::new(Os::Linux, ArchIs(Arch::X86), AnySdk, &["linux-x86"]),
    TargetRule::new(Os::Linux, ArchIs(Arch::Armv8), AnySdk, &["linux-aarch64"]),
];

/// Every explicit row of the dispatch table
pub fn supported_targets() -> &'static [TargetRule] {
    TARGET_TABLE
}

/// A resolved Configure target: the profile name plus any options that
/// must travel with it (`no-asm`, `-march=...`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigureTarget {
    tokens: Vec<String>,
}

impl ConfigureTarget {
    fn from_static(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// The tokens passed to `Configure`, in order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The profile name itself (e.g. `android-x86_64` for `no-asm android-x86_64`)
    pub fn name(&self) -> &str {
        self.tokens
            .iter()
            .find(|t| !t.starts_with('-') && !t.starts_with("no-"))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl fmt::Display for ConfigureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Resolve the Configure target for a platform
///
/// Unmatched combinations are always an error; there is no default target.
pub fn resolve(platform: &Platform) -> Result<ConfigureTarget> {
    if let Some(rule) = TARGET_TABLE.iter().find(|r| r.matches(platform)) {
        let target = ConfigureTarget::from_static(rule.tokens);
        debug!("Resolved {} to Configure target '{}'", platform, target);
        return Ok(target);
    }

    if platform.os == Os::Linux && platform.arch.is_arm() {
        let target = ConfigureTarget {
            tokens: vec![
                LINUX_GENERIC_ARM.to_string(),
                format!("-march={}", platform.arch),
            ],
        };
        debug!(
            "No dedicated profile for {}, using generic ARM target '{}'",
            platform, target
        );
        return Ok(target);
    }

    Err(unmatched(platform))
}

/// Classify a platform the table has no row for
fn unmatched(platform: &Platform) -> Error {
    let os = platform.os.name().to_string();
    let arch = platform.arch.name().to_string();

    match platform.os {
        Os::Android => Error::UnknownArchitecture { os, arch },
        Os::Ios => match platform.sdk {
            Some(Sdk::IphoneSimulator) => Error::UnknownArchitecture {
                os: format!("{} ({})", os, Sdk::IphoneSimulator),
                arch,
            },
            sdk => Error::UnknownSdk {
                os,
                sdk: sdk.map(|s| s.name()).unwrap_or("none").to_string(),
            },
        },
        _ => Error::UnsupportedPlatform { os, arch },
    }
}
