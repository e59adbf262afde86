// src/platform/mod.rs

//! Platform descriptors
//!
//! A [`Platform`] is the (os, arch, compiler, sdk, build type) tuple handed
//! to us by the invoking build orchestrator. Values use the package-manager
//! spellings (`Macos`, `armv8`, `apple-clang`, `iphonesimulator`, ...) so
//! recipes can be written with the same settings a profile would carry.

pub mod target;

pub use target::{resolve, supported_targets, ConfigureTarget, TargetRule};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire up `Display`, `FromStr` and the serde string conversions for a
/// settings enum that exposes `name()` and `ALL`.
macro_rules! settings_value {
    ($ty:ident, $what:literal) => {
        impl $ty {
            /// Parse a settings value, ignoring ASCII case
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s).ok_or_else(|| {
                    Error::ParseError(format!("Unknown {} '{}'", $what, s))
                })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> String {
                v.name().to_string()
            }
        }
    };
}

/// Operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Android,
    Ios,
    TvOs,
    WatchOs,
    FreeBsd,
    Emscripten,
}

impl Os {
    pub const ALL: &'static [Os] = &[
        Os::Linux,
        Os::Macos,
        Os::Windows,
        Os::Android,
        Os::Ios,
        Os::TvOs,
        Os::WatchOs,
        Os::FreeBsd,
        Os::Emscripten,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::TvOs => "tvOS",
            Self::WatchOs => "watchOS",
            Self::FreeBsd => "FreeBSD",
            Self::Emscripten => "Emscripten",
        }
    }

    /// Darwin-family systems, where clang takes `-isysroot`
    pub fn is_apple(&self) -> bool {
        matches!(self, Self::Macos | Self::Ios | Self::TvOs | Self::WatchOs)
    }
}

settings_value!(Os, "operating system");

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Arch {
    X86,
    X86_64,
    Armv4,
    Armv4i,
    Armv5el,
    Armv5hf,
    Armv6,
    Armv7,
    Armv7hf,
    Armv7s,
    Armv7k,
    Armv8,
    Armv8_32,
    Armv8_3,
    Ppc32,
    Ppc64le,
    Ppc64,
    Mips,
    Mips64,
    S390x,
    Riscv64,
    Wasm,
}

impl Arch {
    pub const ALL: &'static [Arch] = &[
        Arch::X86,
        Arch::X86_64,
        Arch::Armv4,
        Arch::Armv4i,
        Arch::Armv5el,
        Arch::Armv5hf,
        Arch::Armv6,
        Arch::Armv7,
        Arch::Armv7hf,
        Arch::Armv7s,
        Arch::Armv7k,
        Arch::Armv8,
        Arch::Armv8_32,
        Arch::Armv8_3,
        Arch::Ppc32,
        Arch::Ppc64le,
        Arch::Ppc64,
        Arch::Mips,
        Arch::Mips64,
        Arch::S390x,
        Arch::Riscv64,
        Arch::Wasm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Armv4 => "armv4",
            Self::Armv4i => "armv4i",
            Self::Armv5el => "armv5el",
            Self::Armv5hf => "armv5hf",
            Self::Armv6 => "armv6",
            Self::Armv7 => "armv7",
            Self::Armv7hf => "armv7hf",
            Self::Armv7s => "armv7s",
            Self::Armv7k => "armv7k",
            Self::Armv8 => "armv8",
            Self::Armv8_32 => "armv8_32",
            Self::Armv8_3 => "armv8.3",
            Self::Ppc32 => "ppc32",
            Self::Ppc64le => "ppc64le",
            Self::Ppc64 => "ppc64",
            Self::Mips => "mips",
            Self::Mips64 => "mips64",
            Self::S390x => "s390x",
            Self::Riscv64 => "riscv64",
            Self::Wasm => "wasm",
        }
    }

    /// Any ARM variant (every name starting with `arm`)
    pub fn is_arm(&self) -> bool {
        self.name().starts_with("arm")
    }
}

settings_value!(Arch, "architecture");

/// Compiler identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl Compiler {
    pub const ALL: &'static [Compiler] = &[
        Compiler::Gcc,
        Compiler::Clang,
        Compiler::AppleClang,
        Compiler::Msvc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::Msvc => "msvc",
        }
    }

    pub fn is_clang(&self) -> bool {
        matches!(self, Self::Clang | Self::AppleClang)
    }
}

settings_value!(Compiler, "compiler");

/// Apple SDK variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sdk {
    IphoneOs,
    IphoneSimulator,
    MacOsx,
    AppleTvOs,
    AppleTvSimulator,
    WatchOs,
    WatchSimulator,
}

impl Sdk {
    pub const ALL: &'static [Sdk] = &[
        Sdk::IphoneOs,
        Sdk::IphoneSimulator,
        Sdk::MacOsx,
        Sdk::AppleTvOs,
        Sdk::AppleTvSimulator,
        Sdk::WatchOs,
        Sdk::WatchSimulator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::IphoneOs => "iphoneos",
            Self::IphoneSimulator => "iphonesimulator",
            Self::MacOsx => "macosx",
            Self::AppleTvOs => "appletvos",
            Self::AppleTvSimulator => "appletvsimulator",
            Self::WatchOs => "watchos",
            Self::WatchSimulator => "watchsimulator",
        }
    }
}

settings_value!(Sdk, "sdk");

/// Build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const ALL: &'static [BuildType] = &[
        BuildType::Debug,
        BuildType::Release,
        BuildType::RelWithDebInfo,
        BuildType::MinSizeRel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

settings_value!(BuildType, "build type");

/// The platform a build runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    #[serde(default)]
    pub sdk: Option<Sdk>,
    #[serde(default)]
    pub build_type: Option<BuildType>,
}

impl Platform {
    /// Create a descriptor with no SDK and no build type
    pub fn new(os: Os, arch: Arch, compiler: Compiler) -> Self {
        Self {
            os,
            arch,
            compiler,
            sdk: None,
            build_type: None,
        }
    }

    /// Set the SDK
    pub fn with_sdk(mut self, sdk: Sdk) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Set the build type
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = Some(build_type);
        self
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}", self.os, self.arch, self.compiler)?;
        if let Some(sdk) = self.sdk {
            write!(f, ", sdk {}", sdk)?;
        }
        if let Some(build_type) = self.build_type {
            write!(f, ", {}", build_type)?;
        }
        write!(f, ")")
    }
}
