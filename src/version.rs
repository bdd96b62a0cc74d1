// ── Visual Studio versions ────────────────────────────────────────────────────
//
// Closed set of supported Visual Studio releases and the static metadata each
// one needs: where it lives in the registry, how it is displayed, and which
// format strings its solution and project files carry.  Pure Rust.

use std::{fmt, str::FromStr};

use crate::error::BridgeError;

// ── Version enum ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisualStudioVersion {
    Vs2008,
    Vs2010,
    Vs2012,
    Vs2013,
    Vs2015,
}

/// Static description of one Visual Studio release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMetadata {
    /// Subkey below the vendor root, e.g. `VisualStudio\12.0`.
    pub registry_key: &'static str,
    /// Human-readable label; also the key editors are looked up by.
    pub display_name: &'static str,
    /// Executable file name inside the install directory.
    pub executable: &'static str,
    /// `Format Version` written into the `.sln` header.
    pub solution_format_version: &'static str,
    /// `ToolsVersion` attribute written into the `.csproj` root.
    pub tools_version: &'static str,
}

impl VisualStudioVersion {
    /// Every known version, oldest first.
    pub const ALL: [VisualStudioVersion; 5] = [
        Self::Vs2008,
        Self::Vs2010,
        Self::Vs2012,
        Self::Vs2013,
        Self::Vs2015,
    ];

    pub fn metadata(self) -> VersionMetadata {
        match self {
            Self::Vs2008 => VersionMetadata {
                registry_key: r"VisualStudio\9.0",
                display_name: "Visual Studio 2008",
                executable: "devenv.exe",
                solution_format_version: "10.0",
                tools_version: "3.5",
            },
            Self::Vs2010 => VersionMetadata {
                registry_key: r"VisualStudio\10.0",
                display_name: "Visual Studio 2010",
                executable: "devenv.exe",
                solution_format_version: "11.0",
                tools_version: "4.0",
            },
            Self::Vs2012 => VersionMetadata {
                registry_key: r"VisualStudio\11.0",
                display_name: "Visual Studio 2012",
                executable: "devenv.exe",
                solution_format_version: "12.0",
                tools_version: "4.0",
            },
            Self::Vs2013 => VersionMetadata {
                registry_key: r"VisualStudio\12.0",
                display_name: "Visual Studio 2013",
                executable: "devenv.exe",
                solution_format_version: "12.0",
                tools_version: "12.0",
            },
            Self::Vs2015 => VersionMetadata {
                registry_key: r"VisualStudio\13.0",
                display_name: "Visual Studio 2015",
                executable: "devenv.exe",
                solution_format_version: "12.0",
                tools_version: "13.0",
            },
        }
    }

    /// Short tag used on the command line and in configuration (`vs2013`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Vs2008 => "vs2008",
            Self::Vs2010 => "vs2010",
            Self::Vs2012 => "vs2012",
            Self::Vs2013 => "vs2013",
            Self::Vs2015 => "vs2015",
        }
    }

    /// Reverse lookup from a display name such as `"Visual Studio 2013"`.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.metadata().display_name == name)
    }
}

impl fmt::Display for VisualStudioVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metadata().display_name)
    }
}

impl FromStr for VisualStudioVersion {
    type Err = BridgeError;

    /// Accepts the short tag (case-insensitive) or the full display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.tag() == lower)
            .or_else(|| Self::from_display_name(s.trim()))
            .ok_or_else(|| BridgeError::UnknownVersion(s.to_owned()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_format_versions() {
        assert_eq!(VisualStudioVersion::Vs2008.metadata().solution_format_version, "10.0");
        assert_eq!(VisualStudioVersion::Vs2010.metadata().solution_format_version, "11.0");
        assert_eq!(VisualStudioVersion::Vs2015.metadata().solution_format_version, "12.0");
    }

    #[test]
    fn tools_versions() {
        assert_eq!(VisualStudioVersion::Vs2008.metadata().tools_version, "3.5");
        assert_eq!(VisualStudioVersion::Vs2012.metadata().tools_version, "4.0");
        assert_eq!(VisualStudioVersion::Vs2013.metadata().tools_version, "12.0");
        assert_eq!(VisualStudioVersion::Vs2015.metadata().tools_version, "13.0");
    }

    #[test]
    fn display_names_are_unique() {
        let mut names: Vec<_> = VisualStudioVersion::ALL
            .iter()
            .map(|v| v.metadata().display_name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), VisualStudioVersion::ALL.len());
    }

    #[test]
    fn parse_tag_and_display_name() {
        assert_eq!("VS2013".parse::<VisualStudioVersion>().unwrap(), VisualStudioVersion::Vs2013);
        assert_eq!(
            "Visual Studio 2010".parse::<VisualStudioVersion>().unwrap(),
            VisualStudioVersion::Vs2010
        );
    }

    #[test]
    fn parse_unknown_is_error() {
        assert!(matches!(
            "vs2019".parse::<VisualStudioVersion>(),
            Err(BridgeError::UnknownVersion(_))
        ));
    }

    #[test]
    fn display_uses_display_name() {
        assert_eq!(VisualStudioVersion::Vs2012.to_string(), "Visual Studio 2012");
    }
}
