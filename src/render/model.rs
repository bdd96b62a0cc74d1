// ── Descriptor model ──────────────────────────────────────────────────────────
//
// Read-only inputs to the renderers.  Built by whoever owns the project
// layout (or loaded from JSON by the CLI); never mutated here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A dependency of a project. No path means a framework/system assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub name: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ProjectReference {
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn with_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }

    /// The hint path, if the reference carries a non-empty one.
    pub fn hint_path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// One C# project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    #[serde(default)]
    pub code_files: Vec<PathBuf>,
    #[serde(default)]
    pub non_code_files: Vec<PathBuf>,
    #[serde(default)]
    pub references: Vec<ProjectReference>,
    #[serde(default)]
    pub defines: Vec<String>,
}

impl ProjectDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// File name the project descriptor is written under.
    pub fn file_name(&self) -> String {
        format!("{}.csproj", self.name)
    }
}

/// A named set of projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionDescriptor {
    pub name: String,
    #[serde(default)]
    pub projects: Vec<ProjectDescriptor>,
}

impl SolutionDescriptor {
    pub fn project(&self, name: &str) -> Option<&ProjectDescriptor> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Solution entries for every project, pointing at `<name>.csproj`.
    pub fn solution_projects(&self) -> Vec<SolutionProject> {
        self.projects
            .iter()
            .map(|p| SolutionProject::new(&p.name, p.file_name()))
            .collect()
    }
}

/// A project as listed inside a solution: display name plus descriptor path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionProject {
    pub name: String,
    pub path: PathBuf,
}

impl SolutionProject {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Path text with Windows separators, as the descriptor formats expect.
pub(crate) fn windows_path(path: &Path) -> String {
    path.to_string_lossy().replace('/', "\\")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
