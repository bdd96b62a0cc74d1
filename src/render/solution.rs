// ── Solution file (.sln) ──────────────────────────────────────────────────────
//
// Each project contributes a `Project(...)`/`EndProject` entry and a block
// of four configuration mappings.  Both lists keep input order.  Output uses
// LF line endings and no trailing newline after `EndGlobal`.

use std::fmt;

use super::{
    ident::{project_id, solution_id, DerivedId},
    model::{windows_path, SolutionProject},
};
use crate::version::VisualStudioVersion;

/// Build configurations every project is mapped to.
const CONFIGURATIONS: [&str; 2] = ["Debug|Any CPU", "Release|Any CPU"];

/// `Project("{solution}") = "name", "path", "{project}"` + `EndProject`.
struct ProjectEntry<'a> {
    solution: DerivedId,
    name: &'a str,
    path: String,
    project: DerivedId,
}

impl fmt::Display for ProjectEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project(\"{{{}}}\") = \"{}\", \"{}\", \"{{{}}}\"\nEndProject",
            self.solution, self.name, self.path, self.project
        )
    }
}

/// ActiveCfg/Build.0 mapping lines for one project.
///
/// The first line carries no indent of its own: it lands after the `\t\t`
/// that precedes the whole list in the solution template.
struct PlatformBlock {
    project: DerivedId,
}

impl fmt::Display for PlatformBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cfg in CONFIGURATIONS {
            for step in ["ActiveCfg", "Build.0"] {
                if !first {
                    f.write_str("\n\t\t")?;
                }
                first = false;
                write!(f, "{{{}}}.{cfg}.{step} = {cfg}", self.project)?;
            }
        }
        Ok(())
    }
}

struct SolutionFile<'a> {
    format_version: &'static str,
    entries: Vec<ProjectEntry<'a>>,
    platforms: Vec<PlatformBlock>,
}

impl fmt::Display for SolutionFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Microsoft Visual Studio Solution File, Format Version {}",
            self.format_version
        )?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        f.write_str("\nGlobal\n")?;
        f.write_str("\tGlobalSection(SolutionConfigurationPlatforms) = preSolution\n")?;
        for cfg in CONFIGURATIONS {
            writeln!(f, "\t\t{cfg} = {cfg}")?;
        }
        f.write_str("\tEndGlobalSection\n")?;
        f.write_str("\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\n\t\t")?;
        for block in &self.platforms {
            writeln!(f, "{block}")?;
        }
        f.write_str("\n\tEndGlobalSection\n")?;
        f.write_str("\tGlobalSection(SolutionProperties) = preSolution\n")?;
        f.write_str("\t\tHideSolutionNode = FALSE\n")?;
        f.write_str("\tEndGlobalSection\n")?;
        f.write_str("EndGlobal")
    }
}

/// Render the `.sln` text for `projects` under `solution_name`.
pub fn render_solution(
    version: VisualStudioVersion,
    solution_name: &str,
    projects: &[SolutionProject],
) -> String {
    let solution = solution_id(solution_name);

    let file = SolutionFile {
        format_version: version.metadata().solution_format_version,
        entries: projects
            .iter()
            .map(|p| ProjectEntry {
                solution,
                name: &p.name,
                path: windows_path(&p.path),
                project: project_id(&p.name),
            })
            .collect(),
        platforms: projects
            .iter()
            .map(|p| PlatformBlock {
                project: project_id(&p.name),
            })
            .collect(),
    };

    file.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
