// ── Descriptor rendering ──────────────────────────────────────────────────────
//
// Pure functions from the in-memory model to Visual Studio solution and
// project text.  No I/O and no hidden state: identical input renders to
// identical bytes, so regenerated files diff cleanly.

pub mod ident;
pub mod model;
mod project;
mod solution;

pub use ident::{project_id, solution_id, DerivedId};
pub use model::{ProjectDescriptor, ProjectReference, SolutionDescriptor, SolutionProject};
pub use project::render_project;
pub use solution::render_solution;

use crate::{
    error::{BridgeError, Result},
    version::VisualStudioVersion,
};

/// Render the `.sln` for a whole solution model, listing `<name>.csproj`
/// for every project.
pub fn render_solution_descriptor(version: VisualStudioVersion, solution: &SolutionDescriptor) -> String {
    render_solution(version, &solution.name, &solution.solution_projects())
}

/// Render the `.csproj` for the project called `name` in `solution`.
pub fn render_named_project(
    version: VisualStudioVersion,
    solution: &SolutionDescriptor,
    name: &str,
) -> Result<String> {
    let project = solution
        .project(name)
        .ok_or_else(|| BridgeError::UnknownProject(name.to_owned()))?;
    Ok(render_project(version, project))
}
