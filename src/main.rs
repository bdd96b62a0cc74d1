// ── vsbridge command line ─────────────────────────────────────────────────────
//
//   vsbridge list
//   vsbridge open [--editor <label>] <workspace> <file> [--line N]
//   vsbridge render-solution --target <vs20xx> <model.json> [-o out.sln]
//   vsbridge render-project  --target <vs20xx> <model.json> <project> [-o out.csproj]
//
// Logging goes to stderr; set RUST_LOG=vsbridge=debug to see why a
// navigation request degraded.

#![deny(unsafe_code)]

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vsbridge::{
    config::{self, BridgeConfig},
    render::{self, SolutionDescriptor},
    EditorRegistry, Result, VisualStudioVersion, VsEditor,
};

#[derive(Parser)]
#[command(name = "vsbridge", version, about = "Drive Visual Studio and generate its project files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List installed Visual Studio versions.
    List,
    /// Open a file at a line in Visual Studio (best effort).
    Open {
        /// Editor label, e.g. "Visual Studio 2013". Defaults to the
        /// configured editor, then the newest installed one.
        #[arg(long)]
        editor: Option<String>,
        /// Solution the session must have loaded.
        workspace: PathBuf,
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        line: u32,
    },
    /// Render the .sln for a JSON solution model.
    RenderSolution {
        #[arg(long)]
        target: VisualStudioVersion,
        model: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the .csproj for one project of a JSON solution model.
    RenderProject {
        #[arg(long)]
        target: VisualStudioVersion,
        model: PathBuf,
        project: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vsbridge: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let cfg = config::load().unwrap_or_default();

    match command {
        Command::List => {
            let registry = build_registry(&cfg);
            let mut out = io::stdout().lock();
            for label in registry.available_editors() {
                writeln!(out, "{label}")?;
            }
            Ok(())
        }
        Command::Open {
            editor,
            workspace,
            file,
            line,
        } => {
            let registry = build_registry(&cfg);
            let Some(editor) = registry.select(editor.as_deref(), cfg.default_editor.as_deref())?
            else {
                tracing::warn!("no Visual Studio installation found");
                return Ok(());
            };
            if !open_in_editor(&editor, &workspace, &file, line)? {
                tracing::info!(file = %file.display(), "navigation skipped");
            }
            Ok(())
        }
        Command::RenderSolution {
            target,
            model,
            output,
        } => {
            let solution = load_model(&model)?;
            let text = render::render_solution_descriptor(target, &solution);
            emit(&text, output.as_deref())
        }
        Command::RenderProject {
            target,
            model,
            project,
            output,
        } => {
            let solution = load_model(&model)?;
            let text = render::render_named_project(target, &solution, &project)?;
            emit(&text, output.as_deref())
        }
    }
}

#[cfg(windows)]
fn build_registry(cfg: &BridgeConfig) -> EditorRegistry {
    use vsbridge::platform::win32::registry::LocalMachine;
    EditorRegistry::new(&LocalMachine, &cfg.probe_config(), cfg.wait_policy())
}

#[cfg(not(windows))]
fn build_registry(cfg: &BridgeConfig) -> EditorRegistry {
    tracing::debug!("no system registry on this platform");
    EditorRegistry::from_versions(Default::default(), cfg.wait_policy())
}

#[cfg(windows)]
fn open_in_editor(editor: &VsEditor, workspace: &Path, file: &Path, line: u32) -> Result<bool> {
    let host = vsbridge::platform::win32::dte::DteHost::new()?;
    Ok(editor.open_file(&host, workspace, file, line))
}

#[cfg(not(windows))]
fn open_in_editor(_editor: &VsEditor, _workspace: &Path, _file: &Path, _line: u32) -> Result<bool> {
    tracing::warn!("IDE automation is only available on Windows");
    Ok(false)
}

fn load_model(path: &Path) -> Result<SolutionDescriptor> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote descriptor");
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}
