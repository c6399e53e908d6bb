use anyhow::{Context, Result, anyhow};
use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Dotted settings module for a project root, derived from its base name.
pub fn settings_module(project_root: &Path) -> Result<String> {
    let base = project_root
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            anyhow!(
                "Project directory name is not usable as a module name: {}",
                project_root.display()
            )
        })?;
    Ok(format!("{base}.settings"))
}

/// PYTHONPATH for the child, with `dir` prepended to whatever is inherited.
fn pythonpath_with(dir: &Path) -> Result<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = env::var_os("PYTHONPATH") {
        paths.extend(env::split_paths(&existing));
    }
    env::join_paths(paths).context("Failed to build PYTHONPATH")
}

/// Run the management tool for the project at `project_root`, forwarding
/// `args` verbatim with stdio inherited.
///
/// The child runs from the project's parent directory (where the project
/// package is importable) with DJANGO_SETTINGS_MODULE pointing at the
/// project's settings module. Returns the child's exit status; the locator
/// itself never touches the environment, only this runner does.
pub fn run(
    project_root: &Path,
    command: &str,
    args: &[String],
    set_pythonpath: bool,
) -> Result<ExitStatus> {
    let parent = project_root.parent().ok_or_else(|| {
        anyhow!(
            "Project root {} has no parent directory",
            project_root.display()
        )
    })?;
    let settings = settings_module(project_root)?;

    info!("Handing off to '{}' with settings module {}", command, settings);
    debug!("Forwarded arguments: {:?}", args);

    let mut child = Command::new(command);
    child
        .args(args)
        .current_dir(parent)
        .env("DJANGO_SETTINGS_MODULE", &settings);
    if set_pythonpath {
        child.env("PYTHONPATH", pythonpath_with(parent)?);
    }

    child
        .status()
        .with_context(|| format!("Failed to run '{command}'"))
}
