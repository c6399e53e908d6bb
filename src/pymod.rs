use std::path::Path;

use crate::error::{LocateError, Result};

/// Extensions probed for module sources by default. Deployed trees may carry
/// only byte-compiled modules, so the compiled forms count too.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "pyc", "pyo"];

/// Check whether the dotted module `dotted` looks importable from `from_dir`,
/// without importing anything.
///
/// This is a filesystem-only approximation: a component counts as present
/// when a `name.<ext>` file or a `name/__init__.<ext>` package marker exists
/// for one of the given extensions. A file that exists but would fail to
/// import still matches, so false positives are accepted by design.
///
/// An empty module name, or an empty component inside a dotted name, is a
/// contract violation and fails with [`LocateError::EmptyModuleName`].
pub fn module_exists(from_dir: &Path, dotted: &str, extensions: &[String]) -> Result<bool> {
    if dotted.split('.').any(str::is_empty) {
        return Err(LocateError::EmptyModuleName);
    }
    let (head, rest) = match dotted.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (dotted, None),
    };

    let mut head_exists = false;
    for ext in extensions {
        // Only a package can contain further dotted children, so the plain
        // file form is probed for the last component only.
        if rest.is_none() && from_dir.join(format!("{head}.{ext}")).is_file() {
            head_exists = true;
            break;
        }
        if from_dir.join(head).join(format!("__init__.{ext}")).is_file() {
            head_exists = true;
            break;
        }
    }

    match rest {
        None => Ok(head_exists),
        Some(rest) => Ok(head_exists && module_exists(&from_dir.join(head), rest, extensions)?),
    }
}
