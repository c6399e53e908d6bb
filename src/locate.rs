use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{LocateError, Result};
use crate::listing::DirListing;
use crate::pymod;
use crate::walk::Candidates;

/// Everything the locator needs, made explicit so tests can substitute
/// marker names, submodule sets, and extension lists.
#[derive(Clone, Debug, PartialEq)]
pub struct LocateOptions {
    /// File whose presence switches the search into a subtree scan.
    pub marker: String,
    /// Short names every project package must contain.
    pub submodules: Vec<String>,
    /// Extensions probed for module sources.
    pub extensions: Vec<String>,
}

impl LocateOptions {
    pub fn from_config(config: &Config) -> LocateOptions {
        LocateOptions {
            marker: config.marker.clone(),
            submodules: config.submodules.clone(),
            extensions: config.extensions.clone(),
        }
    }
}

/// Check whether `listing` is a project root: a directory whose own name,
/// treated as a package, appears to contain every required submodule.
///
/// The probe runs from the listing's parent because the project directory
/// itself must be importable as a package named after itself.
pub fn is_project_root(listing: &DirListing, options: &LocateOptions) -> Result<bool> {
    let Some(base) = listing.base_name() else {
        return Ok(false);
    };
    let Some(parent) = listing.path.parent() else {
        return Ok(false);
    };

    for submodule in &options.submodules {
        let dotted = format!("{base}.{submodule}");
        if !pymod::module_exists(parent, &dotted, &options.extensions)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Find the nearest project root, ascending from `start` and descending into
/// a marker-anchored subtree when one is hit.
///
/// Returns the first matching directory; `Ok(None)` means the search space
/// was exhausted without a match, which is a normal outcome. Listings beyond
/// the first match are never read.
pub fn locate<P: AsRef<Path>>(start: P, options: &LocateOptions) -> Result<Option<PathBuf>> {
    let start = fs::canonicalize(start.as_ref()).map_err(|source| LocateError::Io {
        path: start.as_ref().to_path_buf(),
        source,
    })?;
    info!("Searching for a project root from {}", start.display());

    for listing in Candidates::new(&start, &options.marker) {
        let listing = listing?;
        debug!("Considering {}", listing);
        if is_project_root(&listing, options)? {
            info!("Found project root at {}", listing.path.display());
            return Ok(Some(listing.path));
        }
    }

    debug!("Search space exhausted without a match");
    Ok(None)
}
