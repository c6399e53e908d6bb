use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{LocateError, Result};
use crate::listing::DirListing;

/// Lazy walk from a directory up to the filesystem root, inclusive.
///
/// Each call to `next` reads one listing; nothing above the current
/// directory is touched until the caller asks for it. The iterator holds no
/// shared state, so a fresh walk is just a fresh `Ancestors`.
pub struct Ancestors {
    next: Option<PathBuf>,
}

impl Ancestors {
    pub fn new<P: AsRef<Path>>(start: P) -> Ancestors {
        Ancestors {
            next: Some(start.as_ref().to_path_buf()),
        }
    }
}

impl Iterator for Ancestors {
    type Item = Result<DirListing>;

    fn next(&mut self) -> Option<Self::Item> {
        let dir = self.next.take()?;
        // `parent()` is None once the root has been listed; an empty parent
        // means a relative walk ran out of components.
        self.next = dir
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Some(DirListing::read(&dir))
    }
}

enum Mode {
    Ascending(Ancestors),
    Descending(walkdir::IntoIter),
    Done,
}

/// Candidate directories for project-root matching.
///
/// Walks upward by default. When a listing carries the marker file, the walk
/// switches to a full recursive descent rooted at that directory (the marker
/// directory itself first), and the enumeration ends once the descent is
/// exhausted; ascent never resumes above the marker.
pub struct Candidates {
    marker: String,
    mode: Mode,
}

impl Candidates {
    pub fn new<P: AsRef<Path>>(start: P, marker: &str) -> Candidates {
        Candidates {
            marker: marker.to_string(),
            mode: Mode::Ascending(Ancestors::new(start)),
        }
    }
}

impl Iterator for Candidates {
    type Item = Result<DirListing>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.mode {
                Mode::Ascending(ancestors) => {
                    let listing = match ancestors.next() {
                        Some(Ok(listing)) => listing,
                        Some(Err(err)) => return Some(Err(err)),
                        None => {
                            self.mode = Mode::Done;
                            return None;
                        }
                    };
                    if listing.has_file(&self.marker) {
                        // Anchored: stop ascending, scan the whole subtree.
                        self.mode = Mode::Descending(WalkDir::new(&listing.path).into_iter());
                        continue;
                    }
                    return Some(Ok(listing));
                }
                Mode::Descending(walk) => {
                    for entry in walk.by_ref() {
                        let entry = match entry {
                            Ok(entry) => entry,
                            Err(source) => return Some(Err(LocateError::Walk { source })),
                        };
                        if entry.file_type().is_dir() {
                            return Some(DirListing::read(entry.path()));
                        }
                    }
                    self.mode = Mode::Done;
                    return None;
                }
                Mode::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_ancestors_starts_at_start_and_ends_at_root() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let deep = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();

        let listings: Vec<DirListing> =
            Ancestors::new(&deep).collect::<Result<Vec<_>>>()?;

        assert_eq!(listings.first().unwrap().path, deep);
        // Terminates, and the last listing is the filesystem root.
        let last = listings.last().unwrap();
        assert!(last.path.parent().is_none());
        Ok(())
    }

    #[test]
    fn test_ancestors_walks_through_each_parent() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let deep = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();

        let paths: Vec<PathBuf> = Ancestors::new(&deep)
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(|listing| listing.path)
            .collect();

        assert!(paths.contains(&deep));
        assert!(paths.contains(&temp_dir.path().join("a")));
        assert!(paths.contains(&temp_dir.path().to_path_buf()));
        Ok(())
    }

    #[test]
    fn test_candidates_ascend_without_marker() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let deep = temp_dir.path().join("x").join("y");
        fs::create_dir_all(&deep).unwrap();

        let first = Candidates::new(&deep, ".djroot").next().unwrap()?;
        assert_eq!(first.path, deep);
        Ok(())
    }

    #[test]
    fn test_candidates_switch_to_descent_on_marker() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let common = temp_dir.path().join("common");
        let sibling = common.join("sub").join("proj");
        let start = common.join("sub").join("other");
        fs::create_dir_all(&sibling).unwrap();
        fs::create_dir_all(&start).unwrap();
        fs::write(common.join(".djroot"), "").unwrap();

        let paths: BTreeSet<PathBuf> = Candidates::new(&start, ".djroot")
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(|listing| listing.path)
            .collect();

        // Descent covers the sibling branch the ascent alone never would.
        assert!(paths.contains(&sibling));
        assert!(paths.contains(&common));
        // Ascent stops at the marker: nothing above `common` is listed.
        assert!(!paths.contains(&temp_dir.path().to_path_buf()));
        Ok(())
    }

    #[test]
    fn test_descent_is_not_entered_before_the_marker() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let marked = temp_dir.path().join("marked");
        let below = marked.join("below");
        let start = temp_dir.path().join("start");
        fs::create_dir_all(&below).unwrap();
        fs::create_dir_all(&start).unwrap();
        fs::write(marked.join(".djroot"), "").unwrap();

        // `marked` is a sibling of `start`, not an ancestor: pure ascent
        // never sees the marker and never descends into `below`.
        let paths: Vec<PathBuf> = Candidates::new(&start, ".djroot")
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(|listing| listing.path)
            .collect();

        assert!(!paths.contains(&below));
        assert!(!paths.contains(&marked));
        Ok(())
    }
}
