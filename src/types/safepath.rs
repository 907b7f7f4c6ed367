use std::path::{Component, Path, PathBuf};

use super::errors::{Error, ErrorKind, Result};

/// A planner-supplied path confined to the workspace root.
///
/// This is the single choke point every file-touching action must pass
/// through. Construction takes the raw planner string, never a pre-sanitized
/// one, so a double-encoded traversal cannot slip past the checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafePath {
    /// Canonicalized workspace root.
    root: PathBuf,
    /// The relative path component, `..`-free.
    rel: PathBuf,
}

impl SafePath {
    /// Confines `candidate` to `root`.
    ///
    /// Fails with a `PathViolation` when the candidate is absolute, starts
    /// with a home-directory marker, contains a `..` segment, or — after
    /// resolving symlinks along its existing prefix — does not lie within the
    /// canonicalized root. The root itself is an allowed boundary case.
    pub fn from_rooted(root: &Path, candidate: &str) -> Result<Self> {
        if candidate.starts_with('/') {
            return Err(Error::path("absolute paths are forbidden"));
        }
        if candidate.starts_with('~') {
            return Err(Error::path("home-relative paths are forbidden"));
        }

        let mut rel = PathBuf::new();
        for seg in Path::new(candidate).components() {
            match seg {
                Component::CurDir => {}
                Component::Normal(p) => rel.push(p),
                Component::ParentDir => {
                    return Err(Error::path(format!("'..' in path: {candidate}")));
                }
                _ => {
                    return Err(Error::path(format!(
                        "unsupported path component: {candidate}"
                    )));
                }
            }
        }

        let root = root.canonicalize().map_err(|e| {
            Error::new(ErrorKind::Io, format!("workspace root: {e}"))
        })?;
        let target = resolve_existing_prefix(&root.join(&rel))
            .ok_or_else(|| Error::path(format!("unresolvable symlink in path: {candidate}")))?;
        if target != root && !target.starts_with(&root) {
            return Err(Error::path(format!("path escapes the workspace: {candidate}")));
        }
        Ok(SafePath { root, rel })
    }

    /// Full path: canonicalized root joined with the relative component.
    pub fn as_path(&self) -> PathBuf {
        self.root.join(&self.rel)
    }

    /// The relative component.
    pub fn rel(&self) -> &Path {
        &self.rel
    }
}

/// Resolve symlinks over the longest existing prefix of `path`, then re-append
/// the not-yet-existing remainder. Targets of create actions usually do not
/// exist yet, so a plain `canonicalize` would fail.
///
/// The walk uses `symlink_metadata`: a symlink counts as existing even when
/// dangling and is resolved before containment is checked, so a broken link
/// inside the root cannot smuggle a write outside it. `None` means the chain
/// could not be resolved (a link cycle or an unreadable link); callers must
/// fail closed.
fn resolve_existing_prefix(path: &Path) -> Option<PathBuf> {
    resolve_with_budget(path, MAX_LINK_HOPS)
}

// Matches the kernel's ELOOP-style bound on chained symlinks.
const MAX_LINK_HOPS: u32 = 40;

fn resolve_with_budget(path: &Path, links_left: u32) -> Option<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut tail: Vec<std::ffi::OsString> = Vec::new();
    while std::fs::symlink_metadata(&existing).is_err() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => return Some(path.to_path_buf()),
        }
    }
    let mut out = match existing.canonicalize() {
        Ok(c) => c,
        // Dangling symlink: canonicalize refuses, so chase the link by hand.
        Err(_) => {
            if links_left == 0 {
                return None;
            }
            let target = std::fs::read_link(&existing).ok()?;
            let joined = if target.is_absolute() {
                target
            } else {
                existing.parent().unwrap_or(Path::new("/")).join(target)
            };
            resolve_with_budget(&joined, links_left - 1)?
        }
    };
    for name in tail.iter().rev() {
        out.push(name);
    }
    Some(out)
}

/// Create the parent directory chain of `path` if missing. Idempotent.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
