//! Run-scoped trash: deleted files are relocated, never erased.
//!
//! Layout: `.plangate/trash/<run_id>/<relpath>`, mirroring the original
//! relative path so a human can put the file back. No automatic purge.

use std::path::{Path, PathBuf};

use crate::constants::TRASH_DIR;
use crate::types::{ensure_parent, Error, Result};

/// Absolute trash destination for `rel` under the given run.
pub fn trash_path(workspace: &Path, run_id: &str, rel: &Path) -> PathBuf {
    workspace.join(TRASH_DIR).join(run_id).join(rel)
}

/// Move a regular file into the trash. Directories are always refused.
pub fn move_to_trash(abs: &Path, trash_abs: &Path) -> Result<()> {
    if abs.is_dir() {
        return Err(Error::action("directory deletion is blocked (files only)"));
    }
    ensure_parent(trash_abs)?;
    match std::fs::rename(abs, trash_abs) {
        Ok(()) => Ok(()),
        // rename cannot cross filesystems; fall back to copy+remove
        Err(_) => {
            std::fs::copy(abs, trash_abs)?;
            std::fs::remove_file(abs)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocates_preserving_relative_path() {
        let td = tempfile::tempdir().unwrap();
        let ws = td.path();
        std::fs::create_dir_all(ws.join("src")).unwrap();
        std::fs::write(ws.join("src/old.rs"), b"fn main() {}\n").unwrap();

        let dest = trash_path(ws, "run1", Path::new("src/old.rs"));
        move_to_trash(&ws.join("src/old.rs"), &dest).unwrap();

        assert!(!ws.join("src/old.rs").exists());
        assert_eq!(std::fs::read(dest).unwrap(), b"fn main() {}\n");
    }

    #[test]
    fn refuses_directories() {
        let td = tempfile::tempdir().unwrap();
        let ws = td.path();
        std::fs::create_dir_all(ws.join("dir")).unwrap();
        let dest = trash_path(ws, "run1", Path::new("dir"));
        assert!(move_to_trash(&ws.join("dir"), &dest).is_err());
        assert!(ws.join("dir").is_dir());
    }
}
