//! Candidate discovery — architecture directories and their `.td` files.

use super::types::DescriptionFile;
use std::path::{Path, PathBuf};

/// List the architecture directories under `{llvm_root}/lib/Target`,
/// sorted by name. An unreadable root aborts the run: scanning is a
/// prerequisite for every later stage.
pub fn target_dirs(llvm_root: &Path) -> Result<Vec<PathBuf>, String> {
    let root = llvm_root.join("lib").join("Target");
    let entries = std::fs::read_dir(&root)
        .map_err(|e| format!("cannot read target root {}: {}", root.display(), e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| format!("cannot read entry in {}: {}", root.display(), e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// List and read every `*.td` file directly inside one directory, in path
/// order. Non-recursive: nested directories belong to other closures.
pub fn scan_dir(dir: &Path) -> Result<Vec<DescriptionFile>, String> {
    let pattern = format!("{}/*.td", dir.display());
    let paths =
        glob::glob(&pattern).map_err(|e| format!("bad glob pattern {}: {}", pattern, e))?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(|e| format!("cannot scan {}: {}", dir.display(), e))?;
        files.push(DescriptionFile::read(&path)?);
    }
    Ok(files)
}
