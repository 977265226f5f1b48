//! Transitive include-closure resolution over one architecture directory.
//!
//! Admission is textual: a file joins the closure when its text contains the
//! root-grammar sentinel, or an `include "Name.td"` string naming a file
//! already admitted. Matching sits behind [`IncludeMatcher`] so a structured
//! parser can replace the substring heuristic without touching the worklist
//! algorithm.

use super::scanner;
use super::types::{DescriptionFile, TargetSet};
use indexmap::IndexMap;
use std::path::Path;

/// Exact include string that marks a directory's root grammar file.
pub const ROOT_SENTINEL: &str = "include \"llvm/Target/Target.td\"";

/// Matching seam between raw file text and include edges.
pub trait IncludeMatcher {
    /// Does this text mark the file as a root grammar file?
    fn is_root(&self, text: &str) -> bool;

    /// Does this text include the named file?
    fn edge_exists(&self, text: &str, candidate_name: &str) -> bool;
}

/// Verbatim substring matching. A file that merely mentions another file's
/// include string in unrelated text (a comment, say) is admitted; that is
/// the documented heuristic, not a defect to patch here.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualMatcher;

impl IncludeMatcher for TextualMatcher {
    fn is_root(&self, text: &str) -> bool {
        text.contains(ROOT_SENTINEL)
    }

    fn edge_exists(&self, text: &str, candidate_name: &str) -> bool {
        text.contains(&format!("include \"{}\"", candidate_name))
    }
}

/// Compute the grammar closure for one directory's candidate files.
///
/// Explicit two-list worklist: each full pass moves files from `remaining`
/// to `admitted` when they match the sentinel or include an already-admitted
/// file; a file admitted earlier in the same pass counts for later ones.
/// Stops at the first pass that admits nothing. Every earlier pass shrank
/// `remaining` by at least one file, so the loop is bounded by the candidate
/// count, cycles or not. Admission is monotonic — never revoked.
pub fn resolve<M: IncludeMatcher>(
    matcher: &M,
    arch: &str,
    candidates: Vec<DescriptionFile>,
) -> TargetSet {
    let mut remaining = candidates;
    let mut admitted: Vec<DescriptionFile> = Vec::new();

    loop {
        let mut progressed = false;
        let mut held_back = Vec::with_capacity(remaining.len());

        for file in remaining {
            let joins = matcher.is_root(&file.content)
                || admitted
                    .iter()
                    .any(|t| matcher.edge_exists(&file.content, &t.file_name()));
            if joins {
                admitted.push(file);
                progressed = true;
            } else {
                held_back.push(file);
            }
        }

        remaining = held_back;
        if !progressed || remaining.is_empty() {
            break;
        }
    }

    TargetSet {
        arch: arch.to_string(),
        files: admitted,
    }
}

/// Resolve every architecture directory under `{llvm_root}/lib/Target`.
/// Closures never cross directory boundaries: two directories may both hold
/// an `X.td` without either leaking into the other's set.
pub fn resolve_all(llvm_root: &Path) -> Result<IndexMap<String, TargetSet>, String> {
    let mut sets = IndexMap::new();
    for dir in scanner::target_dirs(llvm_root)? {
        let arch = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let candidates = scanner::scan_dir(&dir)?;
        sets.insert(arch.clone(), resolve(&TextualMatcher, &arch, candidates));
    }
    Ok(sets)
}
