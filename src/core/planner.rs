//! Task planning — map resolved files to output artifacts, skip existing ones.
//!
//! An artifact's existence is the only freshness signal: content and input
//! modification times are never compared. A changed input with a stale
//! artifact is not regenerated unless the artifact is removed or the run
//! is forced.

use super::types::{GenerationTask, Plan, TargetSet};
use std::path::{Path, PathBuf};

/// Deterministic artifact path for one resolved file.
/// Injective over (arch, stem): distinct files never share an output.
pub fn output_path(output_root: &Path, arch: &str, stem: &str) -> PathBuf {
    output_root.join(arch).join(format!("{}.json", stem))
}

/// Build the flat task list for all resolved target sets.
///
/// Ensures each output's parent directory exists (idempotent create) and
/// skips any file whose artifact is already on disk, unless `force`
/// replans everything. Never invokes the generator.
pub fn plan(
    targets: &[TargetSet],
    tblgen: &Path,
    llvm_root: &Path,
    output_root: &Path,
    force: bool,
) -> Result<Plan, String> {
    let shared_include = llvm_root.join("include");
    let mut plan = Plan::default();

    for set in targets {
        for file in &set.files {
            let output = output_path(output_root, &set.arch, &file.stem);
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
            }
            if output.exists() && !force {
                plan.skipped.push(file.path.clone());
                continue;
            }
            let own_dir = file
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            plan.tasks.push(GenerationTask {
                tblgen: tblgen.to_path_buf(),
                input: file.path.clone(),
                include_dirs: vec![own_dir, shared_include.clone()],
                output,
            });
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DescriptionFile;

    fn make_set(arch: &str, stems: &[&str]) -> TargetSet {
        TargetSet {
            arch: arch.to_string(),
            files: stems
                .iter()
                .map(|stem| DescriptionFile {
                    path: PathBuf::from(format!("/llvm/lib/Target/{}/{}.td", arch, stem)),
                    arch: arch.to_string(),
                    stem: stem.to_string(),
                    content: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_output_path_shape() {
        let p = output_path(Path::new("/out"), "ArchX", "XInstrInfo");
        assert_eq!(p, PathBuf::from("/out/ArchX/XInstrInfo.json"));
    }

    #[test]
    fn test_output_path_injective() {
        let out = Path::new("/out");
        let a = output_path(out, "ArchX", "X");
        let b = output_path(out, "ArchX", "XInstrInfo");
        let c = output_path(out, "ArchY", "X");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_plan_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sets = vec![make_set("ArchX", &["X"])];
        let plan = plan(&sets, Path::new("tblgen"), Path::new("/llvm"), &out, false).unwrap();
        assert_eq!(plan.tasks.len(), 1);
        assert!(out.join("ArchX").is_dir());
    }

    #[test]
    fn test_plan_include_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let sets = vec![make_set("ArchX", &["X"])];
        let plan = plan(
            &sets,
            Path::new("/usr/bin/llvm-tblgen"),
            Path::new("/llvm"),
            dir.path(),
            false,
        )
        .unwrap();
        let task = &plan.tasks[0];
        assert_eq!(task.tblgen, PathBuf::from("/usr/bin/llvm-tblgen"));
        assert_eq!(
            task.include_dirs,
            vec![
                PathBuf::from("/llvm/lib/Target/ArchX"),
                PathBuf::from("/llvm/include"),
            ]
        );
    }

    #[test]
    fn test_idempotent_replanning() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sets = vec![make_set("ArchX", &["X", "XInstrInfo"])];

        let first = plan(&sets, Path::new("tblgen"), Path::new("/llvm"), &out, false).unwrap();
        assert_eq!(first.tasks.len(), 2);

        // Pretend the first run produced both artifacts
        for task in &first.tasks {
            std::fs::write(&task.output, "{}").unwrap();
        }

        let second = plan(&sets, Path::new("tblgen"), Path::new("/llvm"), &out, false).unwrap();
        assert!(second.tasks.is_empty());
        assert_eq!(second.skipped.len(), 2);
    }

    #[test]
    fn test_partial_artifacts_partial_plan() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sets = vec![make_set("ArchX", &["X", "XInstrInfo"])];

        std::fs::create_dir_all(out.join("ArchX")).unwrap();
        std::fs::write(out.join("ArchX").join("X.json"), "{}").unwrap();

        let plan = plan(&sets, Path::new("tblgen"), Path::new("/llvm"), &out, false).unwrap();
        assert_eq!(plan.tasks.len(), 1);
        assert!(plan.tasks[0].output.ends_with("ArchX/XInstrInfo.json"));
        assert_eq!(plan.skipped.len(), 1);
    }

    #[test]
    fn test_force_replans_existing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sets = vec![make_set("ArchX", &["X"])];

        std::fs::create_dir_all(out.join("ArchX")).unwrap();
        std::fs::write(out.join("ArchX").join("X.json"), "{}").unwrap();

        let plan = plan(&sets, Path::new("tblgen"), Path::new("/llvm"), &out, true).unwrap();
        assert_eq!(plan.tasks.len(), 1);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_plan_spans_architectures() {
        let dir = tempfile::tempdir().unwrap();
        let sets = vec![make_set("ArchX", &["X"]), make_set("ArchY", &["Y"])];
        let plan = plan(&sets, Path::new("tblgen"), Path::new("/llvm"), dir.path(), false)
            .unwrap();
        assert_eq!(plan.tasks.len(), 2);
        assert!(plan.tasks[0].output.ends_with("ArchX/X.json"));
        assert!(plan.tasks[1].output.ends_with("ArchY/Y.json"));
    }
}
