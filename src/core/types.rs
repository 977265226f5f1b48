//! Pipeline types — description files, target sets, tasks, outcomes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Description files
// ============================================================================

/// One TableGen description file. The text is read from disk exactly once,
/// at scan time, and is immutable afterwards.
#[derive(Debug, Clone)]
pub struct DescriptionFile {
    /// Path on disk
    pub path: PathBuf,

    /// Name of the containing architecture directory (e.g. "X86")
    pub arch: String,

    /// File stem without the .td suffix
    pub stem: String,

    /// Raw file text
    pub content: String,
}

impl DescriptionFile {
    /// Read a description file from disk.
    pub fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let arch = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| format!("{} has no containing directory", path.display()))?;
        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| format!("{} has no file stem", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            arch,
            stem,
            content,
        })
    }

    /// File name as it appears in include statements, e.g. "X86InstrInfo.td".
    pub fn file_name(&self) -> String {
        format!("{}.td", self.stem)
    }
}

/// The resolved grammar closure for one architecture directory,
/// in discovery order. A file appears at most once.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    /// Architecture directory name
    pub arch: String,

    /// Admitted files, ordered by when the closure first admitted them
    pub files: Vec<DescriptionFile>,
}

impl TargetSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// One pending generator invocation.
#[derive(Debug, Clone)]
pub struct GenerationTask {
    /// Path to the llvm-tblgen executable
    pub tblgen: PathBuf,

    /// Input description file
    pub input: PathBuf,

    /// Include search path: the input's own directory, then the shared
    /// include root inside the source tree
    pub include_dirs: Vec<PathBuf>,

    /// Destination JSON artifact
    pub output: PathBuf,
}

/// Output of the planner: tasks to run, plus inputs skipped because their
/// artifact already exists.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub tasks: Vec<GenerationTask>,
    pub skipped: Vec<PathBuf>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Terminal state of one generator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Generated,
    Failed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => write!(f, "GENERATED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Result of one generator invocation.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: TaskStatus,

    /// Exit code of the generator; None when it was killed by a signal
    /// or never spawned
    pub exit_code: Option<i32>,

    pub duration: Duration,
}

impl TaskOutcome {
    pub fn success(&self) -> bool {
        self.status == TaskStatus::Generated
    }
}

/// Aggregate counts for one generate run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub generated: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total: Duration,
}

impl RunSummary {
    /// Fold per-task outcomes and the planner's skip count into run totals.
    pub fn from_outcomes(outcomes: &[TaskOutcome], skipped: usize, total: Duration) -> Self {
        let generated = outcomes.iter().filter(|o| o.success()).count();
        Self {
            generated,
            failed: outcomes.len() - generated,
            skipped,
            total,
        }
    }
}
