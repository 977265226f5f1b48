//! Parallel task execution against the external generator.

use super::types::{GenerationTask, TaskOutcome, TaskStatus};
use rayon::prelude::*;
use std::process::Command;
use std::time::Instant;

/// Worker count used when the caller does not ask for one.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run every task on a pool of exactly `jobs` worker threads.
///
/// Tasks have no ordering dependency and disjoint output paths, so workers
/// share nothing mutable. Each worker blocks on one child process at a time;
/// a hung generator holds its slot, there are no timeouts. A failed task is
/// reported and recorded but never cancels or delays its siblings.
pub fn dispatch(tasks: &[GenerationTask], jobs: usize) -> Result<Vec<TaskOutcome>, String> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .map_err(|e| format!("cannot build worker pool: {}", e))?;

    Ok(pool.install(|| tasks.par_iter().map(run_task).collect()))
}

/// Invoke the generator once: `tblgen INPUT -I DIR... --dump-json -o OUTPUT`.
/// Child stdout/stderr are inherited, matching how the tool is normally run.
fn run_task(task: &GenerationTask) -> TaskOutcome {
    let start = Instant::now();

    let mut cmd = Command::new(&task.tblgen);
    cmd.arg(&task.input);
    for dir in &task.include_dirs {
        cmd.arg("-I").arg(dir);
    }
    cmd.arg("--dump-json").arg("-o").arg(&task.output);

    let (status, exit_code) = match cmd.status() {
        Ok(s) if s.success() => (TaskStatus::Generated, s.code()),
        Ok(s) => (TaskStatus::Failed, s.code()),
        Err(_) => (TaskStatus::Failed, None),
    };

    if status == TaskStatus::Failed {
        eprintln!("failed to process {}", task.input.display());
    }

    TaskOutcome {
        input: task.input.clone(),
        output: task.output.clone(),
        status,
        exit_code,
        duration: start.elapsed(),
    }
}
