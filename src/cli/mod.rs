//! CLI subcommands — targets, plan, generate.

use crate::core::types::{Plan, RunSummary, TargetSet};
use crate::core::{dispatcher, planner, resolver};
use crate::eventlog;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List each architecture's resolved grammar files
    Targets {
        /// Path to the LLVM source root
        #[arg(long)]
        llvm: PathBuf,
    },

    /// Show which generation tasks would run, without invoking the generator
    Plan {
        /// Path to the llvm-tblgen executable
        #[arg(long)]
        tblgen: PathBuf,

        /// Path to the LLVM source root
        #[arg(long)]
        llvm: PathBuf,

        /// Output directory for JSON artifacts
        #[arg(short, long)]
        output: PathBuf,

        /// Plan files whose artifact already exists
        #[arg(long)]
        force: bool,
    },

    /// Run the generator over every planned file
    Generate {
        /// Path to the llvm-tblgen executable
        #[arg(long)]
        tblgen: PathBuf,

        /// Path to the LLVM source root
        #[arg(long)]
        llvm: PathBuf,

        /// Output directory for JSON artifacts
        #[arg(short, long)]
        output: PathBuf,

        /// Worker pool size (default: available parallelism)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Regenerate files whose artifact already exists
        #[arg(long)]
        force: bool,

        /// Exit non-zero if any generation task fails
        #[arg(long)]
        strict: bool,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Targets { llvm } => cmd_targets(&llvm),
        Commands::Plan {
            tblgen,
            llvm,
            output,
            force,
        } => cmd_plan(&tblgen, &llvm, &output, force),
        Commands::Generate {
            tblgen,
            llvm,
            output,
            jobs,
            force,
            strict,
        } => cmd_generate(&tblgen, &llvm, &output, jobs, force, strict),
    }
}

fn cmd_targets(llvm: &Path) -> Result<(), String> {
    let sets = resolver::resolve_all(llvm)?;
    for (arch, set) in &sets {
        if set.is_empty() {
            continue;
        }
        println!("{} ({} files):", arch, set.len());
        for file in &set.files {
            println!("  {}", file.file_name());
        }
    }
    Ok(())
}

/// Resolve every architecture and plan the full run.
fn plan_run(tblgen: &Path, llvm: &Path, output: &Path, force: bool) -> Result<Plan, String> {
    let sets = resolver::resolve_all(llvm)?;
    let targets: Vec<TargetSet> = sets.into_values().collect();
    planner::plan(&targets, tblgen, llvm, output, force)
}

fn cmd_plan(tblgen: &Path, llvm: &Path, output: &Path, force: bool) -> Result<(), String> {
    let plan = plan_run(tblgen, llvm, output, force)?;

    for task in &plan.tasks {
        println!("  + {} -> {}", task.input.display(), task.output.display());
    }
    for input in &plan.skipped {
        println!("  = {} (artifact exists)", input.display());
    }

    println!();
    println!(
        "Plan: {} to generate, {} up to date.",
        plan.tasks.len(),
        plan.skipped.len()
    );
    Ok(())
}

fn cmd_generate(
    tblgen: &Path,
    llvm: &Path,
    output: &Path,
    jobs: Option<usize>,
    force: bool,
    strict: bool,
) -> Result<(), String> {
    let start = Instant::now();
    let jobs = jobs.unwrap_or_else(dispatcher::default_jobs);
    let plan = plan_run(tblgen, llvm, output, force)?;

    let run_id = eventlog::generate_run_id();
    eventlog::append_event(
        output,
        eventlog::RunEvent::RunStarted {
            run_id: run_id.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            jobs,
            tasks: plan.tasks.len(),
        },
    )?;

    let outcomes = dispatcher::dispatch(&plan.tasks, jobs)?;

    for outcome in &outcomes {
        let event = if outcome.success() {
            eventlog::RunEvent::FileGenerated {
                input: outcome.input.display().to_string(),
                output: outcome.output.display().to_string(),
                duration_seconds: outcome.duration.as_secs_f64(),
            }
        } else {
            eventlog::RunEvent::FileFailed {
                input: outcome.input.display().to_string(),
                exit_code: outcome.exit_code,
            }
        };
        eventlog::append_event(output, event)?;
    }

    let summary = RunSummary::from_outcomes(&outcomes, plan.skipped.len(), start.elapsed());
    eventlog::append_event(
        output,
        eventlog::RunEvent::RunCompleted {
            run_id,
            generated: summary.generated,
            failed: summary.failed,
            skipped: summary.skipped,
            total_seconds: summary.total.as_secs_f64(),
        },
    )?;

    println!(
        "Generate complete: {} generated, {} failed, {} up to date ({:.1}s)",
        summary.generated,
        summary.failed,
        summary.skipped,
        summary.total.as_secs_f64()
    );

    // Default behavior matches the original driver: per-task failures do
    // not change the process exit status.
    if strict && summary.failed > 0 {
        return Err(format!("{} generation task(s) failed", summary.failed));
    }
    Ok(())
}
