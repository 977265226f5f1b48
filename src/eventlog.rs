//! Append-only JSONL run log, written next to the artifacts.
//!
//! Workers never write here: the dispatcher returns outcomes and the CLI
//! appends events sequentially, so the log needs no locking.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One logged event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted {
        run_id: String,
        version: String,
        jobs: usize,
        tasks: usize,
    },
    FileGenerated {
        input: String,
        output: String,
        duration_seconds: f64,
    },
    FileFailed {
        input: String,
        exit_code: Option<i32>,
    },
    RunCompleted {
        run_id: String,
        generated: usize,
        failed: usize,
        skipped: usize,
        total_seconds: f64,
    },
}

/// Timestamped wrapper as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    #[serde(flatten)]
    pub event: RunEvent,
}

/// ISO 8601 UTC timestamp, no chrono dependency.
pub fn now_iso8601() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let t = secs % 86400;
    let (hours, minutes, seconds) = (t / 3600, (t % 3600) / 60, t % 60);

    let mut days = secs / 86400;
    let mut year = 1970u64;
    loop {
        let len = if is_leap(year) { 366 } else { 365 };
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }
    let feb = if is_leap(year) { 29 } else { 28 };
    let mut month = 1;
    for len in [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31] {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        days + 1,
        hours,
        minutes,
        seconds
    )
}

fn is_leap(year: u64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Generate a run ID from the clock.
pub fn generate_run_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("run-{:012x}", nanos & 0xFFFF_FFFF_FFFF)
}

/// The log lives beside the artifacts it describes.
pub fn event_log_path(output_root: &Path) -> PathBuf {
    output_root.join("events.jsonl")
}

/// Append one event, creating the output root on first use.
pub fn append_event(output_root: &Path, event: RunEvent) -> Result<(), String> {
    let path = event_log_path(output_root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create output root: {}", e))?;
    }

    let te = TimestampedEvent {
        ts: now_iso8601(),
        event,
    };
    let json = serde_json::to_string(&te).map_err(|e| format!("JSON serialize error: {}", e))?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open event log {}: {}", path.display(), e))?;

    writeln!(file, "{}", json).map_err(|e| format!("write error: {}", e))?;

    Ok(())
}
