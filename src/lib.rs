//! tdgen — batch TableGen JSON extraction.
//!
//! Discovers which `.td` description files transitively belong to each
//! LLVM target's grammar (by textual include relationships) and drives
//! `llvm-tblgen --dump-json` once per file, in parallel, skipping files
//! whose JSON artifact already exists.

pub mod cli;
pub mod core;
pub mod eventlog;
