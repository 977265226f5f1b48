//! Core pipeline — scanning, closure resolution, task planning, dispatch.

pub mod dispatcher;
pub mod planner;
pub mod resolver;
pub mod scanner;
pub mod types;
