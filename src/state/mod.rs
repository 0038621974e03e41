//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageOutcome`: what happened to a single dequeued URL
//! - `RunState`: the `Running` → `Done` lifecycle of a crawl run
//! - `TerminationReason`: why a run reached `Done`

mod page_outcome;
mod run_state;

pub use page_outcome::PageOutcome;
pub use run_state::{RunState, TerminationReason};
