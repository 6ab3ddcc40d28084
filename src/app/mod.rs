pub mod config;
pub mod orchestrator;

pub use config::{AnalysisConfig, FailurePolicy};
pub use orchestrator::{Analysis, Orchestrator, RunEvent, RunState};
