pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod features;
pub mod git;
pub mod logger;
pub mod messages;
pub mod tui;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use crate::core::llm::{GeminiSuggester, Suggester, SuggestionContext};
pub use features::commit::{CommitWorkflow, WorkflowOutcome};
pub use git::{CommitResult, GitRepo, VersionControl};
pub use tui::Prompter;
