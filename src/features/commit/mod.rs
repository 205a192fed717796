pub mod prompt;
pub mod types;
pub mod workflow;

pub use types::{CommitDraft, Headline, WorkflowOutcome, compose_subject, format_commit_preview};
pub use workflow::CommitWorkflow;
