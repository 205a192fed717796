//! Commit workflow state machine
//!
//! Each state has one handler that performs the state's entry action and
//! returns the next state. `Finished` is the only terminal state, and the
//! only way into it from `Commit` is through the single commit call, so a
//! run commits at most once.

use super::types::{CommitDraft, Headline, WorkflowOutcome, format_commit_preview};
use crate::config::Config;
use crate::core::llm::{SuggestionContext, Suggester};
use crate::git::{VersionControl, format_commit_result};
use crate::tui::{Prompter, SpinnerState, run_with_spinner};
use crate::ui;

use anyhow::{Context, Result};
use log::{debug, warn};

pub const OFFER_AI_PROMPT: &str = "Use AI to suggest commit message? (y/N): ";
pub const ACCEPT_SUGGESTION_PROMPT: &str = "Use this AI suggestion? (y/N): ";
pub const COMMIT_TYPE_PROMPT: &str = "Select the type of commit:";
pub const SCOPE_PROMPT: &str = "Select the scope of your changes:";
pub const DESCRIPTION_PROMPT: &str = "Enter the description of your changes: ";
pub const CONFIRM_PROMPT: &str = "Commit with this message? (Y/n): ";

#[derive(Debug)]
enum State {
    StageAll,
    OfferAi,
    FetchDiff,
    RequestSuggestion(String),
    ConfirmSuggestion(String),
    ManualCompose,
    OptionalDetails,
    OptionalConfirm,
    Commit,
    Finished(WorkflowOutcome),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            Self::StageAll => "StageAll",
            Self::OfferAi => "OfferAi",
            Self::FetchDiff => "FetchDiff",
            Self::RequestSuggestion(_) => "RequestSuggestion",
            Self::ConfirmSuggestion(_) => "ConfirmSuggestion",
            Self::ManualCompose => "ManualCompose",
            Self::OptionalDetails => "OptionalDetails",
            Self::OptionalConfirm => "OptionalConfirm",
            Self::Commit => "Commit",
            Self::Finished(_) => "Finished",
        }
    }
}

/// One interactive commit, from staging to commit or cancellation
pub struct CommitWorkflow<'a, P, G, S> {
    config: &'a Config,
    prompter: &'a mut P,
    git: &'a G,
    suggester: &'a S,
    draft: CommitDraft,
}

impl<'a, P, G, S> CommitWorkflow<'a, P, G, S>
where
    P: Prompter,
    G: VersionControl,
    S: Suggester + Sync,
{
    pub fn new(config: &'a Config, prompter: &'a mut P, git: &'a G, suggester: &'a S) -> Self {
        Self {
            config,
            prompter,
            git,
            suggester,
            draft: CommitDraft::default(),
        }
    }

    /// Drives the state machine to its outcome.
    ///
    /// Errors from staging, committing or reading input are returned as-is;
    /// suggestion failures never are.
    pub async fn run(mut self) -> Result<WorkflowOutcome> {
        let mut state = State::StageAll;
        loop {
            debug!("Commit workflow entering {}", state.name());
            state = match state {
                State::StageAll => self.stage_all()?,
                State::OfferAi => self.offer_ai()?,
                State::FetchDiff => self.fetch_diff()?,
                State::RequestSuggestion(diff) => self.request_suggestion(&diff).await,
                State::ConfirmSuggestion(suggestion) => self.confirm_suggestion(suggestion)?,
                State::ManualCompose => self.manual_compose()?,
                State::OptionalDetails => self.optional_details()?,
                State::OptionalConfirm => self.optional_confirm()?,
                State::Commit => self.commit()?,
                State::Finished(outcome) => {
                    debug!("Commit workflow finished: {outcome:?}");
                    return Ok(outcome);
                }
            };
        }
    }

    fn stage_all(&mut self) -> Result<State> {
        self.git
            .stage_all()
            .context("Failed to stage changes")?;
        ui::print_success("Successfully added all files to staging");
        Ok(State::OfferAi)
    }

    fn offer_ai(&mut self) -> Result<State> {
        if !self.config.api_key_present() {
            debug!("No API key configured, skipping AI suggestion");
            return Ok(State::ManualCompose);
        }

        if self.prompter.confirm(OFFER_AI_PROMPT, false)? {
            Ok(State::FetchDiff)
        } else {
            Ok(State::ManualCompose)
        }
    }

    fn fetch_diff(&mut self) -> Result<State> {
        let diff = self
            .git
            .diff_staged()
            .context("Failed to read staged changes")?;

        if diff.trim().is_empty() {
            warn!("Staged diff is empty, skipping AI suggestion");
            ui::print_warning("⚠️ No staged changes found for AI analysis.");
            ui::print_info("Continuing with manual commit...");
            return Ok(State::ManualCompose);
        }

        Ok(State::RequestSuggestion(diff))
    }

    async fn request_suggestion(&mut self, diff: &str) -> State {
        let context = SuggestionContext::from_config(self.config);
        let suggester = self.suggester;

        let result = run_with_spinner(SpinnerState::new(), || {
            suggester.suggest(diff, &context)
        })
        .await;

        match result {
            Ok(suggestion) => State::ConfirmSuggestion(suggestion),
            Err(e) => {
                warn!("Suggestion failed: {e:#}");
                ui::print_warning(&format!("❌ AI suggestion failed: {e}"));
                ui::print_info("Continuing with manual commit...");
                State::ManualCompose
            }
        }
    }

    fn confirm_suggestion(&mut self, suggestion: String) -> Result<State> {
        ui::print_info(&format!("🎯 AI Suggestion: {suggestion}"));

        if self.prompter.confirm(ACCEPT_SUGGESTION_PROMPT, false)? {
            self.draft.headline = Some(Headline::Suggested(suggestion));
            Ok(State::OptionalDetails)
        } else {
            Ok(State::ManualCompose)
        }
    }

    fn manual_compose(&mut self) -> Result<State> {
        ui::print_info("📝 Manual commit process:");

        let commit_type = self
            .prompter
            .select(COMMIT_TYPE_PROMPT, &self.config.commit_types)?;
        let scope = self
            .prompter
            .select(SCOPE_PROMPT, &self.config.scope_types)?;
        let description = self.prompter.ask(DESCRIPTION_PROMPT)?;

        self.draft.headline = Some(Headline::Composed {
            commit_type,
            scope,
            description,
        });
        Ok(State::OptionalDetails)
    }

    fn optional_details(&mut self) -> Result<State> {
        if self.config.questions.ask_for_details {
            let answer = self.prompter.ask(&self.config.questions.details_prompt)?;
            self.draft.set_details(answer);
        }
        Ok(State::OptionalConfirm)
    }

    fn optional_confirm(&mut self) -> Result<State> {
        let (subject, body) = self.draft.finalize()?;
        ui::print_bordered_content(
            "Commit Message",
            format_commit_preview(&subject, body.as_deref()).trim_end(),
        );

        if self.config.questions.confirm_before_commit
            && !self.prompter.confirm(CONFIRM_PROMPT, true)?
        {
            ui::print_warning("Commit cancelled. Your changes remain staged.");
            return Ok(State::Finished(WorkflowOutcome::Cancelled));
        }

        Ok(State::Commit)
    }

    fn commit(&mut self) -> Result<State> {
        let (subject, body) = self.draft.finalize()?;

        let result = self
            .git
            .commit(&subject, body.as_deref())
            .context("Failed to commit")?;

        ui::print_success("✅ Successfully committed");
        ui::print_message(format_commit_result(&result, &subject).trim_end());

        Ok(State::Finished(WorkflowOutcome::Committed { subject, body }))
    }
}
