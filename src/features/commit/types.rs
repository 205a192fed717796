use anyhow::{Result, anyhow};

/// Subject line source chosen during the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Headline {
    /// Accepted suggestion, used verbatim
    Suggested(String),
    /// Picked from the menus and typed by the user
    Composed {
        commit_type: String,
        scope: String,
        description: String,
    },
}

impl Headline {
    pub fn subject(&self) -> String {
        match self {
            Self::Suggested(subject) => subject.clone(),
            Self::Composed {
                commit_type,
                scope,
                description,
            } => compose_subject(commit_type, scope, description),
        }
    }
}

/// `type(scope): description`, with every part exactly as given
pub fn compose_subject(commit_type: &str, scope: &str, description: &str) -> String {
    format!("{commit_type}({scope}): {description}")
}

/// Commit message fields gathered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitDraft {
    pub headline: Option<Headline>,
    pub details: Option<String>,
}

impl CommitDraft {
    /// Records the optional details answer; a blank answer means no body
    pub fn set_details(&mut self, answer: String) {
        self.details = if answer.trim().is_empty() {
            None
        } else {
            Some(answer)
        };
    }

    /// Subject and body, ready for the commit call
    pub fn finalize(&self) -> Result<(String, Option<String>)> {
        let headline = self
            .headline
            .as_ref()
            .ok_or_else(|| anyhow!("Commit subject was never chosen"))?;
        Ok((headline.subject(), self.details.clone()))
    }
}

/// How one run of the workflow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Committed {
        subject: String,
        body: Option<String>,
    },
    Cancelled,
}

/// Formats a commit message preview, wrapping the body at 78 columns
pub fn format_commit_preview(subject: &str, body: Option<&str>) -> String {
    let mut message = String::new();
    message.push_str(subject);
    message.push('\n');

    if let Some(body) = body {
        message.push('\n');
        for line in textwrap::wrap(body, 78) {
            message.push_str(&line);
            message.push('\n');
        }
    }

    message
}
