use crate::ui;

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the repository root
pub const CONFIG_FILE_NAME: &str = "commit-commander.toml";

pub const API_KEY_ENV_VARS: [&str; 2] = ["COMMIT_COMMANDER_API_KEY", "GEMINI_API_KEY"];
pub const MODEL_ENV_VAR: &str = "COMMIT_COMMANDER_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_DETAILS_PROMPT: &str = "Enter detailed description (optional): ";
pub const DEFAULT_MAX_DIFF_CHARS: usize = 100_000;

pub const DEFAULT_COMMIT_TYPES: [&str; 15] = [
    "⭐feat",
    "🐛fix",
    "📝docs",
    "💅style",
    "♻️refactor",
    "⚡perf",
    "🧪test",
    "📦build",
    "👷ci",
    "🔧chore",
    "↩️revert",
    "🚧wip",
    "🎉release",
    "🔄deps",
    "🔄other",
];

pub const DEFAULT_SCOPE_TYPES: [&str; 3] = ["🏠root", "🔄utils", "🔄other"];

/// Details-prompt values that mean "use the default" rather than a prompt
const DISMISSIVE_ANSWERS: [&str; 4] = ["", "n", "no", "none"];

/// Get a value with layered priority: first set environment variable, then the file value
fn get_layered_value<F>(env_vars: &[&str], file_value: Option<&str>, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    for &var in env_vars {
        if let Some(val) = lookup(var).filter(|v| !v.trim().is_empty()) {
            return Some(val);
        }
    }

    file_value
        .filter(|v| !v.trim().is_empty())
        .map(ToString::to_string)
}

/// Which optional questions the workflow asks
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Questions {
    #[serde(default = "default_true")]
    pub ask_for_details: bool,
    #[serde(default = "default_details_prompt")]
    pub details_prompt: String,
    #[serde(default = "default_true")]
    pub confirm_before_commit: bool,
}

impl Default for Questions {
    fn default() -> Self {
        Self {
            ask_for_details: true,
            details_prompt: DEFAULT_DETAILS_PROMPT.to_string(),
            confirm_before_commit: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_details_prompt() -> String {
    DEFAULT_DETAILS_PROMPT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_max_diff_chars() -> usize {
    DEFAULT_MAX_DIFF_CHARS
}

/// Configuration structure
#[derive(Deserialize, Serialize, Clone)]
pub struct Config {
    /// Gemini API key; the environment takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used for suggestions
    #[serde(default = "default_model")]
    pub model: String,
    /// Commit types offered in the type menu
    #[serde(default)]
    pub commit_types: Vec<String>,
    /// Scopes offered in the scope menu
    #[serde(default)]
    pub scope_types: Vec<String>,
    /// Extra instructions appended to the suggestion prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    /// Upper bound on the diff text sent to the model
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,
    #[serde(default)]
    pub questions: Questions,
    #[serde(skip)]
    pub temp_instructions: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("commit_types", &self.commit_types)
            .field("scope_types", &self.scope_types)
            .field("custom_prompt", &self.custom_prompt)
            .field("questions", &self.questions)
            .field("max_diff_chars", &self.max_diff_chars)
            .field("temp_instructions", &self.temp_instructions)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            commit_types: DEFAULT_COMMIT_TYPES.iter().map(ToString::to_string).collect(),
            scope_types: DEFAULT_SCOPE_TYPES.iter().map(ToString::to_string).collect(),
            custom_prompt: None,
            questions: Questions::default(),
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            temp_instructions: None,
        }
    }
}

impl Config {
    /// Location of the configuration file: the repository root, or the
    /// current directory outside a repository
    pub fn config_path() -> Result<PathBuf> {
        let base = match git2::Repository::discover(".") {
            Ok(repo) => match repo.workdir() {
                Some(workdir) => workdir.to_path_buf(),
                None => std::env::current_dir()?,
            },
            Err(_) => std::env::current_dir()?,
        };
        Ok(base.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration with layered priority: env > project file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load, layer and normalize the configuration stored at `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!(
                "Configuration not found at {}. Run `commit-commander init` to create one.",
                path.display()
            ));
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        config.apply_environment(&|name| std::env::var(name).ok());
        for notice in config.normalize() {
            warn!("{notice}");
            ui::print_warning(&format!("⚠️ {notice}"));
        }

        debug!("Configuration loaded: {config:?}");
        Ok(config)
    }

    /// Parse configuration text without environment layering or defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| anyhow!("Invalid configuration: {e}"))
    }

    /// Overlay values from the environment using `lookup`
    pub fn apply_environment<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key = get_layered_value(&API_KEY_ENV_VARS, self.api_key.as_deref(), lookup);
        if let Some(model) = get_layered_value(&[MODEL_ENV_VAR], Some(self.model.as_str()), lookup) {
            self.model = model;
        }
    }

    /// Replace missing or unusable values with defaults.
    ///
    /// Returns one notice per value that was replaced.
    pub fn normalize(&mut self) -> Vec<&'static str> {
        let mut notices = Vec::new();

        self.commit_types.retain(|t| !t.trim().is_empty());
        if self.commit_types.is_empty() {
            notices.push("No commit types found, using defaults...");
            self.commit_types = DEFAULT_COMMIT_TYPES.iter().map(ToString::to_string).collect();
        }

        self.scope_types.retain(|s| !s.trim().is_empty());
        if self.scope_types.is_empty() {
            notices.push("No scope types found, using defaults...");
            self.scope_types = DEFAULT_SCOPE_TYPES.iter().map(ToString::to_string).collect();
        }

        if is_dismissive(&self.questions.details_prompt) {
            notices.push("Invalid details prompt found, using default...");
            self.questions.details_prompt = DEFAULT_DETAILS_PROMPT.to_string();
        }

        if self.model.trim().is_empty() {
            self.model = DEFAULT_MODEL.to_string();
        }

        if self
            .custom_prompt
            .as_ref()
            .is_some_and(|p| p.trim().is_empty())
        {
            self.custom_prompt = None;
        }

        notices
    }

    /// Save the configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let content = format!("# commit-commander configuration\n\n{body}");
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    #[inline]
    pub fn api_key_present(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    #[inline]
    pub fn set_temp_instructions(&mut self, instructions: Option<String>) {
        self.temp_instructions = instructions;
    }

    /// Instructions for the suggestion prompt, preferring this run's override
    #[must_use]
    pub fn get_effective_instructions(&self) -> Option<String> {
        self.temp_instructions
            .as_ref()
            .or(self.custom_prompt.as_ref())
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
    }
}

/// True for details-prompt values that mean "no custom prompt"
pub fn is_dismissive(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    DISMISSIVE_ANSWERS.contains(&value.as_str())
}
