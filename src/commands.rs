use crate::config::{
    CONFIG_FILE_NAME, Config, DEFAULT_COMMIT_TYPES, DEFAULT_DETAILS_PROMPT, DEFAULT_SCOPE_TYPES,
    Questions, is_dismissive,
};
use crate::tui::Prompter;
use crate::ui;

use anyhow::Result;
use log::debug;
use std::path::Path;

/// Handle the `init` command: build a configuration interactively and write
/// it to `path`.
///
/// Returns the saved configuration, or `None` when the user declined to
/// overwrite an existing file.
pub fn handle_init_command<P: Prompter>(prompter: &mut P, path: &Path) -> Result<Option<Config>> {
    ui::print_info("🚀 Welcome to Commit Commander Setup!");
    ui::print_message("Let's configure your AI-powered commit assistant.");
    ui::print_newline();

    if path.exists()
        && !prompter.confirm("Configuration file already exists. Overwrite? (Y/n): ", true)?
    {
        ui::print_warning("Setup cancelled.");
        return Ok(None);
    }

    ui::print_info("🔑 API Key Configuration:");
    let api_key = prompter.ask("Enter your Gemini API Key (leave empty to use the environment): ")?;

    ui::print_newline();
    ui::print_info("📝 Commit Types Configuration (optional):");
    let commit_types = ask_list(
        prompter,
        "Use default commit types? (Y/n): ",
        "Example: ✨feat,🐛fix,📚docs,♻️refactor",
        "Custom commit types: ",
        &DEFAULT_COMMIT_TYPES,
        "📦 No custom types provided, using defaults...",
    )?;

    ui::print_newline();
    ui::print_info("🎯 Scope Types Configuration (optional):");
    let scope_types = ask_list(
        prompter,
        "Use default scope types? (Y/n): ",
        "Example: 🏠root,🔄utils,🎨ui,🛠️api",
        "Custom scope types: ",
        &DEFAULT_SCOPE_TYPES,
        "📦 No custom scopes provided, using defaults...",
    )?;

    ui::print_newline();
    ui::print_info("💬 Custom AI Prompt (optional):");
    let custom_prompt = prompter.ask("Add custom instructions for AI? (optional): ")?;

    ui::print_newline();
    ui::print_info("⚙️ Additional Settings:");
    let ask_for_details = prompter.confirm("Always ask for detailed description? (Y/n): ", true)?;
    ui::print_message("Custom details prompt (leave empty for default):");
    ui::print_message(&format!("Default: \"{DEFAULT_DETAILS_PROMPT}\""));
    let details_prompt = prompter.ask("Custom prompt (or press Enter): ")?;
    let confirm_before_commit =
        prompter.confirm("Always confirm before committing? (Y/n): ", true)?;

    let config = Config {
        api_key: non_blank(&api_key),
        commit_types,
        scope_types,
        custom_prompt: non_blank(&custom_prompt),
        questions: Questions {
            ask_for_details,
            details_prompt: if is_dismissive(&details_prompt) {
                DEFAULT_DETAILS_PROMPT.to_string()
            } else {
                details_prompt
            },
            confirm_before_commit,
        },
        ..Config::default()
    };
    debug!("Init built configuration: {config:?}");

    config.save_to(path)?;

    ui::print_newline();
    ui::print_success("✅ Configuration saved successfully!");
    ui::print_message(&format!("📁 Config file created: {}", path.display()));
    ui::print_newline();
    ui::print_info("🎯 Next steps:");
    if config.api_key.is_some() {
        ui::print_message(&format!(
            "1. Add {CONFIG_FILE_NAME} to your .gitignore (contains API key)"
        ));
    } else {
        ui::print_message("1. Export COMMIT_COMMANDER_API_KEY or GEMINI_API_KEY to enable suggestions");
    }
    ui::print_message("2. Run `commit-commander` to start using it");
    ui::print_message("3. You can edit the config file anytime to customize further");

    Ok(Some(config))
}

fn ask_list<P: Prompter>(
    prompter: &mut P,
    use_defaults_prompt: &str,
    example: &str,
    custom_prompt: &str,
    defaults: &[&str],
    fallback_notice: &str,
) -> Result<Vec<String>> {
    let to_owned = || defaults.iter().map(ToString::to_string).collect::<Vec<_>>();

    if prompter.confirm(use_defaults_prompt, true)? {
        return Ok(to_owned());
    }

    ui::print_message("Enter a comma-separated list (emojis welcome):");
    ui::print_message(example);
    let answer = prompter.ask(custom_prompt)?;
    let items = split_list(&answer);

    if items.is_empty() {
        ui::print_warning(fallback_notice);
        Ok(to_owned())
    } else {
        Ok(items)
    }
}

/// Splits a comma-separated answer, dropping blank entries
pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" ✨feat, 🐛fix ,,📚docs , "),
            vec!["✨feat", "🐛fix", "📚docs"]
        );
        assert!(split_list(" , ,").is_empty());
    }
}
