use crate::core::llm::SuggestionContext;

use std::fmt::Write;

/// Builds the single user message sent to the model
pub fn create_suggestion_prompt(diff: &str, context: &SuggestionContext) -> String {
    let mut prompt = String::from(
        "Based on these git changes, suggest a conventional commit message with emojis \
         in this exact format: \"emoji type(scope): description\"\n\n",
    );

    let _ = writeln!(prompt, "Git changes:\n{diff}\n");

    prompt.push_str("Rules:\n");
    let _ = writeln!(
        prompt,
        "- type: pick one of {} (each already carries its emoji)",
        context.commit_types.join(", ")
    );
    let _ = writeln!(prompt, "- scope: pick one of {}", context.scope_types.join(", "));
    prompt.push_str("- description: brief description (max 50 chars)\n");
    prompt.push_str("- reply with the commit subject line only, no quotes or explanation\n");

    if let Some(custom) = &context.custom_prompt {
        let _ = writeln!(prompt, "\nAdditional instructions:\n{custom}");
    }

    prompt.push_str("\nResponse format: \"emoji type(scope): description\"\n\n");
    prompt.push_str("Examples:\n");
    prompt.push_str("- \"⭐feat(auth): add user login functionality\"\n");
    prompt.push_str("- \"🐛fix(api): resolve authentication error\"\n");
    prompt.push_str("- \"📝docs(readme): update installation guide\"\n");
    prompt.push_str("- \"♻️refactor(utils): improve code structure\"\n");

    prompt
}

/// Cuts `diff` down to at most `max_chars` characters, marking the cut
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}\n[diff truncated]\n", &diff[..byte_index]),
        None => diff.to_string(),
    }
}
