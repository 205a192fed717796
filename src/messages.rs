use colored::Color;
use rand::seq::IndexedRandom;
use std::sync::LazyLock;

#[derive(Clone, Debug)]
pub struct ColoredMessage {
    pub text: String,
    pub color: Color,
}

impl ColoredMessage {
    fn from_static(text: &'static str, color: Color) -> Self {
        Self {
            text: text.to_string(),
            color,
        }
    }
}

macro_rules! messages {
    ($($text:expr => $color:expr),+ $(,)?) => {
        vec![
            $(ColoredMessage::from_static($text, $color)),+
        ]
    };
}

static WAITING_MESSAGES: LazyLock<Vec<ColoredMessage>> = LazyLock::new(|| {
    messages![
        "🤖 AI is analyzing your changes..." => Color::Cyan,
        "🤖 Reading through your diff..." => Color::Magenta,
        "🤖 Looking for the right commit type..." => Color::Blue,
        "🤖 Picking a scope for these changes..." => Color::Green,
        "🤖 Summarizing what changed..." => Color::Yellow,
        "🤖 Drafting a conventional commit subject..." => Color::BrightMagenta,
        "🤖 Weighing feat against fix..." => Color::BrightCyan,
        "🤖 Counting the lines you touched..." => Color::BrightBlue,
    ]
});

/// Returns a random waiting message shown while a suggestion is requested
pub fn get_waiting_message() -> &'static ColoredMessage {
    WAITING_MESSAGES
        .choose(&mut rand::rng())
        .unwrap_or(&WAITING_MESSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_messages_not_empty() {
        assert!(!WAITING_MESSAGES.is_empty());
    }

    #[test]
    fn test_get_waiting_message_returns_valid() {
        let msg = get_waiting_message();
        assert!(!msg.text.is_empty());
    }
}
