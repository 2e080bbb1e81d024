//! Legacy prefixed text commands (`!ask`, `!math`, …).
//!
//! Recognition is strict: the configured prefix must be immediately followed
//! by a known token. Anything else is somebody else's message and is
//! silently ignored.

use sage_agent::Category;

/// A recognized legacy text command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyCommand {
    /// Generative command with its (possibly empty) payload.
    Generate { category: Category, payload: String },
    Ping,
    Help,
}

/// Parse raw message content into a legacy command.
///
/// The payload is the remaining tokens re-joined with single spaces, so it
/// comes out trimmed and whitespace-normalized. Returns `None` for content
/// without the prefix, with whitespace after the prefix, or with an
/// unrecognized command token.
pub fn parse_legacy(content: &str, prefix: &str) -> Option<LegacyCommand> {
    let rest = content.strip_prefix(prefix)?;
    if rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = rest.split_whitespace();
    let command = tokens.next()?.to_lowercase();
    let payload = tokens.collect::<Vec<_>>().join(" ");

    let category = match command.as_str() {
        "ask" | "ai" => Category::General,
        "math" => Category::Math,
        "code" => Category::Code,
        "game" | "gaming" => Category::Gaming,
        "ping" => return Some(LegacyCommand::Ping),
        "help" => return Some(LegacyCommand::Help),
        _ => return None,
    };

    Some(LegacyCommand::Generate { category, payload })
}

/// Validation reply for a generative command invoked with no payload.
pub fn validation_message(category: Category) -> &'static str {
    match category {
        Category::General => "Please provide a question!",
        Category::Math => "Please provide a math problem!",
        Category::Code => "Please ask a coding question!",
        Category::Gaming => "Please ask a gaming question!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_generative_token() {
        for (content, category) in [
            ("!ask what is rust", Category::General),
            ("!ai what is rust", Category::General),
            ("!math 2+2", Category::Math),
            ("!code why borrowck", Category::Code),
            ("!game elden ring tips", Category::Gaming),
            ("!gaming elden ring tips", Category::Gaming),
        ] {
            match parse_legacy(content, "!") {
                Some(LegacyCommand::Generate { category: c, .. }) => assert_eq!(c, category),
                other => panic!("{content:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn recognizes_utility_tokens() {
        assert_eq!(parse_legacy("!ping", "!"), Some(LegacyCommand::Ping));
        assert_eq!(parse_legacy("!help", "!"), Some(LegacyCommand::Help));
    }

    #[test]
    fn extracts_payload_with_normalized_spaces() {
        let parsed = parse_legacy("!math   2   +   2  ", "!");
        assert_eq!(
            parsed,
            Some(LegacyCommand::Generate {
                category: Category::Math,
                payload: "2 + 2".to_string(),
            })
        );
    }

    #[test]
    fn missing_payload_parses_with_empty_payload() {
        let parsed = parse_legacy("!code", "!");
        assert_eq!(
            parsed,
            Some(LegacyCommand::Generate {
                category: Category::Code,
                payload: String::new(),
            })
        );
    }

    #[test]
    fn command_token_is_case_insensitive() {
        let parsed = parse_legacy("!MATH 1+1", "!");
        assert!(matches!(
            parsed,
            Some(LegacyCommand::Generate {
                category: Category::Math,
                ..
            })
        ));
    }

    #[test]
    fn ignores_unprefixed_and_unknown_content() {
        assert_eq!(parse_legacy("hello there", "!"), None);
        assert_eq!(parse_legacy("!frobnicate now", "!"), None);
        assert_eq!(parse_legacy("", "!"), None);
        assert_eq!(parse_legacy("!", "!"), None);
    }

    #[test]
    fn prefix_must_touch_the_command_token() {
        assert_eq!(parse_legacy("! ask question", "!"), None);
    }

    #[test]
    fn honors_a_custom_prefix() {
        let parsed = parse_legacy("?ask hi", "?");
        assert!(matches!(parsed, Some(LegacyCommand::Generate { .. })));
        assert_eq!(parse_legacy("!ask hi", "?"), None);
    }

    #[test]
    fn validation_messages_name_the_category() {
        assert_eq!(validation_message(Category::General), "Please provide a question!");
        assert_eq!(validation_message(Category::Math), "Please provide a math problem!");
        assert_eq!(validation_message(Category::Code), "Please ask a coding question!");
        assert_eq!(validation_message(Category::Gaming), "Please ask a gaming question!");
    }
}
