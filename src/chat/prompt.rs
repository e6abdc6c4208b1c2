//! System prompt composition for the chapter discussion assistant.
//!
//! A book can override any part through its chatbot page config. A custom
//! `system_prompt` replaces the whole composition; `persona` and
//! `instruction` swap out single sections.

use crate::book::ChatbotConfig;

pub const DEFAULT_PERSONA: &str =
    "You are a friendly literature guide: warm, concise, Socratic.";

const STYLE: &str = "Style: concise, upbeat, and curious. Always end with a question \
                     to invite the reader to respond.";

pub fn build_system_prompt(config: &ChatbotConfig, chapter_title: &str) -> String {
    if let Some(custom) = config
        .system_prompt
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return custom.to_string();
    }

    let persona = config.persona.as_deref().unwrap_or(DEFAULT_PERSONA);
    let instruction = match config.instruction.as_deref() {
        Some(instruction) => instruction.to_string(),
        None => format!(
            "Discuss {chapter_title}. Ask short, open questions and encourage \
             evidence from the text."
        ),
    };

    [
        persona.to_string(),
        format!("Instructions: {instruction}"),
        STYLE.to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_prompt_names_the_chapter_and_keeps_the_style_coda() {
        let prompt = build_system_prompt(&ChatbotConfig::default(), "The Winter Light");
        assert!(prompt.starts_with(DEFAULT_PERSONA));
        assert!(prompt.contains("Discuss The Winter Light."));
        assert!(prompt.ends_with("invite the reader to respond."));
        assert_eq!(prompt.lines().count(), 3);
    }

    #[test]
    fn custom_system_prompt_replaces_everything() {
        let config = ChatbotConfig {
            system_prompt: Some("  Answer in rhyme.  ".to_string()),
            persona: Some("ignored".to_string()),
            instruction: Some("ignored".to_string()),
            ..ChatbotConfig::default()
        };
        assert_eq!(build_system_prompt(&config, "Ch"), "Answer in rhyme.");
    }

    #[test]
    fn blank_system_prompt_falls_back_to_composition() {
        let config = ChatbotConfig {
            system_prompt: Some("   ".to_string()),
            ..ChatbotConfig::default()
        };
        let prompt = build_system_prompt(&config, "Ch");
        assert!(prompt.starts_with(DEFAULT_PERSONA));
    }

    #[test]
    fn persona_and_instruction_override_their_sections() {
        let config = ChatbotConfig {
            persona: Some("You are a stern archivist.".to_string()),
            instruction: Some("Quiz the reader on dates.".to_string()),
            ..ChatbotConfig::default()
        };
        let prompt = build_system_prompt(&config, "Ch");
        assert!(prompt.starts_with("You are a stern archivist."));
        assert!(prompt.contains("Instructions: Quiz the reader on dates."));
        assert!(!prompt.contains("Discuss Ch"));
    }
}
