// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Prompt strings. The "alt" pair is for multi line input: the host sets `use_alt` while
/// it collects continuation lines, and the editor forces the alt prompt while a
/// bracketed paste is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    pub prompt: String,
    pub alt_prompt: String,
    /// Dimmed hint shown after the prompt while the line is empty.
    pub placeholder: String,
    pub alt_placeholder: String,
    pub use_alt: bool,
}

impl Prompt {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn active_prompt(&self) -> &str {
        if self.use_alt { &self.alt_prompt } else { &self.prompt }
    }

    #[must_use]
    pub fn active_placeholder(&self) -> &str {
        if self.use_alt {
            &self.alt_placeholder
        } else {
            &self.placeholder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_active_pair_follows_use_alt() {
        let mut prompt = Prompt {
            prompt: ">>> ".into(),
            alt_prompt: "... ".into(),
            placeholder: "Send a message".into(),
            alt_placeholder: "Use \"\"\" to end".into(),
            use_alt: false,
        };
        assert_eq!(prompt.active_prompt(), ">>> ");
        assert_eq!(prompt.active_placeholder(), "Send a message");

        prompt.use_alt = true;
        assert_eq!(prompt.active_prompt(), "... ");
        assert_eq!(prompt.active_placeholder(), "Use \"\"\" to end");
    }
}
