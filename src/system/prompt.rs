// src/system/prompt.rs

//! Interactive terminal questions.

use anyhow::Result;
use dialoguer::{Completion, Input};

/// Tab completion over a fixed list of choices.
struct Choices<'a>(&'a [String]);

impl Completion for Choices<'_> {
    fn get(&self, input: &str) -> Option<String> {
        self.0
            .iter()
            .find(|choice| choice.starts_with(input) && choice.as_str() != input)
            .cloned()
    }
}

/// Asks the user a question on the terminal and returns the answer.
/// `choices`, when not empty, are offered as tab completions.
pub fn question(prompt: &str, choices: &[String]) -> Result<String> {
    let completion = Choices(choices);
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .completion_with(&completion)
        .interact_text()?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_picks_first_matching_choice() {
        let choices = vec!["staging".to_string(), "production".to_string()];
        let completion = Choices(&choices);
        assert_eq!(completion.get("pro"), Some("production".to_string()));
        assert_eq!(completion.get("st"), Some("staging".to_string()));
        assert_eq!(completion.get("dev"), None);
        assert_eq!(completion.get("staging"), None);
    }
}
