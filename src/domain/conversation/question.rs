//! Question rounds and the numbered-option reply protocol.
//!
//! A question is shown as its text, a blank line, a 1-based numbered list of
//! options and a closing instruction asking for a bare number. The next user
//! reply is mapped back to the chosen option's text when it is a valid index.

use serde::{Deserialize, Serialize};

/// Fewest options a question may offer.
pub const MIN_OPTIONS: usize = 3;

/// Most options a question may offer.
pub const MAX_OPTIONS: usize = 6;

/// One multiple-choice clarifying question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRound {
    question: String,
    options: Vec<String>,
}

impl QuestionRound {
    /// Builds a round, or `None` when the question is blank or fewer than
    /// `min_options` non-blank options remain. Options beyond `max_options`
    /// are dropped.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        min_options: usize,
        max_options: usize,
    ) -> Option<Self> {
        let question = question.into().trim().to_string();
        if question.is_empty() {
            return None;
        }

        let options: Vec<String> = options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .take(max_options)
            .collect();
        if options.len() < min_options {
            return None;
        }

        Some(Self { question, options })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Renders the question for the wire.
    pub fn render(&self) -> String {
        let numbered = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {}", i + 1, option))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{}\n\n{}\n\nPlease respond with just the number (1-{}) of your choice.",
            self.question,
            numbered,
            self.options.len()
        )
    }

    /// Maps a reply to the option it selects.
    pub fn resolve(&self, reply: &str) -> Option<&str> {
        resolve_selection(reply, &self.options)
    }
}

/// Maps a bare 1-based index to the matching option.
///
/// Anything that is not an integer within `1..=options.len()` selects nothing.
pub fn resolve_selection<'a>(reply: &str, options: &'a [String]) -> Option<&'a str> {
    let index: usize = reply.trim().parse().ok()?;
    if index == 0 {
        return None;
    }
    options.get(index - 1).map(String::as_str)
}

/// Recovers the option list from previously rendered question text.
///
/// Looks for lines of the form `<n>. <text>`. A line numbered `1` starts a new
/// run, so an earlier numbered list (for example inside an introduction) is
/// superseded by the one that follows it. Returns an empty list when no run
/// is found.
pub fn parse_numbered_options(text: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();

    for line in text.lines() {
        let Some((number, rest)) = split_numbered_line(line) else {
            continue;
        };
        if number == 1 {
            options.clear();
            options.push(rest.to_string());
        } else if number == options.len() + 1 {
            options.push(rest.to_string());
        }
    }

    options
}

fn split_numbered_line(line: &str) -> Option<(usize, &str)> {
    let line = line.trim();
    let (digits, rest) = line.split_once(". ")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let number = digits.parse().ok()?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    Some((number, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn round() -> QuestionRound {
        QuestionRound::new(
            "Who are your customers?",
            options(&["A", "B", "C"]),
            MIN_OPTIONS,
            MAX_OPTIONS,
        )
        .unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn rejects_blank_question() {
            let result = QuestionRound::new("  ", options(&["A", "B", "C"]), 3, 6);
            assert!(result.is_none());
        }

        #[test]
        fn rejects_too_few_options() {
            let result = QuestionRound::new("Q?", options(&["A", "B"]), 3, 6);
            assert!(result.is_none());
        }

        #[test]
        fn blank_options_do_not_count() {
            let result = QuestionRound::new("Q?", options(&["A", " ", "B"]), 3, 6);
            assert!(result.is_none());
        }

        #[test]
        fn truncates_extra_options() {
            let round = QuestionRound::new(
                "Q?",
                options(&["1", "2", "3", "4", "5", "6", "7"]),
                3,
                6,
            )
            .unwrap();
            assert_eq!(round.options().len(), 6);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn renders_numbered_list_and_instruction() {
            assert_eq!(
                round().render(),
                "Who are your customers?\n\n1. A\n2. B\n3. C\n\nPlease respond with just the number (1-3) of your choice."
            );
        }

        #[test]
        fn rendered_text_parses_back_to_options() {
            let round = round();
            assert_eq!(parse_numbered_options(&round.render()), round.options());
        }

        #[test]
        fn later_numbered_list_supersedes_earlier_one() {
            let text = format!(
                "Great idea! Next steps:\n1. Questions\n2. Plan\n\n{}",
                round().render()
            );
            assert_eq!(parse_numbered_options(&text), options(&["A", "B", "C"]));
        }

        #[test]
        fn text_without_numbered_lines_yields_nothing() {
            assert!(parse_numbered_options("Thanks, your plan is ready.").is_empty());
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn valid_index_selects_option() {
            assert_eq!(round().resolve("2"), Some("B"));
            assert_eq!(round().resolve(" 3 \n"), Some("C"));
        }

        #[test]
        fn out_of_range_index_selects_nothing() {
            assert_eq!(round().resolve("9"), None);
            assert_eq!(round().resolve("0"), None);
        }

        #[test]
        fn non_numeric_reply_selects_nothing() {
            assert_eq!(round().resolve("two"), None);
            assert_eq!(round().resolve("-1"), None);
        }
    }
}
