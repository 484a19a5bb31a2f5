//! Numbered menu loop shared by every domain.

use std::io::{self, BufRead, Write};

use desk_core::DomainResult;

use crate::prompt::{Prompt, PromptError};

/// Text to show after an action, or the reason it was refused.
pub type Outcome = DomainResult<String>;

pub const SEPARATOR: &str = "------------------------";

/// A domain menu: numbered options, each mapped to one registry operation.
pub trait Menu {
    /// Short name used in log records.
    const NAME: &'static str;
    const TITLE: &'static str;
    /// Option labels; option `n` is `OPTIONS[n - 1]`.
    const OPTIONS: &'static [&'static str];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        prompt: &mut Prompt<R, W>,
    ) -> Result<Outcome, PromptError>;
}

/// Show the menu, run the chosen option, repeat until `0` or end of input.
pub fn run<M: Menu, R: BufRead, W: Write>(
    menu: &mut M,
    prompt: &mut Prompt<R, W>,
) -> io::Result<()> {
    loop {
        prompt.say(&options::<M>())?;
        let answer = match prompt.line("Enter your choice: ") {
            Ok(answer) => answer,
            Err(PromptError::Eof) => return Ok(()),
            Err(PromptError::Io(err)) => return Err(err),
        };

        let choice = match answer.parse::<usize>() {
            Ok(0) => return prompt.say("Exiting system. Goodbye!"),
            Ok(n) if n <= M::OPTIONS.len() => n,
            _ => {
                prompt.say("Invalid choice. Try again.")?;
                continue;
            }
        };

        match menu.dispatch(choice, prompt) {
            Ok(Ok(text)) => prompt.say(&text)?,
            Ok(Err(err)) => {
                tracing::warn!(
                    menu = M::NAME,
                    choice,
                    code = err.code(),
                    error = %err,
                    "operation rejected"
                );
                prompt.say(&format!("Error: {err}"))?;
            }
            Err(PromptError::Eof) => return Ok(()),
            Err(PromptError::Io(err)) => return Err(err),
        }
    }
}

fn options<M: Menu>() -> String {
    let mut lines = vec![String::new(), format!("=== {} ===", M::TITLE)];
    for (i, label) in M::OPTIONS.iter().enumerate() {
        lines.push(format!("{:<4}{label}", format!("{}.", i + 1)));
    }
    lines.push(format!("{:<4}Exit", "0."));
    lines.join("\n")
}

/// Render every item, or `empty` when there are none.
pub fn listing<T>(items: impl IntoIterator<Item = T>, empty: &str, render: impl Fn(T) -> String) -> String {
    let cards: Vec<String> = items.into_iter().map(render).collect();
    if cards.is_empty() {
        empty.to_string()
    } else {
        cards.join(&format!("\n{SEPARATOR}\n"))
    }
}

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::DomainError;

    struct Counter {
        hits: u32,
    }

    impl Menu for Counter {
        const NAME: &'static str = "counter";
        const TITLE: &'static str = "COUNTER MENU";
        const OPTIONS: &'static [&'static str] = &["Hit", "Fail"];

        fn dispatch<R: BufRead, W: Write>(
            &mut self,
            choice: usize,
            _prompt: &mut Prompt<R, W>,
        ) -> Result<Outcome, PromptError> {
            Ok(match choice {
                1 => {
                    self.hits += 1;
                    Ok(format!("hits: {}", self.hits))
                }
                _ => Err(DomainError::rule("nope")),
            })
        }
    }

    fn session(input: &str) -> (Counter, String) {
        let mut counter = Counter { hits: 0 };
        let mut prompt = Prompt::new(input.as_bytes(), Vec::new());
        run(&mut counter, &mut prompt).unwrap();
        let out = String::from_utf8(prompt.into_output()).unwrap();
        (counter, out)
    }

    #[test]
    fn options_are_numbered_with_exit_last() {
        let text = options::<Counter>();
        assert!(text.contains("=== COUNTER MENU ==="));
        assert!(text.contains("1.  Hit\n2.  Fail\n0.  Exit"));
    }

    #[test]
    fn zero_exits_and_errors_are_prefixed() {
        let (counter, out) = session("1\n2\n1\n0\n1\n");
        assert_eq!(counter.hits, 2);
        assert!(out.contains("hits: 2"));
        assert!(out.contains("Error: nope"));
        assert!(out.ends_with("Exiting system. Goodbye!\n"));
    }

    #[test]
    fn unknown_and_non_numeric_choices_redisplay() {
        let (counter, out) = session("9\nabc\n-1\n\n0\n");
        assert_eq!(counter.hits, 0);
        assert_eq!(out.matches("Invalid choice. Try again.").count(), 4);
        assert_eq!(out.matches("=== COUNTER MENU ===").count(), 5);
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let (counter, out) = session("1\n");
        assert_eq!(counter.hits, 1);
        assert_eq!(out.matches("=== COUNTER MENU ===").count(), 2);
    }

    #[test]
    fn listing_joins_cards_or_reports_empty() {
        assert_eq!(listing(Vec::<u32>::new(), "Nothing.", |n| n.to_string()), "Nothing.");
        assert_eq!(
            listing([1, 2], "Nothing.", |n| format!("#{n}")),
            format!("#1\n{SEPARATOR}\n#2")
        );
        assert_eq!(money(2.5), "$2.50");
    }
}
