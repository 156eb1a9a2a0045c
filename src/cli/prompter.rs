//! Every question the application asks goes through [`Prompter`], so the
//! menus and the wizard driver run unchanged against a scripted session.

use std::collections::VecDeque;
use std::io::{self, IsTerminal};

use crossterm::{cursor, terminal, ExecutableCommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::{output, CliError};

/// Typing this into any text field abandons the form in progress.
pub const CANCEL_KEYWORD: &str = ":cancel";

pub trait Prompter {
    /// Starts a new screen.
    fn begin_view(&mut self, title: &str) -> Result<(), CliError>;

    /// Index of the chosen item, or `None` when the user escapes.
    fn select(
        &mut self,
        title: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, CliError>;

    /// Free text pre-filled with `initial`, or `None` when the user cancels.
    fn input(&mut self, prompt: &str, initial: &str) -> Result<Option<String>, CliError>;

    /// Yes/no answer, or `None` when the user escapes.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CliError>;

    /// Waits until the user is done reading.
    fn pause(&mut self) -> Result<(), CliError>;
}

/// Interactive prompts on the controlling terminal.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn begin_view(&mut self, title: &str) -> Result<(), CliError> {
        let mut stdout = io::stdout();
        if stdout.is_terminal() {
            stdout.execute(terminal::Clear(terminal::ClearType::All))?;
            stdout.execute(cursor::MoveTo(0, 0))?;
        }
        output::section(title);
        Ok(())
    }

    fn select(
        &mut self,
        title: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, CliError> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(items)
            .default(default.min(items.len().saturating_sub(1)))
            .interact_opt()?;
        Ok(choice)
    }

    fn input(&mut self, prompt: &str, initial: &str) -> Result<Option<String>, CliError> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        if value.trim().eq_ignore_ascii_case(CANCEL_KEYWORD) {
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CliError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }

    fn pause(&mut self) -> Result<(), CliError> {
        let _ = Input::<String>::with_theme(&self.theme)
            .with_prompt("Press Enter to return")
            .allow_empty(true)
            .interact_text()?;
        Ok(())
    }
}

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Select the first item equal to, or starting with, this label.
    Choose(String),
    /// Select by position.
    Pick(usize),
    /// Type this text, replacing any pre-filled value.
    Text(String),
    /// Accept the pre-filled text as is.
    Keep,
    Yes,
    No,
    /// Escape a menu or cancel a form.
    Escape,
}

impl Answer {
    pub fn choose(label: impl Into<String>) -> Self {
        Answer::Choose(label.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text(value.into())
    }
}

/// Replays a fixed list of answers and records every question asked.
/// Once the script runs out every question is answered with an escape, which
/// unwinds the application back out of its menus.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            transcript: Vec::new(),
        }
    }

    /// Questions asked so far, one line each, e.g. `input: Item Name [Widget]`.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self) -> Answer {
        self.answers.pop_front().unwrap_or(Answer::Escape)
    }

    fn unexpected(&self, answer: &Answer, question: &str) -> CliError {
        CliError::Script(format!("{answer:?} cannot answer `{question}`"))
    }
}

impl Prompter for ScriptedPrompter {
    fn begin_view(&mut self, title: &str) -> Result<(), CliError> {
        self.transcript.push(format!("view: {title}"));
        Ok(())
    }

    fn select(
        &mut self,
        title: &str,
        items: &[String],
        _default: usize,
    ) -> Result<Option<usize>, CliError> {
        self.transcript.push(format!("select: {title}"));
        match self.next() {
            Answer::Escape => Ok(None),
            Answer::Pick(index) if index < items.len() => Ok(Some(index)),
            Answer::Choose(label) => items
                .iter()
                .position(|item| item == &label)
                .or_else(|| items.iter().position(|item| item.starts_with(&label)))
                .map(Some)
                .ok_or_else(|| {
                    CliError::Script(format!("no option `{label}` in `{title}`: {items:?}"))
                }),
            other => Err(self.unexpected(&other, title)),
        }
    }

    fn input(&mut self, prompt: &str, initial: &str) -> Result<Option<String>, CliError> {
        self.transcript.push(format!("input: {prompt} [{initial}]"));
        match self.next() {
            Answer::Text(value) => Ok(Some(value)),
            Answer::Keep => Ok(Some(initial.to_string())),
            Answer::Escape => Ok(None),
            other => Err(self.unexpected(&other, prompt)),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CliError> {
        self.transcript.push(format!("confirm: {prompt} [{default}]"));
        match self.next() {
            Answer::Yes => Ok(Some(true)),
            Answer::No => Ok(Some(false)),
            Answer::Keep => Ok(Some(default)),
            Answer::Escape => Ok(None),
            other => Err(self.unexpected(&other, prompt)),
        }
    }

    fn pause(&mut self) -> Result<(), CliError> {
        self.transcript.push("pause".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn choose_prefers_exact_then_prefix_match() {
        let items = labels(&["Clients archive", "Clients", "Back"]);
        let mut prompter =
            ScriptedPrompter::new([Answer::choose("Clients"), Answer::choose("Clients a")]);
        assert_eq!(prompter.select("menu", &items, 0).unwrap(), Some(1));
        assert_eq!(prompter.select("menu", &items, 0).unwrap(), Some(0));
    }

    #[test]
    fn exhausted_script_escapes() {
        let mut prompter = ScriptedPrompter::new([]);
        assert_eq!(prompter.select("menu", &labels(&["A"]), 0).unwrap(), None);
        assert_eq!(prompter.input("Name", "x").unwrap(), None);
        assert_eq!(prompter.confirm("Sure?", true).unwrap(), None);
    }

    #[test]
    fn keep_returns_prefilled_values() {
        let mut prompter = ScriptedPrompter::new([Answer::Keep, Answer::Keep]);
        assert_eq!(prompter.input("Quantity", "2.5").unwrap().as_deref(), Some("2.5"));
        assert_eq!(prompter.confirm("Mark as Paid?", true).unwrap(), Some(true));
        assert_eq!(
            prompter.transcript(),
            ["input: Quantity [2.5]", "confirm: Mark as Paid? [true]"]
        );
    }

    #[test]
    fn mismatched_answers_are_errors() {
        let mut prompter = ScriptedPrompter::new([Answer::Yes, Answer::choose("Nope")]);
        assert!(matches!(
            prompter.input("Name", ""),
            Err(CliError::Script(_))
        ));
        assert!(matches!(
            prompter.select("menu", &labels(&["A"]), 0),
            Err(CliError::Script(_))
        ));
    }
}
