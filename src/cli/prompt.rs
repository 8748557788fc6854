//! Interactive input.
//!
//! On a terminal prompts use dialoguer. When stdin is piped each prompt
//! consumes one line, which keeps the tool scriptable and testable. Every
//! method returns `Ok(None)` once input is exhausted so the caller can end
//! the session instead of blocking.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Input, Password, Select};

use crate::cli::output;
use crate::error::Result;

/// Source of user answers.
pub trait Prompt {
    /// Pick one of `items`. Returns the chosen index.
    fn select(&mut self, label: &str, items: &[&str]) -> Result<Option<usize>>;

    /// Read a line of text. An empty answer yields `default` when given.
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Read a secret without echoing it where possible.
    fn secret(&mut self, label: &str) -> Result<Option<String>>;
}

/// Prompt for the process stdin, chosen by whether it is a terminal.
pub fn from_stdin() -> Box<dyn Prompt> {
    if io::stdin().is_terminal() {
        Box::new(Terminal)
    } else {
        Box::new(Lines::new(io::stdin().lock()))
    }
}

/// dialoguer-backed prompts.
pub struct Terminal;

impl Prompt for Terminal {
    fn select(&mut self, label: &str, items: &[&str]) -> Result<Option<usize>> {
        Ok(Select::new()
            .with_prompt(label)
            .items(items)
            .default(0)
            .interact_opt()?)
    }

    fn input(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut input = Input::<String>::new().with_prompt(label).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(Some(input.interact_text()?))
    }

    fn secret(&mut self, label: &str) -> Result<Option<String>> {
        Ok(Some(
            Password::new()
                .with_prompt(label)
                .allow_empty_password(true)
                .interact()?,
        ))
    }
}

/// Line-per-answer prompts over any buffered reader.
pub struct Lines<R> {
    reader: R,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        // Only the line terminator is stripped; values may carry spaces.
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R: BufRead> Prompt for Lines<R> {
    fn select(&mut self, label: &str, items: &[&str]) -> Result<Option<usize>> {
        loop {
            output::prompt(label);
            let Some(answer) = self.read_line()? else {
                println!();
                return Ok(None);
            };
            if let Some(index) = match_item(answer.trim(), items) {
                return Ok(Some(index));
            }
            output::warn(&format!("unknown choice '{}'", answer.trim()));
        }
    }

    fn input(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(default) => output::prompt(&format!("{} [{}]", label, default)),
            None => output::prompt(label),
        }
        let answer = self.read_line()?;
        println!();
        Ok(answer.map(|a| match default {
            Some(default) if a.trim().is_empty() => default.to_string(),
            _ => a,
        }))
    }

    fn secret(&mut self, label: &str) -> Result<Option<String>> {
        output::prompt(label);
        let answer = self.read_line()?;
        println!();
        Ok(answer)
    }
}

/// Match a menu answer by 1-based number or by the first word of a label.
fn match_item(answer: &str, items: &[&str]) -> Option<usize> {
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=items.len()).contains(&n).then(|| n - 1);
    }
    items.iter().position(|item| {
        item.split_whitespace()
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case(answer))
    })
}
