//! Line input for the menu shell and the validated readers built on it.

use std::io::{BufRead, Write};

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CliError;
use crate::core::reporter::Reporter;

/// Source of user answers.
pub trait Prompter {
    /// Shows `prompt` and returns the next line of input without its line
    /// terminator. Fails with [`CliError::EndOfInput`] once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String, CliError>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str) -> Result<bool, CliError>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        (**self).read_line(prompt)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        (**self).confirm(prompt)
    }
}

/// Terminal prompts rendered by `dialoguer`.
pub struct InteractivePrompter {
    theme: ColorfulTheme,
}

impl InteractivePrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for InteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for InteractivePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(CliError::from)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CliError::from)
    }
}

/// Reads answers line by line, echoing each prompt to `echo`.
pub struct ScriptPrompter<B, W> {
    input: B,
    echo: W,
}

impl<B: BufRead, W: Write> ScriptPrompter<B, W> {
    pub fn new(input: B, echo: W) -> Self {
        Self { input, echo }
    }

    fn next_line(&mut self) -> Result<String, CliError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl<B: BufRead, W: Write> Prompter for ScriptPrompter<B, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        write!(self.echo, "{prompt}: ")?;
        self.echo.flush()?;
        self.next_line()
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        write!(self.echo, "{prompt} (y/n): ")?;
        self.echo.flush()?;
        let answer = self.next_line()?;
        Ok(matches!(answer.trim_start().chars().next(), Some('y' | 'Y')))
    }
}

/// Reads an integer in `[min, max]`, re-prompting until one is given.
pub fn read_int<P, R>(
    prompter: &mut P,
    reporter: &mut R,
    prompt: &str,
    min: i32,
    max: i32,
) -> Result<i32, CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    loop {
        let input = prompter.read_line(prompt)?;
        match input.trim_start().parse::<i32>() {
            Ok(value) if (min..=max).contains(&value) => return Ok(value),
            Ok(_) => reporter.error(format!("Please enter a number between {min} and {max}.")),
            Err(_) => reporter.error("Invalid input. Please enter a valid integer."),
        }
    }
}

/// Reads a non-negative position.
pub fn read_index<P, R>(prompter: &mut P, reporter: &mut R) -> Result<usize, CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    let value = read_int(prompter, reporter, "Index", 0, i32::MAX)?;
    Ok(value.unsigned_abs() as usize)
}

/// Reads a finite number not below `min`.
pub fn read_amount<P, R>(
    prompter: &mut P,
    reporter: &mut R,
    prompt: &str,
    min: f64,
) -> Result<f64, CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    loop {
        let input = prompter.read_line(prompt)?;
        match input.trim_start().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= min => return Ok(value),
            Ok(value) if value.is_finite() => {
                reporter.error(format!("Please enter a number >= {min}."))
            }
            _ => reporter.error("Invalid input. Please enter a valid number."),
        }
    }
}

/// Reads a non-empty line.
pub fn read_label<P, R>(prompter: &mut P, reporter: &mut R, prompt: &str) -> Result<String, CliError>
where
    P: Prompter + ?Sized,
    R: Reporter,
{
    loop {
        let input = prompter.read_line(prompt)?;
        if !input.is_empty() {
            return Ok(input);
        }
        reporter.error("Input cannot be empty. Please try again.");
    }
}
