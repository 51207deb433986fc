use std::io::{self, BufRead, Write};

use inquire::{Confirm, InquireError, Text};

/// Source of answers for the interactive shell.
///
/// `Ok(None)` means the user backed out of the prompt (Esc, Ctrl-C or end of
/// input).
pub trait Prompter {
    fn text(&mut self, message: &str) -> io::Result<Option<String>>;
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<Option<bool>>;
}

fn cancelled_or_error<T>(err: InquireError) -> io::Result<Option<T>> {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Ok(None),
        InquireError::IO(e) => Err(e),
        other => Err(io::Error::other(other.to_string())),
    }
}

/// Prompts on a real terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, message: &str) -> io::Result<Option<String>> {
        Text::new(message)
            .prompt()
            .map(Some)
            .or_else(cancelled_or_error)
    }

    fn confirm(&mut self, message: &str, default: bool) -> io::Result<Option<bool>> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map(Some)
            .or_else(cancelled_or_error)
    }
}

/// Prompts over plain line-oriented streams, for piped stdin.
pub struct LinePrompter<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }

    fn read_line(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.echo, "{message} ")?;
        self.echo.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn text(&mut self, message: &str) -> io::Result<Option<String>> {
        self.read_line(message)
    }

    fn confirm(&mut self, message: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let Some(answer) = self.read_line(&format!("{message} {hint}"))? else {
            return Ok(None);
        };
        Ok(Some(match answer.trim().to_ascii_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        }))
    }
}
