use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use crossterm::style::Stylize;

use crate::session::verb::Verb;

/// The interactive side of a quiz.
pub trait Prompt {
    /// Show `question` and block until the user answers.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Tell the user how an answered verb went.
    fn feedback(&mut self, verb: &Verb) -> Result<()>;
}

/// Prompt reading answers from `input` and writing to `output`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "\n{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("reading answer")?;

        if read == 0 {
            bail!("input closed before the quiz finished");
        }

        Ok(strip_newline(&line).to_string())
    }

    fn feedback(&mut self, verb: &Verb) -> Result<()> {
        if verb.is_correct {
            writeln!(self.output, "{}", "Correct!".green())?;
        } else {
            writeln!(
                self.output,
                "{} Correct answer: {}",
                "Wrong answer!".red().bold(),
                verb.answer_list()
            )?;
        }
        Ok(())
    }
}

/// Drop the line terminator only; answers are otherwise compared verbatim.
fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Ask for the number of rounds to play.
pub fn ask_quiz_length<P: Prompt + ?Sized>(prompt: &mut P) -> Result<usize> {
    let answer =
        prompt.ask("How many verbs do you want to practice? Please enter an integer: ")?;
    answer
        .trim()
        .parse()
        .with_context(|| format!("`{answer}` is not a number of verbs"))
}
