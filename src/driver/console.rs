use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use log::{debug, warn};

/// Input and output collaborator for `FROMCONSOLE` and `TOCONSOLE`.
pub trait Console {
    /// Next whitespace-delimited input token, or `None` when input is exhausted.
    fn read_token(&mut self) -> Option<String>;
    fn write(&mut self, text: &str);

    /// Called once a submission has finished running.
    fn end_fragment(&mut self) {}
}

/// Reads tokens from stdin and writes one line per value to stdout.
#[derive(Debug, Default)]
pub struct StdConsole {
    pending: VecDeque<String>,
}

impl StdConsole {
    pub fn new() -> Self {
        StdConsole::default()
    }
}

impl Console for StdConsole {
    fn read_token(&mut self) -> Option<String> {
        let stdin = io::stdin();

        while self.pending.is_empty() {
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => self
                    .pending
                    .extend(line.split_whitespace().map(String::from)),
                Err(error) => {
                    warn!("failed to read console input: {}", error);
                    return None;
                }
            }
        }

        self.pending.pop_front()
    }

    fn write(&mut self, text: &str) {
        let mut stdout = io::stdout();
        if let Err(error) = writeln!(stdout, "{}", text).and_then(|_| stdout.flush()) {
            warn!("failed to write console output: {}", error);
        }
    }

    /// Input left over on the last line read belongs to that submission only.
    fn end_fragment(&mut self) {
        if !self.pending.is_empty() {
            debug!("discarding {} unread input token(s)", self.pending.len());
            self.pending.clear();
        }
    }
}

/// Scripted input and captured output, one entry per `TOCONSOLE`.
#[derive(Debug, Default)]
pub struct BufferConsole {
    input: VecDeque<String>,
    pub output: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        BufferConsole::default()
    }

    /// Console whose input is the whitespace-separated tokens of `input`.
    pub fn with_input(input: &str) -> Self {
        BufferConsole {
            input: input.split_whitespace().map(String::from).collect(),
            output: vec![],
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Console for BufferConsole {
    fn read_token(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn write(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
