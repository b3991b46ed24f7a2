// ABOUTME: Interactive server selection: auto-pick a lone candidate or prompt with a numbered menu
// The prompt is the only retry loop in the program and blocks until a valid choice or EOF

use crate::error::EnterError;
use crate::models::Container;
use std::io::{self, BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};
use thiserror::Error;
use tracing::{debug, info};

/// Rejected menu input. The operator is asked again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionInputError {
    #[error("Hmm, that doesn't look like a number: {0}")]
    NotANumber(#[from] ParseIntError),
    #[error("Please enter a number between 0 and {max} inclusive.")]
    OutOfRange { max: usize },
}

/// Parse one line of menu input against a menu of `count` entries.
pub fn parse_choice(line: &str, count: usize) -> Result<usize, SelectionInputError> {
    let max = count.saturating_sub(1);
    let choice: i64 = match line.trim().parse() {
        Ok(choice) => choice,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(SelectionInputError::OutOfRange { max });
        }
        Err(e) => return Err(e.into()),
    };

    usize::try_from(choice)
        .ok()
        .filter(|&index| index < count)
        .ok_or(SelectionInputError::OutOfRange { max })
}

pub struct ContainerSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ContainerSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Hand back the input reader, along with anything buffered past the chosen line.
    pub fn into_input(self) -> R {
        self.input
    }

    pub fn select(&mut self, mut candidates: Vec<Container>) -> Result<Container, EnterError> {
        match candidates.len() {
            0 => Err(EnterError::NoCandidates),
            1 => {
                let container = candidates.remove(0);
                info!("Automatically selected {}", container.display_name());
                writeln!(
                    self.output,
                    "Automatically selected {}, as it's the only running server.",
                    container.display_name()
                )
                .map_err(EnterError::SelectionAborted)?;
                Ok(container)
            }
            _ => {
                let index = self
                    .prompt(&candidates)
                    .map_err(EnterError::SelectionAborted)?;
                let container = candidates.swap_remove(index);
                info!("Operator selected {}", container.display_name());
                Ok(container)
            }
        }
    }

    fn prompt(&mut self, candidates: &[Container]) -> io::Result<usize> {
        writeln!(self.output, "There are {} running servers:", candidates.len())?;
        for (index, container) in candidates.iter().enumerate() {
            writeln!(self.output, " [{}] {}", index, container.display_name())?;
        }
        writeln!(self.output)?;

        loop {
            write!(self.output, "Choice: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a server was chosen",
                ));
            }

            match parse_choice(&line, candidates.len()) {
                Ok(index) => return Ok(index),
                Err(e) => {
                    debug!("Rejected menu input {:?}: {}", line.trim(), e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }
}
