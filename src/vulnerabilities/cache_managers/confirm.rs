//! Asking the user a yes/no question.
//!
//! The cache managers don't read the terminal themselves, they receive a
//! [`Confirm`] implementation. It keeps them usable without a terminal.

use std::io::{self, BufRead, Write};

use log::{trace, warn};

/// Something able to answer a yes/no question.
pub trait Confirm {
    /// Returns true only if the answer is yes.
    fn confirm(&self, question: &str) -> bool;
}

/// Asks the question on standard output and reads the answer on
/// standard input. No is the default.
pub struct StdinConfirm {}

impl StdinConfirm {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for StdinConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        trace!("Running StdinConfirm::confirm()");
        print!("{} [y/n (default)]: ", question);
        if let Err(e) = io::stdout().flush() {
            warn!("Unable to flush stdout: {}", e);
        }

        let mut answer = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut answer) {
            warn!("Unable to read the answer, default to no: {}", e);
            return false;
        }
        is_yes(&answer)
    }
}

/// A fixed answer, whatever the question.
pub struct FixedConfirm {
    answer: bool,
}

impl FixedConfirm {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, _question: &str) -> bool {
        self.answer
    }
}

/// Only "y" or "Y" means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}
