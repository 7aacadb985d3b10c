//! Interactive confirmation on the terminal

use std::io::{self, BufRead, Write};

use crate::services::{Confirm, ConfirmPrompt};

/// Asks each question on stdout and reads a y/N answer from stdin.
///
/// Anything other than "y" or "yes" counts as no, including end of input.
pub struct TerminalConfirm {
    symbol: String,
}

impl TerminalConfirm {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        println!("{}", prompt.message(&self.symbol));
        print!("[y/N]: ");
        if io::stdout().flush().is_err() {
            return false;
        }

        read_answer(&mut io::stdin().lock())
    }
}

fn read_answer<R: BufRead>(reader: &mut R) -> bool {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(input.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_answer() {
        assert!(read_answer(&mut Cursor::new("y\n")));
        assert!(read_answer(&mut Cursor::new("  YES \n")));
        assert!(!read_answer(&mut Cursor::new("n\n")));
        assert!(!read_answer(&mut Cursor::new("\n")));
        assert!(!read_answer(&mut Cursor::new("")));
    }
}
