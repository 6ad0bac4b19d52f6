use std::cell::RefCell;
use std::io;

use super::printer::Printer;

/// Keeps the printed lines in memory.
#[derive(Debug, Default)]
pub struct Logger {
    lines: RefCell<Vec<String>>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Printer for Logger {
    fn println(&self, line: &str) -> io::Result<()> {
        self.lines.borrow_mut().push(line.to_owned());
        Ok(())
    }
}
