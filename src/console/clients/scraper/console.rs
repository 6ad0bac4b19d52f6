use std::io::{self, Write};

use super::printer::Printer;

/// Writes to the process `stdout`.
#[derive(Debug, Default)]
pub struct Console;

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Printer for Console {
    /// Flushes after each line, `stdout` is block buffered when piped.
    fn println(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}
