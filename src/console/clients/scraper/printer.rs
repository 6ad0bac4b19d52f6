use std::io;

/// Where the scrape output goes, one record per line.
pub trait Printer {
    /// Writes `line` followed by a newline. The line must reach the reader
    /// before the call returns.
    ///
    /// # Errors
    ///
    /// Will return an error if the line can't be written, for instance
    /// `BrokenPipe` once the reader is gone.
    fn println(&self, line: &str) -> io::Result<()>;
}
