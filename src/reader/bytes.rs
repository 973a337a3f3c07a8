use std::io::{BufRead, BufReader, Read};

pub type GenericBufReader = BufReader<Box<dyn Read>>;

/// A line cursor over a buffered byte stream which keeps track of how many lines it has
/// handed out.
pub struct LineReader<R: BufRead> {
    pub reader: R,
    lines: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, lines: 0 }
    }

    /// Number of lines consumed so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Reads the next line into `buf` (cleared first), without the trailing `\n` or `\r\n`.
    ///
    /// Returns `Ok(false)` at end of input. A final line with no newline still counts as a
    /// line.
    pub fn read_line_trim_newline(&mut self, buf: &mut Vec<u8>) -> std::io::Result<bool> {
        buf.clear();

        if self.reader.read_until(b'\n', buf)? == 0 {
            return Ok(false);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        self.lines += 1;
        Ok(true)
    }
}
