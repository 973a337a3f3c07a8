use super::bytes::LineReader;
use super::{open_source, Compression};
use crate::error::{MalformedKind, QcError};
use crate::seq::Read;
use std::io::BufRead;
use std::path::Path;

/// Streams [`Read`]s out of a FASTQ source, four lines at a time.
///
/// The iterator owns its stream, which is closed as soon as the iterator is dropped. A
/// `MalformedRecord` error for a complete 4-line chunk leaves the cursor at the start of the
/// next chunk, so the caller decides whether to stop or to keep pulling. Truncated input and
/// I/O errors end the iteration.
pub struct FastqRecords<R: BufRead> {
    lines: LineReader<R>,
    records: u64,
    done: bool,

    // re-used line buffers
    header: Vec<u8>,
    sequence: Vec<u8>,
    separator: Vec<u8>,
    quality: Vec<u8>,
}

impl FastqRecords<super::GenericBufReader> {
    /// Opens `path` and parses it as FASTQ.
    pub fn from_path(path: impl AsRef<Path>, compression: Compression) -> Result<Self, QcError> {
        let reader = open_source(path.as_ref(), compression)?;
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> FastqRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            records: 0,
            done: false,
            header: Vec::new(),
            sequence: Vec::new(),
            separator: Vec::new(),
            quality: Vec::new(),
        }
    }

    /// Number of record chunks started so far, including malformed ones.
    pub fn records_seen(&self) -> u64 {
        self.records
    }

    /// Reads the header line, skipping blank lines only if they run to the end of the input.
    ///
    /// Returns `Ok(None)` at end of input.
    fn next_header(&mut self) -> Result<Option<u64>, QcError> {
        loop {
            if !self.lines.read_line_trim_newline(&mut self.header)? {
                return Ok(None);
            }
            if !self.header.is_empty() {
                return Ok(Some(self.lines.lines()));
            }
        }
    }

    fn read_record(&mut self) -> Result<Option<Read>, QcError> {
        let Some(line) = self.next_header()? else {
            return Ok(None);
        };
        self.records += 1;

        let record = self.records;
        let malformed = |kind| QcError::MalformedRecord { record, line, kind };

        // pull the remaining three lines before validating, so that the cursor always
        // ends up on a chunk boundary
        let rest = [&mut self.sequence, &mut self.separator, &mut self.quality];
        for (read_lines, buf) in (1..).zip(rest) {
            if !self.lines.read_line_trim_newline(buf)? {
                self.done = true;
                return Err(malformed(MalformedKind::Truncated { lines: read_lines }));
            }
        }

        let Some(id) = self.header.strip_prefix(b"@") else {
            return Err(malformed(MalformedKind::MissingHeaderMarker));
        };
        if !self.separator.starts_with(b"+") {
            return Err(malformed(MalformedKind::MissingSeparator));
        }

        let id = String::from_utf8_lossy(id).into_owned();
        Read::from_ascii_quality(id, self.sequence.clone(), &self.quality)
            .map(Some)
            .map_err(malformed)
    }
}

impl<R: BufRead> Iterator for FastqRecords<R> {
    type Item = Result<Read, QcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_record() {
            Ok(Some(read)) => Some(Ok(read)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                if matches!(e, QcError::Io(_)) {
                    self.done = true;
                }
                Some(Err(e))
            }
        }
    }
}
