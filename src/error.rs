use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading a FASTQ source or summarising its reads.
#[derive(Error, Debug)]
pub enum QcError {
    #[error("could not open `{}`: {source}", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "malformed record:
record {record} (starting at line {line})
    {kind}"
    )]
    MalformedRecord {
        record: u64,
        line: u64,
        kind: MalformedKind,
    },

    #[error(
        "no reads were accepted, so there is nothing to summarise
suggestion: check that the input is a non-empty FASTQ file"
    )]
    EmptyDataset,

    #[error("failed while reading input: {0}")]
    Io(#[from] std::io::Error),
}

impl QcError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, QcError::MalformedRecord { .. })
    }
}

/// The structural problem found in a single 4-line chunk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("input ended after {lines} of the 4 lines of a record")]
    Truncated { lines: usize },

    #[error("header line does not start with `@`")]
    MissingHeaderMarker,

    #[error("separator line does not start with `+`")]
    MissingSeparator,

    #[error("sequence has {sequence} bases but quality has {quality} scores")]
    LengthMismatch { sequence: usize, quality: usize },

    #[error("quality character {byte:#04x} at position {position} is below Phred+33 `!`")]
    InvalidQuality { byte: u8, position: usize },
}
