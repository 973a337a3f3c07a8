pub mod bytes;
pub mod fastq;

pub use self::bytes::GenericBufReader;
pub use self::fastq::FastqRecords;

use crate::error::QcError;
use niffler::compression::Format;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 1024 * 1024;

// niffler needs this many bytes to recognise a format
const SNIFF_LEN: usize = 5;

/// How the bytes of an input file should be interpreted.
#[derive(clap::ValueEnum, Serialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Detect compression from the magic bytes at the start of the file
    #[default]
    Auto,

    /// Read the file as uncompressed text
    Plain,

    /// Require gzip compression
    Gzip,
}

/// Opens `path` for reading, decompressing it according to `compression`.
///
/// # Errors
///
/// Returns `QcError::SourceOpen` if the file cannot be opened, if the compression format
/// cannot be set up, or if `Compression::Gzip` was requested for a file which is not gzip.
pub fn open_source(path: &Path, compression: Compression) -> Result<GenericBufReader, QcError> {
    let source_err = |source: std::io::Error| QcError::SourceOpen {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(source_err)?;
    let mut sniffer = BufReader::new(Box::new(file) as Box<dyn Read>);
    let too_short = sniffer.fill_buf().map_err(source_err)?.len() < SNIFF_LEN;

    let inner: Box<dyn Read> = match compression {
        Compression::Plain => Box::new(sniffer),
        Compression::Auto if too_short => Box::new(sniffer),
        Compression::Auto | Compression::Gzip => {
            let (inner, format) = niffler::get_reader(Box::new(sniffer))
                .map_err(|e| source_err(std::io::Error::other(e)))?;

            if compression == Compression::Gzip && format != Format::Gzip {
                return Err(source_err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("expected gzip input, found {format:?}"),
                )));
            }

            debug!("Opened {} with compression {format:?}", path.display());
            inner
        }
    };

    Ok(BufReader::with_capacity(READ_BUFFER_SIZE, inner))
}
