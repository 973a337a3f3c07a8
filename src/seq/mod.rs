pub mod dna;

pub use self::dna::Base;

use crate::error::MalformedKind;

/// Offset of the Phred+33 quality encoding.
pub const PHRED_OFFSET: u8 = 33;

/// A single parsed FASTQ record.
///
/// The only way to build one is [`Read::new`], which guarantees that there is exactly one
/// quality score per base.
#[derive(Debug, PartialEq, Clone)]
pub struct Read {
    id: String,
    sequence: Vec<u8>,
    quality: Vec<u8>,
}

impl Read {
    /// Creates a read from already-decoded Phred scores.
    ///
    /// # Errors
    ///
    /// Returns `MalformedKind::LengthMismatch` if `sequence` and `quality` differ in length.
    pub fn new(
        id: impl Into<String>,
        sequence: Vec<u8>,
        quality: Vec<u8>,
    ) -> Result<Self, MalformedKind> {
        if sequence.len() != quality.len() {
            return Err(MalformedKind::LengthMismatch {
                sequence: sequence.len(),
                quality: quality.len(),
            });
        }

        Ok(Self {
            id: id.into(),
            sequence,
            quality,
        })
    }

    /// Creates a read from the raw quality line of a FASTQ record.
    pub fn from_ascii_quality(
        id: impl Into<String>,
        sequence: Vec<u8>,
        quality_line: &[u8],
    ) -> Result<Self, MalformedKind> {
        // check lengths first so a short line is reported as such, not as a bad character
        if sequence.len() != quality_line.len() {
            return Err(MalformedKind::LengthMismatch {
                sequence: sequence.len(),
                quality: quality_line.len(),
            });
        }
        let quality = decode_phred33(quality_line)?;
        Self::new(id, sequence, quality)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn quality(&self) -> &[u8] {
        &self.quality
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Decodes a Phred+33 quality line into scores.
pub fn decode_phred33(line: &[u8]) -> Result<Vec<u8>, MalformedKind> {
    line.iter()
        .enumerate()
        .map(|(position, &byte)| {
            byte.checked_sub(PHRED_OFFSET)
                .ok_or(MalformedKind::InvalidQuality { byte, position })
        })
        .collect()
}
