use crate::error::QcError;
use crate::seq::{Base, Read};
use crate::summary::{BaseComposition, QcSummary};

use std::collections::BTreeMap;

/// Per-position accumulators, kept at a single shared length.
///
/// Every column is indexed by the 0-based offset into a read. Growing the table extends all
/// columns together with zeroes, and nothing is ever truncated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionColumns {
    quality_sum: Vec<f64>,
    quality_count: Vec<u64>,
    base_count: [Vec<u64>; 4],
}

impl PositionColumns {
    pub fn len(&self) -> usize {
        self.quality_sum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quality_sum.is_empty()
    }

    /// Extends every column to `len` positions. Shorter requests are a no-op.
    pub fn grow_to(&mut self, len: usize) {
        if len <= self.len() {
            return;
        }

        self.quality_sum.resize(len, 0.0);
        self.quality_count.resize(len, 0);
        for column in self.base_count.iter_mut() {
            column.resize(len, 0);
        }
    }

    pub fn quality_sum(&self) -> &[f64] {
        &self.quality_sum
    }

    pub fn quality_count(&self) -> &[u64] {
        &self.quality_count
    }

    pub fn base_count(&self, base: Base) -> &[u64] {
        &self.base_count[base.index()]
    }
}

/// Streaming accumulator for per-position quality, base composition and read lengths.
///
/// Reads are fed one at a time with [`RunningStats::update`]; none of them are retained.
/// [`RunningStats::finalize`] consumes the accumulator to produce a [`QcSummary`].
#[derive(Clone, Debug, Default)]
pub struct RunningStats {
    columns: PositionColumns,
    length_histogram: BTreeMap<usize, u64>,
    total_reads: u64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, read: &Read) {
        self.columns.grow_to(read.len());

        for (pos, q) in read.quality().iter().enumerate() {
            self.columns.quality_sum[pos] += *q as f64;
            self.columns.quality_count[pos] += 1;
        }

        // only the four canonical bases are counted, while quality above is not filtered
        for (pos, symbol) in read.sequence().iter().enumerate() {
            if let Some(base) = Base::from_ascii(*symbol) {
                self.columns.base_count[base.index()][pos] += 1;
            }
        }

        *self.length_histogram.entry(read.len()).or_insert(0) += 1;
        self.total_reads += 1;
    }

    pub fn total_reads(&self) -> u64 {
        self.total_reads
    }

    /// Length of the longest read seen so far.
    pub fn max_length(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &PositionColumns {
        &self.columns
    }

    pub fn length_histogram(&self) -> &BTreeMap<usize, u64> {
        &self.length_histogram
    }

    /// Computes the summary of everything seen so far without consuming the accumulator.
    ///
    /// # Errors
    ///
    /// Returns `QcError::EmptyDataset` if no reads have been added.
    pub fn snapshot(&self) -> Result<QcSummary, QcError> {
        if self.total_reads == 0 {
            return Err(QcError::EmptyDataset);
        }

        let mean_quality_by_position = self
            .columns
            .quality_sum
            .iter()
            .zip(self.columns.quality_count.iter())
            .map(|(sum, count)| match count {
                0 => 0.0,
                n => sum / *n as f64,
            })
            .collect();

        let total = self.total_reads as f64;
        let percent = |base: Base| -> Vec<f64> {
            self.columns
                .base_count(base)
                .iter()
                .map(|count| *count as f64 / total * 100.0)
                .collect()
        };

        Ok(QcSummary::new(
            mean_quality_by_position,
            BaseComposition {
                a: percent(Base::A),
                c: percent(Base::C),
                g: percent(Base::G),
                t: percent(Base::T),
            },
            self.length_histogram.clone(),
            self.total_reads,
        ))
    }

    /// Finishes accumulation and produces the summary.
    pub fn finalize(self) -> Result<QcSummary, QcError> {
        self.snapshot()
    }
}
