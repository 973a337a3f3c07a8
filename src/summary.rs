use crate::seq::Base;
use anyhow::Result;
use itertools::izip;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Percentage of all reads carrying each canonical base, by position.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub struct BaseComposition {
    pub(crate) a: Vec<f64>,
    pub(crate) c: Vec<f64>,
    pub(crate) g: Vec<f64>,
    pub(crate) t: Vec<f64>,
}

impl BaseComposition {
    pub fn percent(&self, base: Base) -> &[f64] {
        match base {
            Base::A => &self.a,
            Base::C => &self.c,
            Base::G => &self.g,
            Base::T => &self.t,
        }
    }
}

/// The finished result of a QC session.
///
/// All per-position vectors have the length of the longest read seen. Positions are
/// 0-based here; the tabular output numbers them from 1. A summary is read-only once built:
///
/// ```compile_fail
/// use readqc::{Read, RunningStats};
///
/// let mut stats = RunningStats::new();
/// stats.update(&Read::new("r1", b"ACGT".to_vec(), vec![30; 4]).unwrap());
/// let mut summary = stats.finalize().unwrap();
/// summary.total_reads = 0;
/// ```
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct QcSummary {
    mean_quality_by_position: Vec<f64>,
    percent_by_base_by_position: BaseComposition,
    length_histogram: BTreeMap<usize, u64>,
    total_reads: u64,
}

impl QcSummary {
    pub(crate) fn new(
        mean_quality_by_position: Vec<f64>,
        percent_by_base_by_position: BaseComposition,
        length_histogram: BTreeMap<usize, u64>,
        total_reads: u64,
    ) -> Self {
        Self {
            mean_quality_by_position,
            percent_by_base_by_position,
            length_histogram,
            total_reads,
        }
    }

    pub fn mean_quality_by_position(&self) -> &[f64] {
        &self.mean_quality_by_position
    }

    pub fn percent_by_base_by_position(&self) -> &BaseComposition {
        &self.percent_by_base_by_position
    }

    pub fn length_histogram(&self) -> &BTreeMap<usize, u64> {
        &self.length_histogram
    }

    pub fn total_reads(&self) -> u64 {
        self.total_reads
    }

    pub fn max_length(&self) -> usize {
        self.mean_quality_by_position.len()
    }

    pub fn percent(&self, base: Base) -> &[f64] {
        self.percent_by_base_by_position.percent(base)
    }

    /// Writes one tab-separated row per position, with a header.
    pub fn write_position_table(&self, writer: impl Write) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        let composition = &self.percent_by_base_by_position;
        for (idx, (mean_quality, pct_a, pct_c, pct_g, pct_t)) in izip!(
            &self.mean_quality_by_position,
            &composition.a,
            &composition.c,
            &composition.g,
            &composition.t
        )
        .enumerate()
        {
            wtr.serialize(PositionRow {
                position: idx + 1,
                mean_quality: *mean_quality,
                pct_a: *pct_a,
                pct_c: *pct_c,
                pct_g: *pct_g,
                pct_t: *pct_t,
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PositionRow {
    position: usize,
    mean_quality: f64,
    pct_a: f64,
    pct_c: f64,
    pct_g: f64,
    pct_t: f64,
}
