use crate::reader::Compression;
use serde::Serialize;

/// Describes one QC session; written alongside the summary.
#[derive(Serialize, Default, Debug)]
pub struct RunMetadata {
    pub readqc_version: String,
    pub file_path: String,
    pub run_date: String,
    pub elapsed: f64,
    pub compression: Compression,
    pub max_reads: usize,
    pub accepted_records: usize,
    pub skipped_records: usize,
    pub cap_hit: bool,
}
