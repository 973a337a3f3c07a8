use crate::error::QcError;
use crate::reader::{Compression, FastqRecords};
use crate::seq::Read;
use crate::stats::RunningStats;
use crate::summary::QcSummary;
use std::path::Path;

pub const DEFAULT_MAX_READS: usize = 3000;
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// What to do with a record that fails structural validation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Stop the session and return the error.
    #[default]
    Abort,

    /// Drop the record, count it, and carry on with the next one.
    Skip,
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Maximum number of accepted reads; no record past this one is pulled from the source.
    pub max_reads: usize,
    /// Report progress after this many accepted reads. 0 disables intermediate reports.
    pub progress_every: usize,
    pub on_malformed: MalformedPolicy,
    pub compression: Compression,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_reads: DEFAULT_MAX_READS,
            progress_every: DEFAULT_PROGRESS_EVERY,
            on_malformed: MalformedPolicy::default(),
            compression: Compression::default(),
        }
    }
}

/// Receives advisory progress updates from a running session.
pub trait Progress {
    fn report(&mut self, records_so_far: usize, max_reads: usize);
}

/// Share of the cap reached so far, as a percentage in `[0, 100]`.
pub fn progress_percentage(records_so_far: usize, max_reads: usize) -> f64 {
    if max_reads == 0 {
        return 100.0;
    }
    (records_so_far as f64 / max_reads as f64 * 100.0).clamp(0.0, 100.0)
}

/// Discards progress updates.
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _records_so_far: usize, _max_reads: usize) {}
}

/// Writes progress updates to the log.
pub struct LogProgress;

impl LogProgress {
    pub fn message(records_so_far: usize, max_reads: usize) -> String {
        format!(
            "Processed: {records_so_far} reads ({:.0}%)",
            progress_percentage(records_so_far, max_reads)
        )
    }
}

impl Progress for LogProgress {
    fn report(&mut self, records_so_far: usize, max_reads: usize) {
        info!("{}", Self::message(records_so_far, max_reads));
    }
}

#[derive(Clone, Debug)]
pub struct SessionReport {
    pub summary: QcSummary,
    pub accepted_records: usize,
    pub skipped_records: usize,
    /// Whether `max_reads` reads were accepted. The source is not read past the cap, so this
    /// is also true for an input holding exactly `max_reads` reads.
    pub cap_hit: bool,
}

/// Feeds records into a fresh [`RunningStats`] until the cap or the end of input.
///
/// Records are pulled lazily, so once `max_reads` reads have been accepted the source is not
/// touched again.
///
/// # Errors
///
/// * Any `QcError::MalformedRecord` when the policy is `MalformedPolicy::Abort`.
/// * Any other error yielded by `records`.
/// * `QcError::EmptyDataset` if no read was accepted.
pub fn aggregate<I>(
    records: I,
    options: &SessionOptions,
    progress: &mut impl Progress,
) -> Result<SessionReport, QcError>
where
    I: IntoIterator<Item = Result<Read, QcError>>,
{
    let mut stats = RunningStats::new();
    let mut accepted = 0usize;
    let mut skipped = 0usize;
    let mut records = records.into_iter();

    while accepted < options.max_reads {
        let Some(record) = records.next() else {
            break;
        };

        let read = match record {
            Ok(read) => read,
            Err(e) if e.is_malformed() && options.on_malformed == MalformedPolicy::Skip => {
                warn!("Skipping {e}");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        stats.update(&read);
        accepted += 1;

        if options.progress_every != 0 && accepted % options.progress_every == 0 {
            progress.report(accepted, options.max_reads);
        }
    }

    let cap_hit = accepted == options.max_reads;
    if options.progress_every == 0 || accepted % options.progress_every != 0 || accepted == 0 {
        progress.report(accepted, options.max_reads);
    }

    if skipped > 0 {
        warn!("Skipped {skipped} malformed records");
    }
    debug!(
        "Accepted {accepted} reads, longest read {} bases",
        stats.max_length()
    );

    Ok(SessionReport {
        summary: stats.finalize()?,
        accepted_records: accepted,
        skipped_records: skipped,
        cap_hit,
    })
}

/// Opens `path` and runs a complete QC session over it.
pub fn run(
    path: impl AsRef<Path>,
    options: &SessionOptions,
    progress: &mut impl Progress,
) -> Result<SessionReport, QcError> {
    let path = path.as_ref();
    info!("Reading up to {} reads from {}", options.max_reads, path.display());

    let records = FastqRecords::from_path(path, options.compression)?;
    aggregate(records, options, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedKind;
    use std::cell::Cell;

    fn good(i: usize) -> Result<Read, QcError> {
        Ok(Read::new(format!("r{i}"), b"ACGT".to_vec(), vec![30; 4]).unwrap())
    }

    fn bad(record: u64) -> Result<Read, QcError> {
        Err(QcError::MalformedRecord {
            record,
            line: record * 4 - 3,
            kind: MalformedKind::LengthMismatch {
                sequence: 4,
                quality: 2,
            },
        })
    }

    #[derive(Default)]
    struct Recorder(Vec<(usize, usize)>);

    impl Progress for Recorder {
        fn report(&mut self, records_so_far: usize, max_reads: usize) {
            self.0.push((records_so_far, max_reads));
        }
    }

    #[test]
    fn cap_stops_pulling_records() {
        let pulled = Cell::new(0usize);
        let records = (0..10_000).map(|i| {
            pulled.set(pulled.get() + 1);
            good(i)
        });

        let report = aggregate(records, &SessionOptions::default(), &mut NoProgress).unwrap();

        assert_eq!(report.summary.total_reads(), 3000);
        assert_eq!(report.accepted_records, 3000);
        assert!(report.cap_hit);
        assert_eq!(pulled.get(), 3000);
    }

    #[test]
    fn input_ending_at_cap_hits_cap_without_extra_pull() {
        let pulled = Cell::new(0usize);
        let records = (0..5).map(|i| {
            pulled.set(pulled.get() + 1);
            good(i)
        });
        let options = SessionOptions {
            max_reads: 5,
            ..SessionOptions::default()
        };

        let report = aggregate(records, &options, &mut NoProgress).unwrap();
        assert!(report.cap_hit);
        assert_eq!(report.summary.total_reads(), 5);
        assert_eq!(pulled.get(), 5);
    }

    #[test]
    fn short_input_is_not_capped() {
        let report =
            aggregate((0..5).map(good), &SessionOptions::default(), &mut NoProgress).unwrap();
        assert_eq!(report.summary.total_reads(), 5);
        assert!(!report.cap_hit);
    }

    #[test]
    fn malformed_aborts_by_default() {
        let records = vec![good(0), bad(2), good(2)];
        let err = aggregate(records, &SessionOptions::default(), &mut NoProgress).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn skip_policy_leaves_stats_untouched() {
        let options = SessionOptions {
            on_malformed: MalformedPolicy::Skip,
            ..SessionOptions::default()
        };

        let with_bad =
            aggregate(vec![good(0), bad(2), good(2)], &options, &mut NoProgress).unwrap();
        let without = aggregate(vec![good(0), good(2)], &options, &mut NoProgress).unwrap();

        assert_eq!(with_bad.skipped_records, 1);
        assert_eq!(with_bad.summary, without.summary);
        assert_eq!(with_bad.summary.total_reads(), 2);
    }

    #[test]
    fn skipped_records_do_not_count_towards_cap() {
        let options = SessionOptions {
            max_reads: 2,
            on_malformed: MalformedPolicy::Skip,
            ..SessionOptions::default()
        };
        let records = vec![bad(1), good(1), bad(3), good(3), good(4)];
        let report = aggregate(records, &options, &mut NoProgress).unwrap();
        assert_eq!(report.accepted_records, 2);
        assert_eq!(report.skipped_records, 2);
    }

    #[test]
    fn io_errors_abort_even_when_skipping() {
        let options = SessionOptions {
            on_malformed: MalformedPolicy::Skip,
            ..SessionOptions::default()
        };
        let records = vec![good(0), Err(QcError::Io(std::io::Error::other("gone")))];
        assert!(matches!(
            aggregate(records, &options, &mut NoProgress),
            Err(QcError::Io(_))
        ));
    }

    #[test]
    fn no_reads_is_empty_dataset() {
        let err = aggregate(Vec::new(), &SessionOptions::default(), &mut NoProgress).unwrap_err();
        assert!(matches!(err, QcError::EmptyDataset));
    }

    #[test]
    fn progress_is_reported_per_batch() {
        let options = SessionOptions {
            max_reads: 250,
            ..SessionOptions::default()
        };
        let mut recorder = Recorder::default();
        aggregate((0..1000).map(good), &options, &mut recorder).unwrap();

        assert_eq!(recorder.0, vec![(100, 250), (200, 250), (250, 250)]);

        let mut recorder = Recorder::default();
        aggregate((0..10_000).map(good), &SessionOptions::default(), &mut recorder).unwrap();
        assert_eq!(recorder.0.len(), 30);
        assert_eq!(recorder.0.last(), Some(&(3000, 3000)));
    }

    #[test]
    fn log_progress_message() {
        assert_eq!(LogProgress::message(100, 3000), "Processed: 100 reads (3%)");
        assert_eq!(
            LogProgress::message(3000, 3000),
            "Processed: 3000 reads (100%)"
        );
    }

    #[test]
    fn percentage() {
        assert_eq!(progress_percentage(0, 3000), 0.0);
        assert_eq!(progress_percentage(1500, 3000), 50.0);
        assert_eq!(progress_percentage(4000, 3000), 100.0);
        assert_eq!(progress_percentage(5, 0), 100.0);
    }
}
