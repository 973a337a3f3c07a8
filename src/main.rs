extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter, IsTerminal},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use readqc::file::RunMetadata;
use readqc::session::{self, LogProgress, Progress, SessionReport};

mod cli;

use cli::{Cli, Commands, SessionArgs};

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))
                .with_context(|| format!("Unable to create output file {x}"))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

/// Where session progress goes: a progress bar on an interactive terminal, the log otherwise.
enum ProgressSink {
    Bar(ProgressBar),
    Log(LogProgress),
}

impl ProgressSink {
    fn new(max_reads: usize, quiet: bool) -> Result<Self> {
        if quiet {
            return Ok(Self::Bar(ProgressBar::hidden()));
        }
        if !std::io::stderr().is_terminal() {
            return Ok(Self::Log(LogProgress));
        }

        let pb = ProgressBar::new(max_reads as u64);
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} reads ({percent}%)",
        )?);
        Ok(Self::Bar(pb))
    }

    fn finish(&self) {
        if let Self::Bar(pb) = self {
            pb.finish_and_clear();
        }
    }
}

impl Progress for ProgressSink {
    fn report(&mut self, records_so_far: usize, max_reads: usize) {
        match self {
            Self::Bar(pb) => pb.set_position(records_so_far as u64),
            Self::Log(sink) => sink.report(records_so_far, max_reads),
        }
    }
}

/// Runs a session for the given arguments, returning the report and the metadata describing it.
fn run_session(args: &SessionArgs) -> Result<(SessionReport, RunMetadata)> {
    // time everything!
    let now = std::time::Instant::now();
    let options = args.options();

    let mut progress = ProgressSink::new(options.max_reads, args.quiet)?;
    let report = session::run(&args.file, &options, &mut progress)
        .with_context(|| format!("Could not summarise {}", args.file))?;
    progress.finish();

    let metadata = RunMetadata {
        readqc_version: cli::VERSION.to_string(),
        file_path: std::fs::canonicalize(&args.file)?.display().to_string(),
        run_date: format!("{:?}", chrono::offset::Local::now()),
        elapsed: now.elapsed().as_secs_f64(),
        compression: options.compression,
        max_reads: options.max_reads,
        accepted_records: report.accepted_records,
        skipped_records: report.skipped_records,
        cap_hit: report.cap_hit,
    };

    info!(
        "Stats: {} reads, {} skipped, longest read {} bases, {:.1}s runtime",
        metadata.accepted_records,
        metadata.skipped_records,
        report.summary.max_length(),
        metadata.elapsed
    );
    if report.cap_hit {
        info!(
            "Reached the cap of {} reads; anything after them was not read",
            options.max_reads
        );
    }

    Ok((report, metadata))
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("readqc v{}", cli::VERSION);

    match &cli.command {
        Commands::Summary { session, output } => {
            let (report, metadata) = run_session(session)?;

            let data = serde_json::json!({
                "metadata": metadata,
                "summary": report.summary,
            });

            let mut writer = get_writer(output)?;
            serde_json::to_writer_pretty(&mut writer, &data).context("Should be serialisable")?;
            writeln!(writer)?;
            writer.flush()?;
        }
        Commands::Table { session, output } => {
            let (report, _) = run_session(session)?;

            for (len, count) in report.summary.length_histogram().iter() {
                info!("length {len}: {count} reads");
            }

            let mut writer = get_writer(output)?;
            report.summary.write_position_table(&mut writer)?;
            writer.flush()?;
        }
    };

    info!("Completed successfully.");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
