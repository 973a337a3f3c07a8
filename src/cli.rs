use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Args, Parser, Subcommand};
use readqc::session::{DEFAULT_MAX_READS, DEFAULT_PROGRESS_EVERY};
use readqc::{Compression, MalformedPolicy, SessionOptions};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧪 readqc version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   per-position quality, base composition and read length summaries for FASTQ";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise a .fastq(.gz) file as JSON
    #[command(arg_required_else_help = true)]
    Summary {
        #[command(flatten)]
        session: SessionArgs,

        /// the output .json file; standard output if not given
        #[arg(short)]
        output: Option<String>,
    },

    /// Write the per-position quality and base composition as a tab-separated table
    #[command(arg_required_else_help = true)]
    Table {
        #[command(flatten)]
        session: SessionArgs,

        /// the output .tsv file; standard output if not given
        #[arg(short)]
        output: Option<String>,
    },
}

#[derive(Args, Clone)]
pub struct SessionArgs {
    /// the input .fastq file, optionally compressed
    pub file: String,

    /// stop after this many reads have been accepted
    #[arg(long, default_value_t = DEFAULT_MAX_READS, value_parser = parse_positive)]
    pub max_reads: usize,

    /// report progress every this many reads
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY, value_parser = parse_positive)]
    pub progress_every: usize,

    /// skip, instead of error, on records which are malformed:
    /// - a quality line whose length differs from the sequence line
    /// - a header without `@` or a separator without `+`
    /// - quality characters below `!`
    ///
    /// a truncated final record still ends the input
    #[arg(long, verbatim_doc_comment)]
    pub skip_malformed: bool,

    /// how the input is compressed
    #[arg(long, value_enum, default_value = "auto")]
    pub compression: Compression,

    /// hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl SessionArgs {
    pub fn options(&self) -> SessionOptions {
        SessionOptions {
            max_reads: self.max_reads,
            progress_every: self.progress_every,
            on_malformed: if self.skip_malformed {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Abort
            },
            compression: self.compression,
        }
    }
}

fn parse_positive(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(0) => Err(String::from("must be at least 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{arg}' is not a whole number")),
    }
}
