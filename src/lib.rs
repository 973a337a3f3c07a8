#[macro_use]
extern crate log;

pub mod error;
pub mod file;
pub mod reader;
pub mod seq;
pub mod session;
pub mod stats;
pub mod summary;

pub use error::{MalformedKind, QcError};
pub use reader::{Compression, FastqRecords};
pub use seq::{Base, Read};
pub use session::{MalformedPolicy, Progress, SessionOptions, SessionReport};
pub use stats::RunningStats;
pub use summary::{BaseComposition, QcSummary};
