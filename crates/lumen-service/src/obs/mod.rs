//! Default process metrics, read at scrape time.

pub mod process;

pub use process::ProcessCollector;
