//! `wk-output`: colony output writers for the worker_ai framework.
//!
//! | Backend | Files created                          |
//! |---------|----------------------------------------|
//! | CSV     | `worker_states.csv`, `requests.csv`    |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`ColonyOutputObserver`], which implements `wk_sim::ColonyObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wk_output::{ColonyOutputObserver, CsvWriter};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ColonyOutputObserver::new(writer);
//! colony.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ColonyOutputObserver;
pub use row::{RequestRow, WorkerStateRow};
pub use writer::OutputWriter;
