//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, RequestRow, WorkerStateRow};

/// Sink for colony output rows.
///
/// The observer never fails a tick; errors are stored and retrieved with
/// [`ColonyOutputObserver::take_error`][crate::ColonyOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick's worker rows.
    fn write_states(&mut self, rows: &[WorkerStateRow]) -> OutputResult<()>;

    fn write_request(&mut self, row: &RequestRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
