//! `ColonyOutputObserver<W>`: bridges `ColonyObserver` to an `OutputWriter`.

use tracing::warn;
use wk_agent::Agent;
use wk_behavior::{ItemRequest, TickReport};
use wk_core::Tick;
use wk_sim::ColonyObserver;

use crate::row::{RequestRow, WorkerStateRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ColonyObserver`] that writes worker states and requests to any
/// [`OutputWriter`].
///
/// Worker rows are buffered per tick and written in one batch at tick end.
/// Write errors are stored because observer callbacks cannot fail; check
/// [`take_error`][Self::take_error] after the run.
pub struct ColonyOutputObserver<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    pending:    Vec<WorkerStateRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ColonyOutputObserver<W> {
    /// Record every worker on every tick.
    pub fn new(writer: W) -> Self {
        Self { writer, interval: 1, pending: Vec::new(), last_error: None }
    }

    /// Only record worker states on ticks that are a multiple of `interval`.
    /// Requests are always recorded.
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn sampled(&self, tick: Tick) -> bool {
        tick.0.is_multiple_of(self.interval)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ColonyObserver for ColonyOutputObserver<W> {
    fn on_worker(&mut self, report: &TickReport, agent: &Agent) {
        if self.sampled(report.tick) {
            self.pending.push(WorkerStateRow::new(report, agent));
        }
    }

    fn on_request(&mut self, request: &ItemRequest) {
        let result = self.writer.write_request(&RequestRow::from(request));
        self.store_err(result);
    }

    fn on_tick_end(&mut self, _tick: Tick, _task_ticks: usize) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_states(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
