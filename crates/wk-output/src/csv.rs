//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `worker_states.csv`
//! - `requests.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RequestRow, WorkerStateRow};

/// Writes colony output to two CSV files.
pub struct CsvWriter {
    states:   Writer<File>,
    requests: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut states = Writer::from_path(dir.join("worker_states.csv"))?;
        states.write_record([
            "tick", "agent_id", "state", "error_state", "x", "y", "z", "waiting", "task_ran",
        ])?;

        let mut requests = Writer::from_path(dir.join("requests.csv"))?;
        requests.write_record(["tick", "agent_id", "wanted", "quantity", "min_level"])?;

        Ok(Self { states, requests, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_states(&mut self, rows: &[WorkerStateRow]) -> OutputResult<()> {
        for row in rows {
            self.states.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.state.to_owned(),
                row.error_state.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                (row.waiting as u8).to_string(),
                (row.task_ran as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_request(&mut self, row: &RequestRow) -> OutputResult<()> {
        self.requests.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.wanted.clone(),
            row.quantity.to_string(),
            row.min_level.map(|l| l.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.states.flush()?;
        self.requests.flush()?;
        Ok(())
    }
}
