//! Append-only log of computed reports
//!
//! Reports stay pure functions; callers that want a record of a call hand the
//! result to [`ReportLog::record`] afterwards. Each record is one JSON line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// One logged report call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub function: String,
    pub timestamp: NaiveDateTime,
    pub args: Value,
    pub result: Value,
}

/// JSON-lines file receiving report records
#[derive(Debug, Clone)]
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record for `function` called with `args` that returned `result`
    pub fn record<A, R>(&self, function: &str, args: &A, result: &R) -> Result<()>
    where
        A: Serialize + ?Sized,
        R: Serialize + ?Sized,
    {
        let record = ReportRecord {
            function: function.to_string(),
            timestamp: Local::now().naive_local(),
            args: serde_json::to_value(args)?,
            result: serde_json::to_value(result)?,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        serde_json::to_writer(&mut file, &record)?;
        file.write_all(b"\n")?;

        debug!("Recorded {} report in {}", function, self.path.display());
        Ok(())
    }

    /// Read every record in the log, oldest first
    pub fn read_all(&self) -> Result<Vec<ReportRecord>> {
        let content = std::fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }
}
