//! JSON-lines enrichment pipeline.
//!
//! Reads one record per line, enriches it and writes it back out on its own
//! line. Output order always matches input order. Lines that are not valid
//! UTF-8 JSON are passed through byte for byte.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use thiserror::Error;
use tile_locator::{Enrichment, LocateError, RecordEnricher};
use tracing::{debug, warn};

/// Default number of lines enriched per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Non-blank lines read.
    pub read: u64,
    pub enriched: u64,
    pub invalid_tile: u64,
    pub reprojection_failed: u64,
    /// Valid JSON that is not an object.
    pub skipped: u64,
    /// Lines that are not valid UTF-8 JSON.
    pub malformed: u64,
}

impl PipelineStats {
    pub fn failed(&self) -> u64 {
        self.invalid_tile + self.reprojection_failed
    }

    fn record(&mut self, outcome: &Processed) {
        match outcome {
            Processed::Blank(_) => return,
            Processed::Malformed { .. } => self.malformed += 1,
            Processed::Record { outcome, .. } => match outcome {
                Enrichment::Enriched(_) => self.enriched += 1,
                Enrichment::Failed(LocateError::InvalidTile(_)) => self.invalid_tile += 1,
                Enrichment::Failed(LocateError::ReprojectionFailed(_)) => {
                    self.reprojection_failed += 1
                }
                Enrichment::Skipped => self.skipped += 1,
            },
        }
        self.read += 1;
    }
}

#[derive(Debug, Error)]
enum MalformedLine {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of processing one input line, without its line ending.
enum Processed {
    Blank(Vec<u8>),
    Malformed { line: Vec<u8>, error: MalformedLine },
    Record { line: Vec<u8>, outcome: Enrichment },
}

impl Processed {
    fn line(&self) -> &[u8] {
        match self {
            Processed::Blank(line) => line,
            Processed::Malformed { line, .. } => line,
            Processed::Record { line, .. } => line,
        }
    }
}

/// Streams records through a [`RecordEnricher`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    enricher: RecordEnricher,
    parallel: bool,
    batch_size: usize,
}

impl Pipeline {
    pub fn new(enricher: RecordEnricher) -> Self {
        Self {
            enricher,
            parallel: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Enrich the lines of each batch on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Lines buffered before a batch is enriched and written. Zero is
    /// treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn enricher(&self) -> &RecordEnricher {
        &self.enricher
    }

    /// Process every line of `input` and write the results to `output`.
    ///
    /// On a read error the lines already read are written before the error
    /// is returned.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<PipelineStats> {
        let mut stats = PipelineStats::default();
        let mut batch: Vec<Vec<u8>> = Vec::with_capacity(self.batch_size);
        let mut first_line = 1;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => batch.push(strip_line_ending(&buf).to_vec()),
                Err(err) => {
                    self.flush(&batch, first_line, &mut output, &mut stats)?;
                    output.flush().context("Failed to flush output")?;
                    return Err(err).context(format!(
                        "Failed to read input line {}",
                        first_line + batch.len()
                    ));
                }
            }

            if batch.len() == self.batch_size {
                self.flush(&batch, first_line, &mut output, &mut stats)?;
                first_line += batch.len();
                batch.clear();
            }
        }
        self.flush(&batch, first_line, &mut output, &mut stats)?;

        output.flush().context("Failed to flush output")?;
        Ok(stats)
    }

    fn flush<W: Write>(
        &self,
        batch: &[Vec<u8>],
        first_line: usize,
        output: &mut W,
        stats: &mut PipelineStats,
    ) -> Result<()> {
        let processed: Vec<Processed> = if self.parallel {
            batch
                .par_iter()
                .map(|line| self.process_line(line))
                .collect::<Result<_>>()?
        } else {
            batch
                .iter()
                .map(|line| self.process_line(line))
                .collect::<Result<_>>()?
        };

        for (offset, item) in processed.iter().enumerate() {
            let line_no = first_line + offset;
            match item {
                Processed::Malformed { error, .. } => {
                    warn!(line = line_no, error = %error, "Passing through malformed line");
                }
                Processed::Record {
                    outcome: Enrichment::Failed(err),
                    ..
                } => {
                    debug!(
                        line = line_no,
                        kind = err.error_kind(),
                        error = %err,
                        "Tile location failed"
                    );
                }
                _ => {}
            }

            stats.record(item);
            output
                .write_all(item.line())
                .context("Failed to write output line")?;
            output.write_all(b"\n").context("Failed to write output line")?;
        }

        Ok(())
    }

    fn process_line(&self, line: &[u8]) -> Result<Processed> {
        let text = match std::str::from_utf8(line) {
            Ok(text) => text,
            Err(error) => {
                return Ok(Processed::Malformed {
                    line: line.to_vec(),
                    error: error.into(),
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(Processed::Blank(line.to_vec()));
        }

        let mut record: Value = match serde_json::from_str(text) {
            Ok(record) => record,
            Err(error) => {
                return Ok(Processed::Malformed {
                    line: line.to_vec(),
                    error: error.into(),
                })
            }
        };

        let outcome = self.enricher.enrich(&mut record);
        let line = match outcome {
            Enrichment::Skipped => line.to_vec(),
            _ => serde_json::to_vec(&record).context("Failed to serialize record")?,
        };

        Ok(Processed::Record { line, outcome })
    }
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
