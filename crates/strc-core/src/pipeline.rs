//! The pipeline driver.

use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;
use strc_ingest::{csv_reader, open_input};
use strc_model::{Config, LineEnding};
use strc_normalization::TextNormalizer;
use strc_output::{csv_writer, open_output, open_sink};
use tracing::{debug, error, info};

use crate::dedupe::{KeyedRow, Strategy, retain};
use crate::error::{PipelineError, Result};
use crate::key::KeyBuilder;
use crate::row::RowTransform;

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data records read, header excluded, malformed records excluded.
    pub rows_read: usize,
    pub rows_written: usize,
    /// Rows removed as duplicates.
    pub rows_dropped: usize,
    /// Rows whose key was empty and therefore exempt from filtering.
    pub empty_keys: usize,
    /// Malformed records that were logged and skipped.
    pub records_skipped: usize,
    pub strategy: Strategy,
}

/// A compiled run configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    transform: RowTransform,
    keys: Option<KeyBuilder>,
    strategy: Strategy,
    has_header: bool,
    flexible: bool,
    line_ending: LineEnding,
}

impl Pipeline {
    /// Compiles the normalizer and selects the strategy for `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let normalizer = TextNormalizer::new(&config.normalize.rules)?;
        let transform =
            RowTransform::new(normalizer, &config.columns, config.normalize.write_back);
        let keys = KeyBuilder::from_policy(&config.dedupe, &config.columns);
        let strategy = Strategy::select(&config.dedupe, keys.is_some());
        Ok(Self {
            transform,
            keys,
            strategy,
            has_header: config.has_header,
            flexible: config.flexible,
            line_ending: config.output.line_ending,
        })
    }

    /// Reads CSV from `input`, writes CSV to `output`.
    ///
    /// Both streams carry UTF-8; code page handling belongs to the caller.
    /// The output is flushed before returning.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<RunSummary> {
        let mut reader = csv_reader(input);
        let mut writer = csv_writer(output, self.line_ending);
        let mut summary = RunSummary {
            strategy: self.strategy,
            ..RunSummary::default()
        };
        debug!(strategy = %self.strategy, has_header = self.has_header, "starting run");

        let mut record = StringRecord::new();
        let mut header_pending = self.has_header;
        let mut data_width = None;
        let mut buffered = Vec::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) if err.is_io_error() => return Err(PipelineError::Read(err)),
                Err(err) => {
                    summary.records_skipped += 1;
                    let line = err.position().map(csv::Position::line);
                    error!(line, error = %err, "skipping malformed record");
                    continue;
                }
            }
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();

            if header_pending {
                header_pending = false;
                if let Some(name) = self.keys.as_ref().and_then(KeyBuilder::header_name) {
                    fields.push(name.to_string());
                }
                writer.write_record(&fields).map_err(PipelineError::Write)?;
                continue;
            }

            if !self.flexible {
                let width = *data_width.get_or_insert(fields.len());
                if fields.len() != width {
                    summary.records_skipped += 1;
                    let line = record.position().map(csv::Position::line);
                    error!(
                        line,
                        expected = width,
                        found = fields.len(),
                        "skipping malformed record: field count differs from the first data record"
                    );
                    continue;
                }
            }

            summary.rows_read += 1;
            let row = self.process_row(fields);
            if row.passthrough {
                summary.empty_keys += 1;
            }
            match self.strategy {
                Strategy::Streaming => {
                    writer.write_record(&row.fields).map_err(PipelineError::Write)?;
                    summary.rows_written += 1;
                }
                Strategy::Buffered { .. } => buffered.push(row),
            }
        }

        if let Strategy::Buffered { keep } = self.strategy {
            let survivors = retain(&buffered, keep);
            for (row, keep) in buffered.iter().zip(survivors) {
                if keep {
                    writer.write_record(&row.fields).map_err(PipelineError::Write)?;
                    summary.rows_written += 1;
                } else {
                    summary.rows_dropped += 1;
                }
            }
        }

        writer
            .flush()
            .map_err(|err| PipelineError::Write(err.into()))?;
        debug!(
            rows_read = summary.rows_read,
            rows_written = summary.rows_written,
            rows_dropped = summary.rows_dropped,
            empty_keys = summary.empty_keys,
            records_skipped = summary.records_skipped,
            "run counters"
        );
        info!(
            rows_written = summary.rows_written,
            rows_dropped = summary.rows_dropped,
            "run finished"
        );
        Ok(summary)
    }

    /// Normalizes one data row and, when keys are active, builds and applies
    /// its key.
    fn process_row(&self, mut fields: Vec<String>) -> KeyedRow {
        let cache = self.transform.apply(&mut fields);
        let Some(keys) = &self.keys else {
            return KeyedRow {
                fields,
                key: String::new(),
                passthrough: false,
            };
        };
        let key = keys.key(&fields, &cache, self.transform.normalizer());
        let passthrough = keys.is_passthrough(&key);
        keys.apply(&mut fields, &key);
        KeyedRow {
            fields,
            key,
            passthrough,
        }
    }
}

/// Runs `config` over the file at `input`, writing to `output` or stdout.
///
/// The input is opened before the output is created, so a missing input
/// leaves no empty output file behind.
pub fn process_file(input: &Path, output: Option<&Path>, config: &Config) -> Result<RunSummary> {
    let pipeline = Pipeline::new(config)?;
    let reader = open_input(input, config.code_page)?;
    let sink = open_sink(output)?;
    let mut writer = open_output(sink, config.code_page, &config.output)?;
    let summary = pipeline.run(reader, &mut writer)?;
    writer.finish().map_err(PipelineError::Finish)?;
    Ok(summary)
}
