//! Feeds records from JSON lines through the enricher.

use crate::config::FailurePolicy;
use anyhow::{Context, Result};
use geoenrich_boundary as json;
use geoenrich_core::{
    entities::Record,
    usecases::{build_address, GeoEnricher},
};
use rayon::{prelude::*, ThreadPool};
use std::{
    fmt,
    io::{BufRead, Write},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub read: usize,
    pub skipped: usize,
    pub enriched: usize,
    pub dropped: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            read,
            skipped,
            enriched,
            dropped,
        } = self;
        write!(
            f,
            "{read} read, {skipped} skipped, {enriched} enriched, {dropped} dropped"
        )
    }
}

/// Number of records that are enriched together before they are written.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Enriches the records batch by batch.
///
/// Each batch is written before the next one is read, so with
/// [`FailurePolicy::Halt`] the records of earlier batches are already
/// in the output when the run is aborted.
pub fn run_enrichment<R, W>(
    enricher: &GeoEnricher,
    reader: R,
    mut writer: W,
    on_failure: FailurePolicy,
    jobs: Option<usize>,
    batch_size: usize,
) -> Result<Summary>
where
    R: BufRead,
    W: Write,
{
    let pool = jobs
        .map(|num_threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
        })
        .transpose()?;
    let batch_size = batch_size.max(1);
    let mut summary = Summary::default();
    let mut batch = Vec::with_capacity(batch_size);
    for record in parse_lines(reader) {
        summary.read += 1;
        match record? {
            Some(record) => batch.push(record),
            None => summary.skipped += 1,
        }
        if batch.len() == batch_size {
            let enriched = enrich_batch(enricher, pool.as_ref(), &batch, on_failure)?;
            summary.add_batch(batch.len(), enriched.len());
            write_records(&mut writer, enriched)?;
            batch.clear();
        }
    }
    if !batch.is_empty() {
        let enriched = enrich_batch(enricher, pool.as_ref(), &batch, on_failure)?;
        summary.add_batch(batch.len(), enriched.len());
        write_records(&mut writer, enriched)?;
    }
    writer.flush()?;
    Ok(summary)
}

impl Summary {
    fn add_batch(&mut self, records: usize, enriched: usize) {
        self.enriched += enriched;
        self.dropped += records - enriched;
    }
}

/// Parses all non-blank lines.
///
/// Invalid records are logged and yield `None`.
fn parse_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Option<Record>>> {
    reader
        .lines()
        .enumerate()
        .filter(|(_, line)| !matches!(line, Ok(line) if line.trim().is_empty()))
        .map(|(i, line)| -> Result<Option<Record>> {
            let line = line.context("Failed to read record")?;
            let record = parse_record(&line)
                .map_err(|err| {
                    log::warn!("Skipping invalid record on line {}: {:#}", i + 1, err);
                })
                .ok();
            Ok(record)
        })
}

fn parse_record(line: &str) -> Result<Record> {
    let entity: json::Entity = serde_json::from_str(line)?;
    Ok(Record::try_from(entity)?)
}

fn enrich_batch(
    enricher: &GeoEnricher,
    pool: Option<&ThreadPool>,
    batch: &[Record],
    on_failure: FailurePolicy,
) -> Result<Vec<Record>> {
    match pool {
        Some(pool) => pool.install(|| enrich_records(enricher, batch, on_failure)),
        None => enrich_records(enricher, batch, on_failure),
    }
}

/// Output order follows input order.
pub fn enrich_records(
    enricher: &GeoEnricher,
    records: &[Record],
    on_failure: FailurePolicy,
) -> Result<Vec<Record>> {
    let enriched = match on_failure {
        FailurePolicy::Drop => records
            .par_iter()
            .filter_map(|r| enricher.enrich_or_drop(r))
            .collect(),
        FailurePolicy::Halt => records
            .par_iter()
            .map(|r| enricher.enrich(r))
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(enriched)
}

pub fn write_records<W: Write>(mut writer: W, records: Vec<Record>) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, &json::Entity::from(record))?;
        writeln!(writer)?;
    }
    Ok(())
}

pub fn print_addresses<R, W>(reader: R, mut writer: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for record in parse_lines(reader) {
        if let Some(record) = record? {
            writeln!(writer, "{}", build_address(&record))?;
        }
    }
    writer.flush()?;
    Ok(())
}
