use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use mkp_rs::eval::ExportRow;
use mkp_rs::io::export::write_csv_rows;
use serde::Serialize;

use crate::EPOCH;

pub mod cli;
pub mod output;
pub mod report;

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open solution file: {}", path.display()))?;

    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, json)
        .with_context(|| format!("could not write solution file: {}", path.display()))?;

    info!(
        "[IO] solution JSON written to file://{}",
        std::fs::canonicalize(path)?.display()
    );
    Ok(())
}

/// Writes the flattened `(bin, item, weight, price, rating)` rows of a solution as CSV.
pub fn write_csv_export(rows: &[ExportRow], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open export file: {}", path.display()))?;

    write_csv_rows(rows, BufWriter::new(file))
        .with_context(|| format!("could not write export file: {}", path.display()))?;

    info!(
        "[IO] solution CSV written to file://{}",
        std::fs::canonicalize(path)?.display()
    );
    Ok(())
}

/// Logs to stderr, so the console report on stdout stays clean.
/// Every line is prefixed with its level, the time since [`EPOCH`] and the emitting thread.
pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let elapsed = EPOCH.elapsed();
            let secs = elapsed.as_secs();
            let thread = std::thread::current();

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}.{:0>3}] <{}>",
                record.level(),
                secs / 3600,
                (secs / 60) % 60,
                secs % 60,
                elapsed.subsec_millis(),
                thread.name().unwrap_or("-"),
            );

            out.finish(format_args!("{prefix:<32}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stderr())
        .apply()
        .context("could not initialize logger")?;
    info!("[MAIN] logger initialized at {}", jiff::Timestamp::now());
    Ok(())
}
