//! Output handling module

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use wordsub_core::FilterStats;

/// Open a file for writing, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Statistics report printed after filtering
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    /// Driving mode used
    pub mode: &'a str,
    /// Dictionary entries loaded
    pub entries: usize,
    /// Counters from the filter
    #[serde(flatten)]
    pub stats: FilterStats,
}

impl StatsReport<'_> {
    /// Write the report as one JSON document followed by a newline
    pub fn write_json<W: Write>(&self, mut writer: W, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
