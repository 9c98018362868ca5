//! Output of per-generation records and the closing parameter trailer.

use coop_core::{CooperationStats, Parameters, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sink for the records a run produces
pub trait Reporter {
    fn write_header(&mut self) -> Result<()>;

    fn write_record(&mut self, generation: u64, stats: &CooperationStats) -> Result<()>;

    fn write_trailer(&mut self, seed: u64, params: &Parameters) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Semicolon-delimited text records
///
/// ```text
/// generation;mean_coop;var_coop;
/// 0;0.5;0.25;
///
/// seed;42
/// mu;0.001
/// ```
pub struct DelimitedReporter<W: Write> {
    writer: W,
}

impl DelimitedReporter<BufWriter<File>> {
    /// Create (or truncate) the output file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DelimitedReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for DelimitedReporter<W> {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "generation;mean_coop;var_coop;")?;
        Ok(())
    }

    fn write_record(&mut self, generation: u64, stats: &CooperationStats) -> Result<()> {
        writeln!(
            self.writer,
            "{};{};{};",
            generation,
            stats.mean(),
            stats.variance()
        )?;
        Ok(())
    }

    fn write_trailer(&mut self, seed: u64, params: &Parameters) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "seed;{}", seed)?;
        for (name, value) in params.records() {
            writeln!(self.writer, "{};{}", name, value)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
