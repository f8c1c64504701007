//! CSV ledger of relocated files.
//!
//! One header row, then one row per successful move: the filename in the first
//! column and empty strings in the others. Every write is flushed before the
//! next pick, so after a crash the ledger matches the output directory up to
//! the last completed move.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::LedgerMode;
use crate::errors::SelectError;

/// Ledger file name inside the output directory.
pub const LEDGER_FILE_NAME: &str = "panoramics.csv";

/// One ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRecord<'a> {
    pub filename: &'a str,
}

impl<'a> SelectionRecord<'a> {
    pub fn new(filename: &'a str) -> Self {
        Self { filename }
    }

    /// Row cells for a header of `width` columns.
    fn cells(&self, width: usize) -> impl Iterator<Item = &'a str> + use<'a> {
        std::iter::once(self.filename).chain(std::iter::repeat_n("", width.saturating_sub(1)))
    }
}

/// Append-only CSV writer.
pub struct Ledger<W: Write> {
    writer: csv::Writer<W>,
    width: usize,
    rows: usize,
    path: PathBuf,
}

impl Ledger<File> {
    /// Open `<output>/panoramics.csv` according to `mode` and make sure a header is present.
    pub fn create(output_dir: &Path, fields: &[String], mode: LedgerMode) -> Result<Self> {
        let path = output_dir.join(LEDGER_FILE_NAME);
        let mut opts = OpenOptions::new();
        match mode {
            LedgerMode::Truncate => opts.write(true).create(true).truncate(true),
            LedgerMode::Append => opts.read(true).append(true).create(true),
        };
        let mut file = opts
            .open(&path)
            .map_err(|e| ledger_error(&path, format!("open: {e}")))?;
        let existing = file
            .metadata()
            .map_err(|e| ledger_error(&path, format!("stat: {e}")))?
            .len();
        // Appending to a ledger that already has content keeps its header.
        let write_header = existing == 0;
        if existing > 0 {
            terminate_last_row(&mut file, existing)
                .map_err(|e| ledger_error(&path, format!("repair last row: {e}")))?;
        }
        debug!(ledger = %path.display(), %mode, write_header, "Opened ledger");
        Ledger::from_writer(file, fields, write_header, path)
    }
}

impl<W: Write> Ledger<W> {
    /// Wrap any writer. `label` names the ledger in error messages.
    pub fn from_writer(
        inner: W,
        fields: &[String],
        write_header: bool,
        label: impl Into<PathBuf>,
    ) -> Result<Self> {
        let path = label.into();
        if fields.is_empty() {
            return Err(SelectError::NoLedgerFields.into());
        }
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        let mut ledger = Self {
            writer,
            width: fields.len(),
            rows: 0,
            path,
        };
        if write_header {
            ledger
                .writer
                .write_record(fields)
                .map_err(|e| ledger_error(&ledger.path, format!("write header: {e}")))?;
            ledger.flush()?;
        }
        Ok(ledger)
    }

    /// Append one row and flush it.
    pub fn append(&mut self, record: &SelectionRecord<'_>) -> Result<()> {
        self.writer
            .write_record(record.cells(self.width))
            .map_err(|e| {
                ledger_error(&self.path, format!("write row '{}': {e}", record.filename))
            })?;
        self.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written by this handle (the header is not counted).
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        let path = self.path;
        self.writer
            .into_inner()
            .map_err(|e| ledger_error(&path, format!("flush: {}", e.error())))
            .context("close ledger")
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| ledger_error(&self.path, format!("flush: {e}")))
    }
}

/// Make sure an existing ledger ends with a newline so the next row starts on
/// its own line. A file left mid-row by a crash keeps the partial row as is.
fn terminate_last_row(file: &mut File, len: u64) -> std::io::Result<()> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        // Append mode: the write lands at the end whatever the cursor.
        file.write_all(b"\n")?;
        file.flush()?;
        warn!(len, "Ledger did not end with a newline; terminated its last row");
    }
    Ok(())
}

fn ledger_error(path: &Path, context: String) -> anyhow::Error {
    SelectError::Ledger {
        path: path.to_path_buf(),
        context,
    }
    .into()
}
