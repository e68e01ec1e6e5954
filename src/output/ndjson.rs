//! Newline-delimited JSON scratch files
//!
//! The export is staged in a temporary file before upload. The file is
//! removed when the [`ScratchFile`] is dropped unless it is kept explicitly.

use crate::error::{Result, ResultExt};
use crate::types::BuildRecord;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write one JSON object per line, returning the number of lines
pub fn write_ndjson<W: Write>(writer: W, records: &[BuildRecord]) -> Result<usize> {
    let mut writer = BufWriter::new(writer);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Temporary NDJSON file named after its destination object
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
    dir: PathBuf,
    file_name: String,
}

impl ScratchFile {
    /// Create an empty scratch file in `dir`
    pub fn create(dir: &Path, file_name: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create scratch dir {}", dir.display()))?;
        let file = tempfile::Builder::new()
            .prefix(&format!("{file_name}."))
            .suffix(".tmp")
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create scratch file in {}", dir.display()))?;

        Ok(Self {
            file,
            dir: dir.to_path_buf(),
            file_name: file_name.to_string(),
        })
    }

    /// Current on-disk path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write all records as NDJSON
    pub fn write_records(&mut self, records: &[BuildRecord]) -> Result<usize> {
        write_ndjson(self.file.as_file_mut(), records)
    }

    /// Keep the file on disk as `<dir>/<file_name>` instead of deleting it
    pub fn keep(self) -> Result<PathBuf> {
        let target = self.dir.join(&self.file_name);
        self.file.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}
