//! Reading advertisement exports from a single CSV or a chunk directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use evads_core::{AdvertisementRecord, MarketConfig};
use serde::Deserialize;

use crate::columns::ColumnLayout;
use crate::error::IngestError;

/// Name of the manifest written next to split exports.
pub const CHUNK_METADATA_FILE: &str = "chunks_metadata.json";

#[derive(Debug, Deserialize)]
struct ChunkMetadata {
    chunk_files: Vec<String>,
}

/// Records read from one load, plus bookkeeping for the log line.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<AdvertisementRecord>,
    pub files_read: usize,
    pub rows_skipped: usize,
}

impl LoadedRecords {
    fn extend(&mut self, other: LoadedRecords) {
        self.records.extend(other.records);
        self.files_read += other.files_read;
        self.rows_skipped += other.rows_skipped;
    }
}

/// Loads records from `path`, which is either a CSV file or a directory of
/// CSV chunks.
///
/// For a directory, `chunks_metadata.json` decides which chunks load and in
/// what order; listed chunks that do not exist are skipped with a warning.
/// Without a readable manifest every `*.csv` file loads in file-name order.
///
/// # Errors
///
/// Returns [`IngestError::NoCsvFiles`] if a directory holds no loadable
/// chunk, [`IngestError::MissingColumn`] if a file lacks an annotation
/// column, and [`IngestError::Io`] / [`IngestError::Csv`] on read failures.
pub fn load_records(path: &Path, markets: &[MarketConfig]) -> Result<LoadedRecords, IngestError> {
    let metadata = fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    let loaded = if metadata.is_dir() {
        let files = chunk_files(path)?;
        let mut loaded = LoadedRecords::default();
        for file in &files {
            let chunk = load_csv_file(file, markets)?;
            tracing::debug!(
                file = %file.display(),
                records = chunk.records.len(),
                "loaded chunk"
            );
            loaded.extend(chunk);
        }
        loaded
    } else {
        load_csv_file(path, markets)?
    };

    tracing::info!(
        path = %path.display(),
        files = loaded.files_read,
        records = loaded.records.len(),
        skipped = loaded.rows_skipped,
        "advertisement records loaded"
    );
    Ok(loaded)
}

/// Chunk files to load from `dir`, in load order.
///
/// # Errors
///
/// Returns [`IngestError::NoCsvFiles`] if nothing loadable is found, or
/// [`IngestError::Io`] if the directory cannot be listed.
pub fn chunk_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let files = match read_chunk_metadata(dir) {
        Some(metadata) => metadata
            .chunk_files
            .iter()
            .map(|name| dir.join(name))
            .filter(|file| {
                let exists = file.is_file();
                if !exists {
                    tracing::warn!(file = %file.display(), "listed chunk not found, skipping");
                }
                exists
            })
            .collect(),
        None => csv_files_sorted(dir)?,
    };

    if files.is_empty() {
        return Err(IngestError::NoCsvFiles {
            dir: dir.display().to_string(),
        });
    }
    Ok(files)
}

fn read_chunk_metadata(dir: &Path) -> Option<ChunkMetadata> {
    let path = dir.join(CHUNK_METADATA_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "chunk manifest unreadable");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "chunk manifest malformed");
            None
        }
    }
}

fn csv_files_sorted(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|e| IngestError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError::io(dir, e))?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_csv_file(path: &Path, markets: &[MarketConfig]) -> Result<LoadedRecords, IngestError> {
    let file = fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
    read_csv(file, path, markets)
}

/// Reads one CSV stream. `source` only labels errors and log lines.
///
/// Rows that fail to decode are skipped with a warning and counted.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] if the header has no annotation
/// column, or [`IngestError::Csv`] if the header itself cannot be read.
pub fn read_csv<R: io::Read>(
    reader: R,
    source: &Path,
    markets: &[MarketConfig],
) -> Result<LoadedRecords, IngestError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(source, e))?
        .clone();
    let layout = ColumnLayout::from_headers(&headers, source)?;

    let mut loaded = LoadedRecords {
        files_read: 1,
        ..LoadedRecords::default()
    };
    for (index, row) in reader.records().enumerate() {
        match row {
            Ok(row) => loaded.records.push(layout.to_record(&row, markets)),
            Err(e) => {
                loaded.rows_skipped += 1;
                tracing::warn!(
                    file = %source.display(),
                    row = index + 1,
                    error = %e,
                    "skipping undecodable row"
                );
            }
        }
    }
    Ok(loaded)
}
