use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{path}: no {logical} column (expected one of: {candidates})")]
    MissingColumn {
        path: String,
        logical: &'static str,
        candidates: String,
    },

    #[error("no CSV files found in {dir}")]
    NoCsvFiles { dir: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IngestError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}
