use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read taxonomy file {path}: {source}")]
    TaxonomyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file: {0}")]
    TaxonomyFileParse(#[from] serde_yaml::Error),

    #[error("unknown feature category: {0}")]
    UnknownCategory(String),

    #[error("taxonomy validation failed: {0}")]
    Validation(String),
}
