use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// A single CSV file or a directory of CSV chunks.
    pub data_path: PathBuf,
    /// Optional YAML override for the built-in taxonomy tables.
    pub taxonomy_path: Option<PathBuf>,
    pub export_dir: PathBuf,
    /// Mentions printed per category before `--all` is required.
    pub mention_display_limit: usize,
}
