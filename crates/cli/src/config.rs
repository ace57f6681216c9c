use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const CATALOG_FILE_NAME: &str = "exercise_db.csv";

/// Locations resolved from the environment and the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub catalog: PathBuf,
}

impl Config {
    /// Unset values fall back to `./data` and `<data dir>/exercise_db.csv`.
    pub fn new(data_dir: Option<PathBuf>, catalog: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let catalog = catalog.unwrap_or_else(|| data_dir.join(CATALOG_FILE_NAME));
        Self { data_dir, catalog }
    }
}
