use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while loading the dataset or the category mapping.
///
/// Row-level defects never produce one of these; they are repaired or
/// dropped by the cleaner.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// An input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tabular file is not valid CSV (bad record length, invalid UTF-8).
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The tabular file lacks one of the required columns.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// The category mapping is not the expected JSON document.
    #[error("Failed to parse category file {path}: {source}")]
    CategoryJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A category id in the mapping file is not an integer.
    #[error("Invalid category id '{id}' in {path}")]
    InvalidCategoryId { path: PathBuf, id: String },
}

/// All errors produced by the trending dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Loading the input files failed.
    #[error(transparent)]
    Load(#[from] DataLoadError),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DataLoadError::FileRead {
            path: PathBuf::from("data/USvideos.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("data/USvideos.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DataLoadError::MissingColumn {
            path: PathBuf::from("videos.csv"),
            column: "views".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required column 'views' in videos.csv"
        );
    }

    #[test]
    fn test_error_display_invalid_category_id() {
        let err = DataLoadError::InvalidCategoryId {
            path: PathBuf::from("cats.json"),
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid category id 'abc' in cats.json");
    }

    #[test]
    fn test_error_display_category_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = DataLoadError::CategoryJson {
            path: PathBuf::from("cats.json"),
            source: json_err,
        };
        assert!(err
            .to_string()
            .starts_with("Failed to parse category file cats.json"));
    }

    #[test]
    fn test_dashboard_error_from_load_is_transparent() {
        let load = DataLoadError::MissingColumn {
            path: PathBuf::from("v.csv"),
            column: "likes".to_string(),
        };
        let expected = load.to_string();
        let err: DashboardError = load.into();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("bad weekday".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad weekday");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
