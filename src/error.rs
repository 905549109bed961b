//! Error handling for the job recommender

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("No column found for field '{field}' in {category} dataset")]
    MissingColumn { field: String, category: String },

    #[error("Malformed value in column '{column}': {value:?}")]
    MalformedValue { column: String, value: String },

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("No usable rows across {sources} dataset source(s)")]
    NoUsableRows { sources: usize },
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

impl RecommenderError {
    /// Errors that degrade a field or row instead of failing a batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RecommenderError::MissingColumn { .. }
                | RecommenderError::MalformedValue { .. }
                | RecommenderError::MalformedRow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let missing = RecommenderError::MissingColumn {
            field: "salary".to_string(),
            category: "market".to_string(),
        };
        assert!(missing.is_recoverable());
        assert!(!RecommenderError::NoUsableRows { sources: 3 }.is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = RecommenderError::MalformedValue {
            column: "salary_lpa".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed value in column 'salary_lpa': \"n/a\"");
    }
}
