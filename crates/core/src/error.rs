//! Error types shared by every crate in the workspace

use thiserror::Error;

use crate::traits::ParamKind;

/// Result alias using the core [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while reading a parameter tree or querying derived tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mandatory key is not present in the tree
    #[error("Missing parameter: {key}")]
    MissingKey { key: String },

    /// A key is present but holds a value of a different shape
    #[error("Parameter '{key}' is not of type {expected}")]
    TypeMismatch { key: String, expected: ParamKind },

    /// A positional lookup fell outside the table
    #[error("Index {index} out of range for {table} (size {size})")]
    OutOfRange {
        table: &'static str,
        index: usize,
        size: usize,
    },

    /// A prescale row does not have one value per prescale set
    #[error("Prescale row for '{path}' has {found} values, expected {expected}")]
    PrescaleRowLength {
        path: String,
        expected: usize,
        found: usize,
    },

    /// An input tag string could not be split into its components
    #[error("Invalid input tag: '{0}'")]
    InvalidInputTag(String),
}

impl Error {
    /// Build a range violation for `table`
    pub fn out_of_range(table: &'static str, index: usize, size: usize) -> Self {
        Error::OutOfRange { table, index, size }
    }

    /// Whether this error reports a positional miss
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::out_of_range("trigger names", 4, 4);
        assert_eq!(
            err.to_string(),
            "Index 4 out of range for trigger names (size 4)"
        );
        assert!(err.is_out_of_range());

        let err = Error::TypeMismatch {
            key: "saveTags".to_string(),
            expected: ParamKind::Bool,
        };
        assert_eq!(err.to_string(), "Parameter 'saveTags' is not of type bool");
        assert!(!err.is_out_of_range());
    }
}
