//! Error types.
//!
//! - `DataError` is the library-level taxonomy returned by loaders and engines.
//! - `AppError` is the process-boundary error carrying an exit code.

use thiserror::Error;

/// Errors produced while loading or transforming series.
///
/// Only `Io`, `MissingColumn` and `UnknownResource` are meant to reach a user
/// as hard failures. `Parse` is recorded per row and `MissingAggregate` is
/// turned into an absent value by the callers that can tolerate it.
#[derive(Debug, Error)]
pub enum DataError {
    /// A row's year or value failed to parse.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The inflation dataset has no aggregate category.
    #[error("dataset has no `{category}` aggregate category")]
    MissingAggregate { category: String },

    /// Compounding across the span collapsed to a zero or negative factor.
    #[error("inflation between {from} and {to} compounds to a non-positive factor")]
    DegenerateFactor { from: i32, to: i32 },

    /// A declared column is not present in the resource header.
    #[error("resource `{resource}` is missing declared column `{column}`")]
    MissingColumn { resource: String, column: String },

    /// The catalog has no resource for the requested indicator.
    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    /// The upstream row source failed.
    #[error("failed to fetch resource `{resource}`: {message}")]
    Io { resource: String, message: String },
}

impl DataError {
    pub fn io(resource: &str, err: impl std::fmt::Display) -> Self {
        Self::Io {
            resource: resource.to_string(),
            message: err.to_string(),
        }
    }
}

/// Process-level error: a message plus the exit code `rw` terminates with.
#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let code = match &err {
            DataError::Parse { .. } | DataError::MissingColumn { .. } | DataError::UnknownResource(_) => 2,
            DataError::MissingAggregate { .. } | DataError::DegenerateFactor { .. } => 3,
            DataError::Io { .. } => 4,
        };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_maps_to_exit_codes() {
        let io: AppError = DataError::io("cpi", "connection refused").into();
        assert_eq!(io.exit_code(), 4);
        assert_eq!(io.to_string(), "failed to fetch resource `cpi`: connection refused");

        let col: AppError = DataError::MissingColumn {
            resource: "wages".to_string(),
            column: "geo".to_string(),
        }
        .into();
        assert_eq!(col.exit_code(), 2);
    }
}
