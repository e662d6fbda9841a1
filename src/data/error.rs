use thiserror::Error;

/// Failures of the data layer that callers may want to match on.
///
/// Loader I/O and parser errors stay `anyhow` with context; these variants
/// travel inside the `anyhow::Error` and can be recovered with
/// `err.downcast_ref::<DataError>()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A dataset row is missing a field or carries an invalid value.
    #[error("row {row}: field '{field}' {reason}")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A season was selected that does not occur in the dataset.
    #[error("season '{0}' does not occur in the dataset")]
    UnknownSeason(String),
}

impl DataError {
    pub(crate) fn malformed(row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        DataError::MalformedRecord {
            row,
            field,
            reason: reason.into(),
        }
    }
}
