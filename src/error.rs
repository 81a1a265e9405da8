use thiserror::Error;

/// Errors surfaced by the crate's parsing helpers.
///
/// Aggregation itself never fails: degenerate records contribute zero and
/// malformed period requests degrade to the all-time window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A month label did not match the `YYYY-MM` form.
    #[error("invalid month key: {0:?}")]
    InvalidMonthKey(String),
}
