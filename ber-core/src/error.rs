use thiserror::Error;

/// Main error type for BER encoding operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BerError {
    /// `end_sequence` without a matching `start_sequence`, or
    /// finalization while sequences are still open
    #[error("Unbalanced sequence: {0}")]
    UnbalancedSequence(String),

    /// A primitive value cannot be represented
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Malformed dotted-decimal object identifier
    #[error("Invalid OID: {0}")]
    InvalidOid(String),

    /// The buffer could not grow to the requested size
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),
}

/// Result type alias for BER encoding operations
pub type BerResult<T> = Result<T, BerError>;
