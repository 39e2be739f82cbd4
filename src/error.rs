use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VotingError>;

/// Which uniqueness constraint a registration collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    ExternalId,
    Credential,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Email => write!(f, "email"),
            ConflictField::ExternalId => write!(f, "external id"),
            ConflictField::Credential => write!(f, "credential"),
        }
    }
}

#[derive(Error, Debug)]
pub enum VotingError {
    #[error("{0} is already registered")]
    Conflict(ConflictField),
    #[error("invalid voter credential")]
    InvalidCredential,
    #[error("this credential has already been used to vote")]
    AlreadyVoted,
    #[error("unknown candidate: {0}")]
    InvalidCandidate(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl VotingError {
    /// True for the errors a voter can correct by retrying with different
    /// input, as opposed to infrastructure failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            VotingError::Conflict(_)
                | VotingError::InvalidCredential
                | VotingError::AlreadyVoted
                | VotingError::InvalidCandidate(_)
        )
    }
}
