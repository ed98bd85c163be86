use crate::store::StoreError;
use crate::validate::ValidationError;

pub type Result<T> = std::result::Result<T, QuoteError>;

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Quote not found: {0}")]
    NotFound(String),

    #[error("No quotes found")]
    NoResults,

    #[error("Invalid quote payload: {0}")]
    Invalid(#[from] ValidationError),

    /// The id space could not produce a free id within the retry cap. Points
    /// at the store, never at the caller.
    #[error("Could not generate a unique quote id after {attempts} attempts")]
    IdGenerationExhausted { attempts: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
