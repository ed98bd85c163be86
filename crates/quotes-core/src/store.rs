use quotes_types::models::{Message, Quote};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert rejected by the store's uniqueness constraint on the quote id.
    #[error("Quote id already taken: {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A single-field match against the messages of a quote.
///
/// Needles are expected to be lower-cased already; stores compare against
/// the lower-cased field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPredicate {
    /// Substring of the message content.
    ContentContains(String),
    /// Whole author id.
    AuthorIdEquals(String),
    /// Substring of the author username.
    UsernameContains(String),
}

impl FieldPredicate {
    pub fn needle(&self) -> &str {
        match self {
            Self::ContentContains(n) | Self::AuthorIdEquals(n) | Self::UsernameContains(n) => n,
        }
    }

    pub fn matches(&self, message: &Message) -> bool {
        match self {
            Self::ContentContains(n) => message.content.to_lowercase().contains(n.as_str()),
            Self::AuthorIdEquals(n) => message.author.id.to_lowercase() == *n,
            Self::UsernameContains(n) => message.author.username.to_lowercase().contains(n.as_str()),
        }
    }

    /// A quote matches when any one of its messages does.
    pub fn matches_quote(&self, quote: &Quote) -> bool {
        quote.messages.iter().any(|m| self.matches(m))
    }
}

/// Persistence contract for quotes and auth tokens.
///
/// Implementations own their concurrency control; every method is a single
/// blocking round trip and callers on an async runtime are expected to run
/// them on a blocking thread.
pub trait QuoteStore: Send + Sync {
    /// Case-insensitive lookup by id.
    fn find_by_id(&self, id: &str) -> Result<Option<Quote>, StoreError>;

    /// Up to `n` quotes in no particular order.
    fn find_random(&self, n: usize) -> Result<Vec<Quote>, StoreError>;

    fn find_matching(&self, predicate: &FieldPredicate) -> Result<Vec<Quote>, StoreError>;

    /// Must fail with [`StoreError::DuplicateKey`] when the id is taken.
    fn insert(&self, quote: &Quote) -> Result<(), StoreError>;

    /// Returns the number of removed records.
    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError>;

    /// True iff an active token record equals `token` exactly.
    fn find_active_token(&self, token: &str) -> Result<bool, StoreError>;
}
