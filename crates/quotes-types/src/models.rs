use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of a 24-bit RGB author colour.
pub const MAX_COLOUR: u32 = 0xFF_FFFF;

/// A persisted set of chat messages, addressed by a short random ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub created_timestamp: i64,
    pub messages: Vec<Message>,
}

/// One chat line within a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub author: Author,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    pub avatar_url: String,
    pub colour: u32,
}

/// Credential record checked before writes and deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
    pub active: bool,
}
