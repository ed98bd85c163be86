use serde::{Deserialize, Serialize};

// -- Queries --

#[derive(Debug, Deserialize)]
pub struct RandomQuotesQuery {
    pub n: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteByIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// -- Responses --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuoteResponse {
    pub message: String,
    pub id: String,
    pub permalink: String,
}

/// Plain `{ "message": ... }` body used for errors and acknowledgements.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
