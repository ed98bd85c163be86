//! Database row types — these map directly to SQLite rows.
//! Messages are kept as one JSON document per quote.

use anyhow::{Context, Result};
use quotes_types::models::Quote;

pub struct QuoteRow {
    pub id: String,
    pub created_timestamp: i64,
    pub messages: String,
}

impl QuoteRow {
    pub fn from_quote(quote: &Quote) -> Result<Self> {
        Ok(Self {
            id: quote.id.clone(),
            created_timestamp: quote.created_timestamp,
            messages: serde_json::to_string(&quote.messages)?,
        })
    }

    pub fn into_quote(self) -> Result<Quote> {
        let messages = serde_json::from_str(&self.messages)
            .with_context(|| format!("Corrupt messages document on quote '{}'", self.id))?;
        Ok(Quote {
            id: self.id,
            created_timestamp: self.created_timestamp,
            messages,
        })
    }
}
