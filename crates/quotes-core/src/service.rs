use std::sync::Arc;

use quotes_types::models::{Message, Quote};
use rand::Rng;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{QuoteError, Result};
use crate::id::generate_unique_id;
use crate::search;
use crate::store::{QuoteStore, StoreError};
use crate::validate::parse_messages;

/// Inserts attempted before a creation is abandoned. Each attempt draws a
/// fresh id, so this only trips under sustained insert races.
pub const MAX_INSERT_ATTEMPTS: usize = 5;

/// Entry point for every quote operation. Holds the injected store handle.
#[derive(Clone)]
pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
}

impl QuoteService {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    /// Up to `n` quotes; an empty collection is [`QuoteError::NoResults`].
    pub fn random(&self, n: usize) -> Result<Vec<Quote>> {
        let quotes = self.store.find_random(n)?;
        if quotes.is_empty() {
            return Err(QuoteError::NoResults);
        }
        Ok(quotes)
    }

    pub fn get(&self, id: &str) -> Result<Quote> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| QuoteError::NotFound(id.to_string()))
    }

    pub fn search(&self, query: &str) -> Result<Vec<Quote>> {
        search::search(self.store.as_ref(), query)
    }

    /// Validates a raw payload and stores it as a new quote stamped now.
    pub fn add(&self, payload: &Value) -> Result<Quote> {
        let messages = parse_messages(payload)?;
        self.create(messages, chrono::Utc::now().timestamp(), &mut rand::rng())
    }

    pub fn create<R: Rng + ?Sized>(
        &self,
        messages: Vec<Message>,
        created_timestamp: i64,
        rng: &mut R,
    ) -> Result<Quote> {
        let mut quote = Quote {
            id: String::new(),
            created_timestamp,
            messages,
        };

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            quote.id = generate_unique_id(self.store.as_ref(), rng)?;
            match self.store.insert(&quote) {
                Ok(()) => {
                    info!("Created quote {} ({} messages)", quote.id, quote.messages.len());
                    return Ok(quote);
                }
                Err(StoreError::DuplicateKey(id)) => {
                    warn!("Quote id {} taken at insert (attempt {})", id, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(QuoteError::IdGenerationExhausted {
            attempts: MAX_INSERT_ATTEMPTS,
        })
    }

    /// Hard delete. The id lookup is case-insensitive like [`Self::get`].
    pub fn delete(&self, id: &str) -> Result<()> {
        let quote = self.get(id)?;
        match self.store.delete_by_id(&quote.id)? {
            0 => Err(QuoteError::NotFound(id.to_string())),
            removed => {
                info!("Deleted quote {} ({} record(s))", quote.id, removed);
                Ok(())
            }
        }
    }

    pub fn is_authorized(&self, token: &str) -> Result<bool> {
        if token.is_empty() {
            return Ok(false);
        }
        Ok(self.store.find_active_token(token)?)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    use super::*;
    use crate::testing::{FullStore, VecStore, message, quote};
    use crate::validate::ValidationError;

    fn service(store: VecStore) -> (QuoteService, Arc<VecStore>) {
        let store = Arc::new(store);
        (QuoteService::new(store.clone()), store)
    }

    #[test]
    fn add_then_search_get_and_delete() {
        let (quotes, store) = service(VecStore::default());
        let payload = json!([{
            "content": "Hello world",
            "timestamp": 1000,
            "author": { "id": "a1", "username": "Alice", "avatar_url": "http://x", "colour": 255 }
        }]);

        let created = quotes.add(&payload).unwrap();
        assert_eq!(created.id.len(), 7);
        assert_eq!(store.len(), 1);

        let found = quotes.search("hello").unwrap();
        assert_eq!(found, vec![created.clone()]);
        assert!(matches!(quotes.search("zzz"), Err(QuoteError::NoResults)));

        assert_eq!(quotes.get(&created.id).unwrap(), created);
        assert_eq!(quotes.get(&created.id.to_uppercase()).unwrap(), created);

        quotes.delete(&created.id).unwrap();
        assert!(matches!(quotes.get(&created.id), Err(QuoteError::NotFound(_))));
        assert!(matches!(quotes.delete(&created.id), Err(QuoteError::NotFound(_))));
    }

    #[test]
    fn invalid_payload_is_not_stored() {
        let (quotes, store) = service(VecStore::default());
        let err = quotes.add(&json!([{ "content": "x" }])).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Invalid(ValidationError::MissingField("timestamp"))
        ));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn duplicate_key_on_insert_is_retried() {
        let (quotes, store) = service(VecStore::default());
        *store.reject_inserts.lock().unwrap() = 2;

        let mut rng = StdRng::seed_from_u64(9);
        let created = quotes
            .create(vec![message("hi", "a", "b")], 5, &mut rng)
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(created.created_timestamp, 5);
    }

    #[test]
    fn persistent_insert_conflicts_are_exhaustion() {
        let (quotes, store) = service(VecStore::default());
        *store.reject_inserts.lock().unwrap() = MAX_INSERT_ATTEMPTS;

        let mut rng = StdRng::seed_from_u64(9);
        let err = quotes
            .create(vec![message("hi", "a", "b")], 5, &mut rng)
            .unwrap_err();
        assert!(matches!(err, QuoteError::IdGenerationExhausted { .. }));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn full_id_space_is_exhaustion() {
        let quotes = QuoteService::new(Arc::new(FullStore));
        let mut rng = StdRng::seed_from_u64(9);
        let err = quotes.create(vec![], 0, &mut rng).unwrap_err();
        assert!(matches!(err, QuoteError::IdGenerationExhausted { .. }));
    }

    #[test]
    fn random_on_empty_store_is_no_results() {
        let (quotes, _) = service(VecStore::default());
        assert!(matches!(quotes.random(3), Err(QuoteError::NoResults)));

        let (quotes, _) = service(VecStore::with_quotes(vec![
            quote("aaaaaaa", 1, vec![]),
            quote("bbbbbbb", 2, vec![]),
        ]));
        assert_eq!(quotes.random(1).unwrap().len(), 1);
        assert_eq!(quotes.random(10).unwrap().len(), 2);
    }

    #[test]
    fn only_active_tokens_authorize() {
        let store = VecStore {
            tokens: vec![("live".into(), true), ("revoked".into(), false)],
            ..Default::default()
        };
        let (quotes, _) = service(store);

        assert!(quotes.is_authorized("live").unwrap());
        assert!(!quotes.is_authorized("revoked").unwrap());
        assert!(!quotes.is_authorized("LIVE").unwrap());
        assert!(!quotes.is_authorized("").unwrap());
    }
}
