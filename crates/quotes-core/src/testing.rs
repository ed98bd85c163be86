//! In-memory store doubles shared by the unit tests.

use std::sync::Mutex;

use quotes_types::models::{Author, Message, Quote};

use crate::store::{FieldPredicate, QuoteStore, StoreError};

pub fn message(content: &str, author_id: &str, username: &str) -> Message {
    Message {
        content: content.to_string(),
        author: Author {
            id: author_id.to_string(),
            username: username.to_string(),
            avatar_url: "http://x".to_string(),
            colour: 255,
        },
        timestamp: 1000,
    }
}

pub fn quote(id: &str, created_timestamp: i64, messages: Vec<Message>) -> Quote {
    Quote {
        id: id.to_string(),
        created_timestamp,
        messages,
    }
}

#[derive(Default)]
pub struct VecStore {
    pub quotes: Mutex<Vec<Quote>>,
    pub tokens: Vec<(String, bool)>,
    /// Number of upcoming inserts to reject as duplicates.
    pub reject_inserts: Mutex<usize>,
    pub lookups: Mutex<usize>,
}

impl VecStore {
    pub fn with_quotes(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: Mutex::new(quotes),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.quotes.lock().unwrap().len()
    }
}

impl QuoteStore for VecStore {
    fn find_by_id(&self, id: &str) -> Result<Option<Quote>, StoreError> {
        *self.lookups.lock().unwrap() += 1;
        let quotes = self.quotes.lock().unwrap();
        Ok(quotes.iter().find(|q| q.id.eq_ignore_ascii_case(id)).cloned())
    }

    fn find_random(&self, n: usize) -> Result<Vec<Quote>, StoreError> {
        Ok(self.quotes.lock().unwrap().iter().take(n).cloned().collect())
    }

    fn find_matching(&self, predicate: &FieldPredicate) -> Result<Vec<Quote>, StoreError> {
        let quotes = self.quotes.lock().unwrap();
        Ok(quotes.iter().filter(|q| predicate.matches_quote(q)).cloned().collect())
    }

    fn insert(&self, quote: &Quote) -> Result<(), StoreError> {
        let mut reject = self.reject_inserts.lock().unwrap();
        if *reject > 0 {
            *reject -= 1;
            return Err(StoreError::DuplicateKey(quote.id.clone()));
        }
        self.quotes.lock().unwrap().push(quote.clone());
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError> {
        let mut quotes = self.quotes.lock().unwrap();
        let before = quotes.len();
        quotes.retain(|q| q.id != id);
        Ok(before - quotes.len())
    }

    fn find_active_token(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self.tokens.iter().any(|(t, active)| t == token && *active))
    }
}

/// Claims every id already exists.
pub struct FullStore;

impl QuoteStore for FullStore {
    fn find_by_id(&self, id: &str) -> Result<Option<Quote>, StoreError> {
        Ok(Some(quote(id, 0, vec![])))
    }

    fn find_random(&self, _n: usize) -> Result<Vec<Quote>, StoreError> {
        Ok(vec![])
    }

    fn find_matching(&self, _predicate: &FieldPredicate) -> Result<Vec<Quote>, StoreError> {
        Ok(vec![])
    }

    fn insert(&self, quote: &Quote) -> Result<(), StoreError> {
        Err(StoreError::DuplicateKey(quote.id.clone()))
    }

    fn delete_by_id(&self, _id: &str) -> Result<usize, StoreError> {
        Ok(0)
    }

    fn find_active_token(&self, _token: &str) -> Result<bool, StoreError> {
        Ok(false)
    }
}
