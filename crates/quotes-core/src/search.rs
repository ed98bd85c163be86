use std::collections::HashMap;

use quotes_types::models::Quote;

use crate::error::{QuoteError, Result};
use crate::store::{FieldPredicate, QuoteStore};

/// Case-insensitive search over message content, author id and username.
///
/// Hits from the three fields are merged by quote id and returned newest
/// first; equal timestamps are ordered by id so repeated searches return the
/// same sequence. A blank query matches nothing.
pub fn search(store: &dyn QuoteStore, query: &str) -> Result<Vec<Quote>> {
    if query.trim().is_empty() {
        return Err(QuoteError::NoResults);
    }

    let needle = query.to_lowercase();
    let predicates = [
        FieldPredicate::ContentContains(needle.clone()),
        FieldPredicate::AuthorIdEquals(needle.clone()),
        FieldPredicate::UsernameContains(needle),
    ];

    let mut merged: HashMap<String, Quote> = HashMap::new();
    for predicate in &predicates {
        for quote in store.find_matching(predicate)? {
            merged.entry(quote.id.clone()).or_insert(quote);
        }
    }

    if merged.is_empty() {
        return Err(QuoteError::NoResults);
    }

    let mut quotes: Vec<Quote> = merged.into_values().collect();
    quotes.sort_by(|a, b| {
        b.created_timestamp
            .cmp(&a.created_timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{VecStore, message, quote};

    fn sample_store() -> VecStore {
        VecStore::with_quotes(vec![
            quote("aaaaaa1", 100, vec![message("Hello world", "a1", "Alice")]),
            quote(
                "bbbbbb2",
                300,
                vec![
                    message("hello again", "b2", "Bob"),
                    message("HELLO from alice", "a1", "Alice"),
                ],
            ),
            quote("cccccc3", 200, vec![message("nothing here", "c3", "Carol")]),
            quote("dddddd4", 300, vec![message("say hello", "d4", "Dave")]),
        ])
    }

    fn ids(quotes: &[Quote]) -> Vec<&str> {
        quotes.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn ranks_newest_first_with_id_tiebreak() {
        let store = sample_store();
        let found = search(&store, "HeLLo").unwrap();
        assert_eq!(ids(&found), vec!["bbbbbb2", "dddddd4", "aaaaaa1"]);
    }

    #[test]
    fn quote_matching_several_fields_appears_once() {
        let store = sample_store();
        // bbbbbb2 has two messages by a1.
        let found = search(&store, "a1").unwrap();
        assert_eq!(ids(&found), vec!["bbbbbb2", "aaaaaa1"]);

        // bbbbbb2 hits on both content and username.
        let found = search(&store, "alice").unwrap();
        assert_eq!(ids(&found), vec!["bbbbbb2", "aaaaaa1"]);
    }

    #[test]
    fn author_id_is_matched_exactly() {
        let store = VecStore::with_quotes(vec![quote(
            "eeeeee5",
            1,
            vec![message("x", "user42", "Zed")],
        )]);
        assert!(matches!(search(&store, "user4"), Err(QuoteError::NoResults)));
        assert_eq!(ids(&search(&store, "USER42").unwrap()), vec!["eeeeee5"]);
    }

    #[test]
    fn no_match_is_no_results() {
        let store = sample_store();
        assert!(matches!(search(&store, "zzz"), Err(QuoteError::NoResults)));
    }

    #[test]
    fn blank_query_matches_nothing() {
        let store = sample_store();
        assert!(matches!(search(&store, ""), Err(QuoteError::NoResults)));
        assert!(matches!(search(&store, "   "), Err(QuoteError::NoResults)));
    }

    #[test]
    fn repeated_search_returns_same_sequence() {
        let store = sample_store();
        let first = search(&store, "e").unwrap();
        for _ in 0..5 {
            assert_eq!(search(&store, "e").unwrap(), first);
        }
    }
}
