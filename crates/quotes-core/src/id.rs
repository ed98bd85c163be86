use rand::Rng;
use tracing::warn;

use crate::error::{QuoteError, Result};
use crate::store::QuoteStore;

pub const ID_LENGTH: usize = 7;
pub const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Store lookups allowed before giving up on finding a free id.
pub const MAX_ID_ATTEMPTS: usize = 100;

pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Samples ids until one is absent from the store.
///
/// The check is not atomic with the later insert; the store's uniqueness
/// constraint stays the authority and the caller resamples on conflict.
pub fn generate_unique_id<R: Rng + ?Sized>(store: &dyn QuoteStore, rng: &mut R) -> Result<String> {
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let candidate = random_id(rng);
        if store.find_by_id(&candidate)?.is_none() {
            return Ok(candidate);
        }
        warn!("Quote id collision on {} (attempt {})", candidate, attempt);
    }

    Err(QuoteError::IdGenerationExhausted {
        attempts: MAX_ID_ATTEMPTS,
    })
}
