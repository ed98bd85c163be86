//! Quote collection logic: payload validation, collision-checked ID
//! generation and multi-field search, all running against an injected
//! [`QuoteStore`].

pub mod error;
pub mod id;
pub mod search;
pub mod service;
pub mod store;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{QuoteError, Result};
pub use service::QuoteService;
pub use store::{FieldPredicate, QuoteStore, StoreError};
pub use validate::ValidationError;
