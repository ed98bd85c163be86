pub mod auth;
pub mod error;
pub mod middleware;
pub mod quotes;
pub mod router;

pub use auth::{AppState, AppStateInner};
pub use error::ApiError;
pub use router::{app, router};
