//! Domain model types (pure).
//!
//! All types in this module are pure data.

pub mod country;
pub mod error;
pub mod key_action;
pub mod query;

// Re-export for convenience
pub use country::{Country, CountryName, NOT_AVAILABLE, REGIONS};
pub use error::{AppError, FetchError, FETCH_FALLBACK_MESSAGE};
pub use key_action::KeyAction;
pub use query::{CountryQuery, Endpoint, PageRequest, PageResponse, PageTicket};
