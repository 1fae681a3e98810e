//! Core business logic abstractions

pub mod amount;
pub mod cache;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod exchange;
pub mod fetcher;
pub mod log;
pub mod provider;
pub mod rate_store;
pub mod snapshot;

// Re-export main types for cleaner imports
pub use amount::Amount;
pub use currency::{Currency, RateMap};
pub use exchange::Exchange;
pub use fetcher::{RateFetcher, RefreshError};
pub use provider::RateProvider;
pub use rate_store::RateStore;
pub use snapshot::{RateSnapshot, RateSource};
