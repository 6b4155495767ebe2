//! Subscription resolution and caching.
//!
//! - [`cache`] - time-bounded results per management group
//! - [`subscriptions`] - [`SubscriptionResolver`], the orchestration

mod cache;
mod subscriptions;

// Re-export public types
pub use cache::{cache_key, CacheEntry, SubscriptionCache};
pub use subscriptions::{ResolverState, SubscriptionResolver};
