//! Resolve the Azure subscriptions reachable under a management group.
//!
//! [`SubscriptionResolver`] lists the direct child management groups of a root
//! (or uses the root itself), collects the subscriptions registered under them,
//! fetches display names and caches the result per management group.

pub mod azure;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod output;
pub mod resolver;

pub use error::ResolverError;
pub use models::{SubscriptionOption, SubscriptionRecord};
pub use resolver::SubscriptionResolver;

use config::ConfigSource;

/// Build a resolver from configuration and return the root's subscription options.
pub async fn get_subscription_options(config: &dyn ConfigSource) -> Vec<SubscriptionOption> {
    SubscriptionResolver::new(config).resolve_as_options().await
}
