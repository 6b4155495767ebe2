//! Azure Resource Manager access.
//!
//! The resolver only sees the two capability traits below:
//! - [`ManagementGroupsApi`] - child groups and subscriptions of a management group
//! - [`SubscriptionsApi`] - subscription display metadata
//!
//! The concrete clients share one credential-backed [`ArmConnection`]:
//! - [`client`] - token acquisition, GET and `nextLink` paging
//! - [`management_groups`] - `Microsoft.Management` listings
//! - [`subscriptions`] - `subscriptions/{id}` lookups

mod client;
mod management_groups;
mod subscriptions;

use crate::config::AzureSettings;
use crate::error::ResolverError;
use crate::models::{GroupSubscriptionItem, ManagementGroupItem, SubscriptionDetails};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

// Re-export public types
pub use client::{arm_scope, arm_url, ArmConnection};
pub use management_groups::ManagementGroupsClient;
pub use subscriptions::SubscriptionsClient;

/// Lazily paged listing, drained in emission order.
pub type ArmStream<'a, T> = BoxStream<'a, Result<T, ResolverError>>;

/// Management group client capability.
pub trait ManagementGroupsApi: Send + Sync {
    /// Direct (one level) children of `group_id`. Items may include subscriptions.
    fn list_child_groups<'a>(&'a self, group_id: &'a str) -> ArmStream<'a, ManagementGroupItem>;

    /// Subscriptions registered directly under `group_id`.
    fn list_subscriptions_under_group<'a>(
        &'a self,
        group_id: &'a str,
    ) -> ArmStream<'a, GroupSubscriptionItem>;
}

/// Subscription client capability.
#[async_trait]
pub trait SubscriptionsApi: Send + Sync {
    async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionDetails, ResolverError>;
}

/// The pair of upstream clients the resolver owns.
#[derive(Clone)]
pub struct UpstreamClients {
    pub management_groups: Arc<dyn ManagementGroupsApi>,
    pub subscriptions: Arc<dyn SubscriptionsApi>,
}

impl UpstreamClients {
    pub fn new(
        management_groups: Arc<dyn ManagementGroupsApi>,
        subscriptions: Arc<dyn SubscriptionsApi>,
    ) -> Self {
        UpstreamClients {
            management_groups,
            subscriptions,
        }
    }

    /// Build the client-secret credential and both ARM clients.
    pub fn connect(settings: &AzureSettings) -> Result<Self, ResolverError> {
        let connection = Arc::new(ArmConnection::connect(settings)?);
        Ok(UpstreamClients::new(
            Arc::new(ManagementGroupsClient::new(connection.clone())),
            Arc::new(SubscriptionsClient::new(connection)),
        ))
    }
}
