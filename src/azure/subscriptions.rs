//! `subscriptions/{id}` lookups.

use super::{ArmConnection, SubscriptionsApi};
use crate::error::ResolverError;
use crate::models::SubscriptionDetails;
use async_trait::async_trait;
use std::sync::Arc;

const API_VERSION: &str = "2022-12-01";

pub struct SubscriptionsClient {
    connection: Arc<ArmConnection>,
}

impl SubscriptionsClient {
    pub fn new(connection: Arc<ArmConnection>) -> Self {
        SubscriptionsClient { connection }
    }
}

#[async_trait]
impl SubscriptionsApi for SubscriptionsClient {
    async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionDetails, ResolverError> {
        let url = self
            .connection
            .url(&["subscriptions", subscription_id], API_VERSION)?;
        self.connection
            .get_json("get subscription", url.as_str())
            .await
    }
}
