//! `Microsoft.Management` listings.

use super::{ArmConnection, ArmStream, ManagementGroupsApi};
use crate::models::{GroupSubscriptionItem, ManagementGroupItem};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

const API_VERSION: &str = "2020-05-01";

pub struct ManagementGroupsClient {
    connection: Arc<ArmConnection>,
}

impl ManagementGroupsClient {
    pub fn new(connection: Arc<ArmConnection>) -> Self {
        ManagementGroupsClient { connection }
    }

    fn group_listing<'a, T>(
        &'a self,
        operation: &'static str,
        group_id: &str,
        listing: &str,
    ) -> ArmStream<'a, T>
    where
        T: serde::de::DeserializeOwned + Send + 'a,
    {
        let segments = [
            "providers",
            "Microsoft.Management",
            "managementGroups",
            group_id,
            listing,
        ];
        match self.connection.url(&segments, API_VERSION) {
            Ok(url) => self.connection.paged(operation, url),
            Err(e) => stream::once(async move { Err(e) }).boxed(),
        }
    }
}

impl ManagementGroupsApi for ManagementGroupsClient {
    /// Descendants filtered to one level: items whose parent is `group_id`.
    fn list_child_groups<'a>(&'a self, group_id: &'a str) -> ArmStream<'a, ManagementGroupItem> {
        self.group_listing::<ManagementGroupItem>(
            "list management group descendants",
            group_id,
            "descendants",
        )
        .try_filter(move |item| futures::future::ready(item.is_child_of(group_id)))
        .boxed()
    }

    fn list_subscriptions_under_group<'a>(
        &'a self,
        group_id: &'a str,
    ) -> ArmStream<'a, GroupSubscriptionItem> {
        self.group_listing(
            "list subscriptions under management group",
            group_id,
            "subscriptions",
        )
    }
}
