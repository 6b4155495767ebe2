//! Resolve the subscriptions reachable under a management group.
//!
//! Resolution never fails from the caller's side: configuration problems make
//! the resolver permanently unavailable (empty results), and upstream failures
//! degrade to partial, stale or empty results plus a log line.

use super::cache::{cache_key, CacheEntry, SubscriptionCache};
use crate::azure::{ManagementGroupsApi, UpstreamClients};
use crate::config::{self, AzureSettings, ConfigSource};
use crate::error::ResolverError;
use crate::models::{SubscriptionOption, SubscriptionRecord};
use futures::TryStreamExt;
use std::time::{Duration, Instant};

/// Set once at construction, never changed afterwards.
pub enum ResolverState {
    Unavailable,
    Available {
        root_group_id: String,
        clients: UpstreamClients,
    },
}

pub struct SubscriptionResolver {
    state: ResolverState,
    cache: SubscriptionCache,
}

impl SubscriptionResolver {
    /// Build from configuration, connecting to Azure Resource Manager.
    pub fn new(config: &dyn ConfigSource) -> Self {
        Self::from_config_with(config, UpstreamClients::connect)
    }

    /// Build from configuration with a custom client factory.
    ///
    /// Missing settings and factory errors are logged and leave the resolver
    /// [`ResolverState::Unavailable`].
    pub fn from_config_with<F>(config: &dyn ConfigSource, build_clients: F) -> Self
    where
        F: FnOnce(&AzureSettings) -> Result<UpstreamClients, ResolverError>,
    {
        let cache = SubscriptionCache::new(config::cache_ttl(config));

        let settings = match AzureSettings::from_config(config) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Azure clients not initialized: {e}");
                return SubscriptionResolver {
                    state: ResolverState::Unavailable,
                    cache,
                };
            }
        };

        let state = match build_clients(&settings) {
            Ok(clients) => {
                log::info!(
                    "Azure ARM clients initialized for management group '{}'",
                    settings.management_group_id
                );
                ResolverState::Available {
                    root_group_id: settings.management_group_id,
                    clients,
                }
            }
            Err(e) => {
                log::error!("Error initializing Azure ARM clients: {e}");
                ResolverState::Unavailable
            }
        };
        SubscriptionResolver { state, cache }
    }

    /// Build around already constructed clients.
    pub fn with_clients(
        root_group_id: impl Into<String>,
        clients: UpstreamClients,
        ttl: Duration,
    ) -> Self {
        SubscriptionResolver {
            state: ResolverState::Available {
                root_group_id: root_group_id.into(),
                clients,
            },
            cache: SubscriptionCache::new(ttl),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, ResolverState::Available { .. })
    }

    pub fn root_group_id(&self) -> Option<&str> {
        match &self.state {
            ResolverState::Available { root_group_id, .. } => Some(root_group_id),
            ResolverState::Unavailable => None,
        }
    }

    pub fn cache(&self) -> &SubscriptionCache {
        &self.cache
    }

    /// Subscriptions under `group_id`, served from cache while fresh.
    ///
    /// A failed refresh returns the previous result (even if expired) or an
    /// empty list, and leaves the cache untouched.
    pub async fn resolve(&self, group_id: &str) -> Vec<SubscriptionRecord> {
        let clients = match &self.state {
            ResolverState::Available { clients, .. } => clients,
            ResolverState::Unavailable => {
                log::warn!("Azure clients not initialized. Cannot fetch subscriptions.");
                return Vec::new();
            }
        };

        let key = cache_key(group_id);
        let cached = self.cache.get(&key);
        if let Some(entry) = cached.as_ref().filter(|e| e.is_fresh(self.cache.ttl())) {
            log::info!("Returning cached Azure subscriptions for management group: {group_id}");
            return entry.data.clone();
        }

        let started = Instant::now();
        match process_subscriptions(clients, group_id).await {
            Ok(subscriptions) => {
                log::info!(
                    "Resolved {} subscription(s) under management group {group_id} in {:?}",
                    subscriptions.len(),
                    started.elapsed()
                );
                self.cache
                    .insert(key, CacheEntry::new(started, subscriptions.clone()));
                subscriptions
            }
            Err(e) => {
                log::error!("Failed to fetch Azure subscriptions: {e}");
                match cached {
                    Some(stale) => {
                        log::warn!(
                            "Returning stale cached subscriptions for {group_id} ({} entries)",
                            stale.data.len()
                        );
                        stale.data
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    /// Subscriptions under the configured root as select-list options.
    pub async fn resolve_as_options(&self) -> Vec<SubscriptionOption> {
        let Some(root_group_id) = self.root_group_id() else {
            log::warn!("Azure clients not initialized. Cannot fetch subscriptions.");
            return Vec::new();
        };
        self.resolve(root_group_id)
            .await
            .iter()
            .map(SubscriptionOption::from)
            .collect()
    }
}

/// One fresh resolution: group ids, subscription ids, then display metadata.
async fn process_subscriptions(
    clients: &UpstreamClients,
    group_id: &str,
) -> Result<Vec<SubscriptionRecord>, ResolverError> {
    let subscription_ids =
        subscriptions_under_management_group(clients.management_groups.as_ref(), group_id).await?;

    let mut details = Vec::with_capacity(subscription_ids.len());
    for subscription_id in &subscription_ids {
        match clients.subscriptions.get_subscription(subscription_id).await {
            Ok(subscription) => details.push(SubscriptionRecord::from(subscription)),
            Err(e) => {
                log::error!("Error fetching subscription details for {subscription_id}: {e}")
            }
        }
    }
    Ok(details)
}

/// Management groups to query: the direct children of `group_id`, or `group_id` itself.
async fn child_management_groups(
    management_groups: &dyn ManagementGroupsApi,
    group_id: &str,
) -> Result<Vec<String>, ResolverError> {
    let mut groups = Vec::new();
    let mut children = management_groups.list_child_groups(group_id);
    while let Some(item) = children.try_next().await? {
        if let Some(name) = item.management_group_name() {
            groups.push(name.to_string());
        }
    }

    if groups.is_empty() {
        log::info!("No child management groups found under: {group_id}");
        groups.push(group_id.to_string());
    }
    Ok(groups)
}

/// Subscription ids under each group, in group-then-listing order.
///
/// Only a failure to list the child groups is returned as an error. A failed
/// subscription listing stops at that group and keeps what was collected.
async fn subscriptions_under_management_group(
    management_groups: &dyn ManagementGroupsApi,
    group_id: &str,
) -> Result<Vec<String>, ResolverError> {
    let groups = child_management_groups(management_groups, group_id).await?;

    let mut subscription_ids = Vec::new();
    match collect_subscription_ids(management_groups, &groups, &mut subscription_ids).await {
        Ok(()) if subscription_ids.is_empty() => {
            log::warn!("No subscriptions found under management group: {group_id}")
        }
        Ok(()) => {}
        Err(e) => log::error!(
            "Error fetching subscriptions under management group {group_id}, keeping {} found so far: {e}",
            subscription_ids.len()
        ),
    }
    Ok(subscription_ids)
}

async fn collect_subscription_ids(
    management_groups: &dyn ManagementGroupsApi,
    groups: &[String],
    subscription_ids: &mut Vec<String>,
) -> Result<(), ResolverError> {
    for group in groups {
        log::info!("Fetching subscriptions for management group: {group}");
        let mut listing = management_groups.list_subscriptions_under_group(group);
        while let Some(item) = listing.try_next().await? {
            match item.subscription_id() {
                Some(subscription_id) => subscription_ids.push(subscription_id.to_string()),
                None => log::debug!("Skipping subscription entry without id: {item:?}"),
            }
        }
    }
    Ok(())
}
