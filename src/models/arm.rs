//! Azure Resource Manager response payloads.
//!
//! Only the fields the resolver reads are modelled; everything is optional
//! because ARM omits fields freely.

use serde::{Deserialize, Serialize};

/// `type` of a management group entry in a descendants listing.
pub const MANAGEMENT_GROUP_TYPE: &str = "Microsoft.Management/managementGroups";

/// One page of a paged ARM listing.
#[derive(Serialize, Deserialize, Debug)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// URL of the next page, absent on the last one.
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

/// Entry of `managementGroups/{id}/descendants`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ManagementGroupItem {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub properties: Option<DescendantProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DescendantProperties {
    pub display_name: Option<String>,
    pub parent: Option<ParentRef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ParentRef {
    pub id: Option<String>,
}

impl ManagementGroupItem {
    /// A management group entry with the given name.
    ///
    /// For embedders and tests that stand in their own [`crate::azure::ManagementGroupsApi`].
    pub fn management_group(name: &str) -> Self {
        ManagementGroupItem {
            id: Some(format!("/providers/{MANAGEMENT_GROUP_TYPE}/{name}")),
            kind: Some(MANAGEMENT_GROUP_TYPE.to_string()),
            name: Some(name.to_string()),
            properties: None,
        }
    }

    /// Name of a management group entry; `None` for subscriptions and unnamed entries.
    pub fn management_group_name(&self) -> Option<&str> {
        if self.kind.as_deref() != Some(MANAGEMENT_GROUP_TYPE) {
            return None;
        }
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// True if the entry's parent is `group_id` (ARM compares group names case-insensitively).
    pub fn is_child_of(&self, group_id: &str) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.parent.as_ref())
            .and_then(|parent| parent.id.as_deref())
            .and_then(trailing_segment)
            .is_some_and(|parent| parent.eq_ignore_ascii_case(group_id))
    }
}

/// Entry of `managementGroups/{id}/subscriptions`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GroupSubscriptionItem {
    /// `/providers/Microsoft.Management/managementGroups/{g}/subscriptions/{subscriptionId}`
    pub id: Option<String>,
    pub name: Option<String>,
}

impl GroupSubscriptionItem {
    /// An entry carrying only a resource id.
    ///
    /// For embedders and tests that stand in their own [`crate::azure::ManagementGroupsApi`].
    pub fn with_id(id: &str) -> Self {
        GroupSubscriptionItem {
            id: Some(id.to_string()),
            name: None,
        }
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.id.as_deref().and_then(trailing_segment)
    }
}

/// Body of `subscriptions/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetails {
    pub id: Option<String>,
    pub subscription_id: Option<String>,
    pub display_name: Option<String>,
    pub state: Option<String>,
}

/// Last `/`-separated segment of a resource id, `None` if empty.
pub fn trailing_segment(resource_id: &str) -> Option<&str> {
    resource_id.rsplit('/').next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_fixture<T: serde::de::DeserializeOwned>(file: &str) -> T {
        let json = std::fs::read_to_string(format!("src/tests/test_data/{file}"))
            .expect("Error reading test data");
        serde_json::from_str(&json).expect("Error parsing test data")
    }

    #[test]
    fn test_trailing_segment() {
        assert_eq!(
            trailing_segment("/providers/Microsoft.Management/managementGroups/g1/subscriptions/sub-aaa"),
            Some("sub-aaa")
        );
        assert_eq!(trailing_segment("sub-aaa"), Some("sub-aaa"));
        assert_eq!(trailing_segment("/subscriptions/"), None);
        assert_eq!(trailing_segment(""), None);
    }

    #[test]
    fn test_descendants_page() {
        let page: Page<ManagementGroupItem> = read_fixture("descendants_page_01.json");
        assert_eq!(page.value.len(), 4);
        assert!(page.next_link.is_some(), "First page should link to the next");

        let children: Vec<&str> = page
            .value
            .iter()
            .filter(|g| g.is_child_of("root-g"))
            .filter_map(|g| g.management_group_name())
            .collect();
        assert_eq!(children, vec!["platform", "landing-zones"]);
    }

    #[test]
    fn test_subscription_entry_is_not_management_group() {
        let item = ManagementGroupItem {
            kind: Some(format!("{MANAGEMENT_GROUP_TYPE}/subscriptions")),
            name: Some("sub-aaa".to_string()),
            ..Default::default()
        };
        assert_eq!(item.management_group_name(), None);
    }

    #[test]
    fn test_unnamed_group_is_skipped() {
        let mut item = ManagementGroupItem::management_group("x");
        item.name = Some(String::new());
        assert_eq!(item.management_group_name(), None);
    }

    #[test]
    fn test_group_subscriptions_page() {
        let page: Page<GroupSubscriptionItem> = read_fixture("group_subscriptions_01.json");
        assert!(page.next_link.is_none());
        let ids: Vec<&str> = page
            .value
            .iter()
            .filter_map(|s| s.subscription_id())
            .collect();
        assert_eq!(
            ids,
            vec![
                "0f6c2a4e-1b7d-4d3a-9c55-2e8f1a6b7c01",
                "7d2e9b13-5a40-4c8e-b1f2-93a6d0c4e502"
            ]
        );
    }

    #[test]
    fn test_subscription_details() {
        let details: SubscriptionDetails = read_fixture("subscription_01.json");
        assert_eq!(details.display_name.as_deref(), Some("Platform Connectivity"));
        assert_eq!(
            details.subscription_id.as_deref(),
            Some("0f6c2a4e-1b7d-4d3a-9c55-2e8f1a6b7c01")
        );
    }
}
