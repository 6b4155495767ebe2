//! Resolved subscription data model.

use super::SubscriptionDetails;
use serde::{Deserialize, Serialize};

/// A subscription reachable under the configured management group.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    /// Azure subscription ID.
    pub subscription_id: String,
    /// Azure subscription display name (empty if Azure has none).
    pub subscription_name: String,
}

impl SubscriptionRecord {
    pub fn new(subscription_id: impl Into<String>, subscription_name: impl Into<String>) -> Self {
        SubscriptionRecord {
            subscription_id: subscription_id.into(),
            subscription_name: subscription_name.into(),
        }
    }
}

impl From<SubscriptionDetails> for SubscriptionRecord {
    fn from(details: SubscriptionDetails) -> Self {
        SubscriptionRecord {
            subscription_id: details.subscription_id.unwrap_or_default(),
            subscription_name: details.display_name.unwrap_or_default(),
        }
    }
}

/// Select-list entry for an operator UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionOption {
    /// Subscription display name.
    pub label: String,
    /// Subscription ID.
    pub value: String,
}

impl From<&SubscriptionRecord> for SubscriptionOption {
    fn from(record: &SubscriptionRecord) -> Self {
        SubscriptionOption {
            label: record.subscription_name.clone(),
            value: record.subscription_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_projection() {
        let record = SubscriptionRecord::new("s1", "Prod");
        let option = SubscriptionOption::from(&record);
        assert_eq!(option.label, "Prod");
        assert_eq!(option.value, "s1");
    }

    #[test]
    fn test_record_from_details_defaults_to_empty() {
        let record = SubscriptionRecord::from(SubscriptionDetails {
            subscription_id: Some("sub-aaa".to_string()),
            display_name: None,
            ..Default::default()
        });
        assert_eq!(record, SubscriptionRecord::new("sub-aaa", ""));
    }

    #[test]
    fn test_record_json_is_camel_case() {
        let json = serde_json::to_string(&SubscriptionRecord::new("sub-aaa", "Alpha"))
            .expect("serialize");
        assert_eq!(json, r#"{"subscriptionId":"sub-aaa","subscriptionName":"Alpha"}"#);
    }
}
