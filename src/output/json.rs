//! JSON output of subscription options.

use crate::models::SubscriptionOption;

/// Pretty JSON array of `{label, value}` objects.
pub fn options_json(options: &[SubscriptionOption]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(options)
}
