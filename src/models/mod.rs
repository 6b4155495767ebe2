//! Domain models for Azure subscription resolution.
//!
//! - [`SubscriptionRecord`] and [`SubscriptionOption`] - what callers receive
//! - [`arm`] - raw Azure Resource Manager payloads

pub mod arm;
mod subscription;

// Re-export public types
pub use arm::{GroupSubscriptionItem, ManagementGroupItem, Page, SubscriptionDetails};
pub use subscription::{SubscriptionOption, SubscriptionRecord};
