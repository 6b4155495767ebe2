//! Error types for subscription resolution.
//!
//! None of these cross the resolver's public boundary: every failure is logged
//! and turned into an empty, partial or stale result at the call site.

use std::fmt::Display;
use thiserror::Error;

/// Failure kinds raised while building or driving the Azure clients.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A required setting is missing or blank.
    #[error("missing or blank configuration setting '{0}'")]
    Configuration(String),

    /// Credential or client construction failed.
    #[error("azure clients unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A listing or fetch call against the management API failed.
    #[error("{operation} failed: {message}")]
    UpstreamCall {
        operation: &'static str,
        message: String,
    },
}

impl ResolverError {
    /// Wrap any displayable error as a failed upstream call.
    pub fn upstream(operation: &'static str, err: impl Display) -> Self {
        ResolverError::UpstreamCall {
            operation,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message() {
        let err = ResolverError::upstream("get subscription", "HTTP 404 Not Found");
        assert_eq!(err.to_string(), "get subscription failed: HTTP 404 Not Found");
    }

    #[test]
    fn test_configuration_message() {
        let err = ResolverError::Configuration("AZURE_TENANT_ID".to_string());
        assert_eq!(
            err.to_string(),
            "missing or blank configuration setting 'AZURE_TENANT_ID'"
        );
    }
}
