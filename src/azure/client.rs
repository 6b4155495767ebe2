//! Credential-backed HTTP access to Azure Resource Manager.

use super::ArmStream;
use crate::config::AzureSettings;
use crate::error::ResolverError;
use crate::models::Page;
use azure_core::auth::TokenCredential;
use azure_identity::{ClientSecretCredential, TokenCredentialOptions};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Shared by the management group and subscription clients.
pub struct ArmConnection {
    credential: Arc<ClientSecretCredential>,
    http: reqwest::Client,
    endpoint: String,
    scope: String,
}

impl ArmConnection {
    /// Build the credential and HTTP client. Nothing is sent until the first call.
    pub fn connect(settings: &AzureSettings) -> Result<Self, ResolverError> {
        let authority_host = azure_core::Url::parse(&settings.authority_host).map_err(|e| {
            ResolverError::UpstreamUnavailable(format!(
                "invalid authority host '{}': {e}",
                settings.authority_host
            ))
        })?;
        // Validate early so a bad endpoint fails construction, not every call.
        arm_url(&settings.resource_manager_endpoint, &[], "")?;

        let credential = ClientSecretCredential::new(
            azure_core::new_http_client(),
            settings.tenant_id.clone(),
            settings.client_id.clone(),
            settings.client_secret.clone(),
            TokenCredentialOptions::new(authority_host),
        );
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ResolverError::UpstreamUnavailable(format!("http client: {e}")))?;

        log::debug!(
            "ArmConnection tenant={} client={} endpoint={}",
            settings.tenant_id,
            settings.client_id,
            settings.resource_manager_endpoint
        );
        Ok(ArmConnection {
            credential: Arc::new(credential),
            http,
            endpoint: settings.resource_manager_endpoint.clone(),
            scope: arm_scope(&settings.resource_manager_endpoint),
        })
    }

    /// `{endpoint}/{segments..}?api-version={api_version}`
    pub fn url(&self, segments: &[&str], api_version: &str) -> Result<Url, ResolverError> {
        arm_url(&self.endpoint, segments, api_version)
    }

    async fn bearer_token(&self) -> Result<String, ResolverError> {
        let token = self
            .credential
            .get_token(&[self.scope.as_str()])
            .await
            .map_err(|e| ResolverError::upstream("token request", e))?;
        Ok(token.token.secret().to_string())
    }

    /// GET `url` and parse the JSON body.
    ///
    /// Non-2xx responses are errors carrying status and body. Parse errors name
    /// the JSON path that failed.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
    ) -> Result<T, ResolverError> {
        let token = self.bearer_token().await?;
        log::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ResolverError::upstream(operation, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolverError::upstream(operation, e))?;
        if !status.is_success() {
            log::warn!("{operation}: HTTP {status} for {url}");
            return Err(ResolverError::upstream(
                operation,
                format!("HTTP {status}: {body}"),
            ));
        }

        let mut json_deserializer = serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(&mut json_deserializer).map_err(|e| {
            log::error!("{operation} BODY START:\n\n{body}\n\nBODY END\n");
            ResolverError::upstream(
                operation,
                format!("Error parsing JSON: path={} error={}", e.path(), e),
            )
        })
    }

    /// Stream every item of a paged listing, following `nextLink` one page at a time.
    pub fn paged<'a, T>(&'a self, operation: &'static str, first_page: Url) -> ArmStream<'a, T>
    where
        T: DeserializeOwned + Send + 'a,
    {
        stream::try_unfold(Some(first_page.to_string()), move |next_url| async move {
            let url = match next_url {
                Some(url) => url,
                None => return Ok(None),
            };
            let page: Page<T> = self.get_json(operation, &url).await?;
            log::debug!(
                "{operation}: page with {} item(s), more={}",
                page.value.len(),
                page.next_link.is_some()
            );
            let items = stream::iter(page.value.into_iter().map(Ok::<T, ResolverError>));
            Ok::<_, ResolverError>(Some((items, page.next_link)))
        })
        .try_flatten()
        .boxed()
    }
}

/// OAuth scope for the management plane behind `endpoint`.
pub fn arm_scope(endpoint: &str) -> String {
    format!("{}/.default", endpoint.trim_end_matches('/'))
}

/// Build an ARM URL from path segments. Segments are percent-encoded.
pub fn arm_url(endpoint: &str, segments: &[&str], api_version: &str) -> Result<Url, ResolverError> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        ResolverError::UpstreamUnavailable(format!("invalid endpoint '{endpoint}': {e}"))
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            ResolverError::UpstreamUnavailable(format!("endpoint '{endpoint}' cannot be a base"))
        })?
        .pop_if_empty()
        .extend(segments);
    if !api_version.is_empty() {
        url.query_pairs_mut().append_pair("api-version", api_version);
    }
    Ok(url)
}
