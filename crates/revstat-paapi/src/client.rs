//! HTTP client for the Product Advertising API `ItemLookup` endpoint.
//!
//! Wraps `reqwest` with request signing, API error classification, and the
//! namespace-aware `IFrameURL` extraction. Application-level errors are
//! reported by the API as an `<Error>` block in the body (sometimes with a
//! 2xx status, sometimes 4xx), so the body is always inspected before the
//! HTTP status.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Url};

use crate::error::PaapiError;
use crate::retry::retry_fixed_delay;
use crate::sign;
use crate::xml;
use crate::xml::DEFAULT_NAMESPACE;

const DEFAULT_ENDPOINT: &str = "https://webservices.amazon.com/onca/xml";

/// Client for the Product Advertising API.
///
/// Holds the HTTP client, credentials, and retry policy. Use
/// [`PaapiClient::new`] for production or [`PaapiClient::with_endpoint`] to
/// point at a mock server in tests.
pub struct PaapiClient {
    client: Client,
    access_key_id: String,
    secret_key: String,
    associate_tag: Option<String>,
    endpoint: Url,
    max_attempts: u32,
    retry_delay_secs: u64,
}

impl PaapiClient {
    /// Creates a new client pointed at the production API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PaapiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_key_id: &str,
        secret_key: &str,
        associate_tag: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, PaapiError> {
        Self::with_endpoint(
            access_key_id,
            secret_key,
            associate_tag,
            timeout_secs,
            user_agent,
            max_attempts,
            retry_delay_secs,
            DEFAULT_ENDPOINT,
        )
    }

    /// Creates a new client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PaapiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PaapiError::InvalidEndpoint`] if
    /// `endpoint` is not a valid URL.
    #[allow(clippy::too_many_arguments)]
    pub fn with_endpoint(
        access_key_id: &str,
        secret_key: &str,
        associate_tag: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        retry_delay_secs: u64,
        endpoint: &str,
    ) -> Result<Self, PaapiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| PaapiError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_key_id: access_key_id.to_owned(),
            secret_key: secret_key.to_owned(),
            associate_tag: associate_tag.map(str::to_owned),
            endpoint,
            max_attempts,
            retry_delay_secs,
        })
    }

    /// Resolves an ASIN to the URL of its customer-reviews iframe.
    ///
    /// Issues a signed `ItemLookup` with `ResponseGroup=Reviews`, discovers
    /// the response namespace (falling back to [`DEFAULT_NAMESPACE`]), and
    /// returns the `IFrameURL` node's text. `Ok(None)` means the response
    /// was valid but carried no iframe node — the item has no reviews page.
    ///
    /// The network call is retried on transient errors up to the configured
    /// attempt budget; this is the only retry layer for the lookup.
    ///
    /// # Errors
    ///
    /// - [`PaapiError::InvalidAccessKey`] / [`PaapiError::InvalidSignature`]
    ///   on rejected credentials (never retried).
    /// - [`PaapiError::Api`] for other API error codes.
    /// - [`PaapiError::Http`] / [`PaapiError::UnexpectedStatus`] on network
    ///   failure after all attempts are exhausted.
    /// - [`PaapiError::Xml`] if the response body is not well-formed XML.
    pub async fn resolve_reviews_iframe(&self, asin: &str) -> Result<Option<String>, PaapiError> {
        let body = retry_fixed_delay(self.max_attempts, self.retry_delay_secs, || {
            self.item_lookup_once(asin)
        })
        .await?;

        let namespace =
            xml::discover_namespace(&body).unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned());
        match xml::find_iframe_url(&body, &namespace)? {
            Some(url) => Ok(Some(url)),
            None => {
                tracing::warn!(asin, namespace = %namespace, "lookup response carries no IFrameURL node");
                Ok(None)
            }
        }
    }

    /// One signed `ItemLookup` attempt. Returns the raw XML body.
    async fn item_lookup_once(&self, asin: &str) -> Result<String, PaapiError> {
        let url = self.signed_lookup_url(asin, &Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The API reports application errors in the body; classify those
        // before falling back to the bare HTTP status.
        if let Some((code, message)) = xml::parse_api_error(&body) {
            return Err(self.classify_api_error(code, message));
        }

        if !status.is_success() {
            return Err(PaapiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(body)
    }

    /// Builds the signed request URL for one lookup attempt.
    ///
    /// The canonical query is byte-sorted and percent-encoded before
    /// signing; the `Signature` parameter is appended last so the query
    /// sent over the wire is exactly the string that was signed.
    fn signed_lookup_url(&self, asin: &str, timestamp: &str) -> Url {
        let mut params: Vec<(&str, &str)> = vec![
            ("AWSAccessKeyId", &self.access_key_id),
            ("ItemId", asin),
            ("Operation", "ItemLookup"),
            ("ResponseGroup", "Reviews"),
            ("Service", "AWSECommerceService"),
            ("SignatureMethod", "HmacSHA256"),
            ("SignatureVersion", "2"),
            ("Timestamp", timestamp),
        ];
        if let Some(tag) = &self.associate_tag {
            params.push(("AssociateTag", tag));
        }

        let canonical = sign::canonical_query(&params);
        let signature = sign::signature(
            &self.secret_key,
            self.endpoint.host_str().unwrap_or_default(),
            self.endpoint.path(),
            &canonical,
        );

        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "{canonical}&Signature={}",
            sign::percent_encode_component(&signature)
        )));
        url
    }

    fn classify_api_error(&self, code: String, message: String) -> PaapiError {
        match code.as_str() {
            "InvalidClientTokenId" => PaapiError::InvalidAccessKey {
                access_key_id: self.access_key_id.clone(),
            },
            "SignatureDoesNotMatch" => PaapiError::InvalidSignature {
                access_key_id: self.access_key_id.clone(),
            },
            _ => PaapiError::Api { code, message },
        }
    }
}
