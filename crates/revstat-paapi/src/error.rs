use thiserror::Error;

/// Errors returned by the Product Advertising API client.
#[derive(Debug, Error)]
pub enum PaapiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the access key ID (`InvalidClientTokenId`).
    ///
    /// Carries the offending key ID — never the secret — so callers can
    /// log which credential is misconfigured.
    #[error("access key ID {access_key_id} was rejected by the product API")]
    InvalidAccessKey { access_key_id: String },

    /// The API rejected the request signature (`SignatureDoesNotMatch`).
    #[error("request signature for access key ID {access_key_id} was rejected by the product API")]
    InvalidSignature { access_key_id: String },

    /// Any other application-level error code in the response body.
    #[error("product API error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be parsed as XML.
    #[error("XML parse error for {context}: {source}")]
    Xml {
        context: String,
        #[source]
        source: quick_xml::Error,
    },

    /// Non-2xx HTTP status with no parseable API error in the body.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
