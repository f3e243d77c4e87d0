//! Signature Version 2 request signing for the product API.
//!
//! The API authenticates GET requests with an HMAC-SHA256 signature over a
//! canonical representation of the query string. The canonical form sorts
//! the percent-encoded `key=value` pairs by byte order and joins them with
//! `&`; the string to sign prepends the verb, host, and path, each on its
//! own line.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;

/// RFC 3986 unreserved characters pass through; everything else is encoded.
/// This matches what the API's signature check expects — notably space
/// becomes `%20`, not `+`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a single query component with the signing charset.
pub(crate) fn percent_encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_ENCODE_SET).to_string()
}

/// Builds the canonical query string: percent-encoded pairs, byte-sorted,
/// `&`-joined. The `Signature` parameter itself is never part of the
/// canonical form.
pub(crate) fn canonical_query(params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<String> = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                percent_encode_component(k),
                percent_encode_component(v)
            )
        })
        .collect();
    encoded.sort();
    encoded.join("&")
}

/// Computes the base64 HMAC-SHA256 signature for a canonical query.
pub(crate) fn signature(secret_key: &str, host: &str, path: &str, canonical_query: &str) -> String {
    let string_to_sign = format!("GET\n{host}\n{path}\n{canonical_query}");
    let mut mac = Hmac::<Sha256>::new_from_slice(secret_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
