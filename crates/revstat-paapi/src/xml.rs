//! XML handling for `ItemLookup` responses.
//!
//! The API versions its namespace URI, so the `IFrameURL` node cannot be
//! searched under a statically known namespace: the active namespace is
//! discovered from the response's own root element first, falling back to
//! [`DEFAULT_NAMESPACE`] when the root carries none, and only then is the
//! node searched in that namespace.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};

use crate::error::PaapiError;

/// Namespace assumed when the response root declares none.
pub const DEFAULT_NAMESPACE: &str = "http://webservices.amazon.com/AWSECommerceService/2011-08-01";

const IFRAME_NODE: &str = "IFrameURL";

/// Extracts the default namespace URI declared on the response's root
/// element, or `None` if the root has no `xmlns` declaration (including
/// when the document is malformed — namespace discovery is best-effort;
/// structural errors surface from [`find_iframe_url`]).
pub(crate) fn discover_namespace(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"xmlns" {
                        let uri = String::from_utf8_lossy(attr.value.as_ref()).into_owned();
                        return (!uri.is_empty()).then_some(uri);
                    }
                }
                return None;
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Searches the response for the text content of the `IFrameURL` element
/// bound to `namespace`. Returns `Ok(None)` when no such element exists.
///
/// # Errors
///
/// Returns [`PaapiError::Xml`] if the document is not well-formed.
pub(crate) fn find_iframe_url(xml: &str, namespace: &str) -> Result<Option<String>, PaapiError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_iframe = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let (resolved, local) = reader.resolve_element(e.name());
                in_iframe =
                    local.as_ref() == IFRAME_NODE.as_bytes() && ns_matches(&resolved, namespace);
            }
            Ok(Event::Text(e)) if in_iframe => {
                let url = e.unescape().unwrap_or_default().into_owned();
                if !url.is_empty() {
                    return Ok(Some(url));
                }
            }
            Ok(Event::End(_)) => in_iframe = false,
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(PaapiError::Xml {
                    context: format!("searching for {IFRAME_NODE}"),
                    source: e,
                })
            }
            _ => {}
        }
    }
}

/// Best-effort extraction of the first `<Error><Code>…</Code><Message>…`
/// block from a response body. Returns `None` when the body carries no
/// error element or is not XML at all.
pub(crate) fn parse_api_error(xml: &str) -> Option<(String, String)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_error = false;
    let mut current_tag = String::new();
    let mut code = String::new();
    let mut message = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "Error" {
                    in_error = true;
                    code.clear();
                    message.clear();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                if in_error && e.name().as_ref() == b"Error" {
                    in_error = false;
                    if !code.is_empty() {
                        return Some((code, message));
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) if in_error => {
                let text = e.unescape().unwrap_or_default().into_owned();
                match current_tag.as_str() {
                    "Code" => code = text,
                    "Message" => message = text,
                    _ => {}
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn ns_matches(resolved: &ResolveResult<'_>, expected: &str) -> bool {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => *uri == expected.as_bytes(),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => false,
    }
}
