//! Client for the Product Advertising API `ItemLookup` operation.
//!
//! Resolves an ASIN to the URL of its customer-reviews iframe: issues a
//! signed lookup request with `ResponseGroup=Reviews`, discovers the
//! response's XML namespace, and extracts the `IFrameURL` node. Transient
//! network failures are retried with a fixed inter-attempt delay;
//! authentication failures are classified and never retried.

pub mod client;
pub mod error;

mod retry;
mod sign;
mod xml;

pub use client::PaapiClient;
pub use error::PaapiError;
pub use xml::DEFAULT_NAMESPACE;
