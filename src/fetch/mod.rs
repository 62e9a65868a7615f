//! Network transport for the resource cache.
//!
//! The cache only needs a blocking GET; everything HTTP-specific lives here.

pub mod http;

pub use http::{FetchResponse, HttpFetcher, DEFAULT_TIMEOUT};
