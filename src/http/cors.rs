//! CORS header injection
//!
//! The method list advertises POST, DELETE and MKCOL even though only
//! GET, PUT, PROPFIND and OPTIONS are served.

use hyper::header::{HeaderMap, HeaderValue};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS, PROPFIND, MKCOL";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, Depth, Content-Length";
pub const EXPOSE_HEADERS: &str = "Content-Length, Last-Modified";

/// Attach the CORS headers to a response
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        "Access-Control-Expose-Headers",
        HeaderValue::from_static(EXPOSE_HEADERS),
    );
}
