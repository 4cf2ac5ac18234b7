//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: CORS preflight, authentication,
//! method dispatch, response decoration and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, AUTHORIZATION, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::error::DavError;
use crate::handler::files;
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let entry = access_log.then(|| access_entry(&req, remote_addr));

    let mut response = dispatch(req, &state).await;
    decorate(&mut response, &state);

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Method dispatch. OPTIONS and unsupported methods skip authentication.
async fn dispatch<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    if req.method() == Method::OPTIONS {
        return http::build_options_response();
    }
    if !matches!(req.method().as_str(), "GET" | "PUT" | "PROPFIND") {
        return http::build_501_response();
    }
    if !state.credentials.verify(req.headers().get(AUTHORIZATION)) {
        return http::build_401_response(&state.config.auth.realm);
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let result = match method.as_str() {
        "PUT" => files::put(req, state).await,
        "GET" => files::get(&path, state).await,
        _ => Ok(http::build_multistatus_response()),
    };

    result.unwrap_or_else(|err| {
        log_failure(&method, &path, &err);
        http::build_error_response(&err)
    })
}

/// Headers every response carries
fn decorate(response: &mut Response<Full<Bytes>>, state: &AppState) {
    let headers = response.headers_mut();
    if state.config.http.enable_cors {
        cors::apply(headers);
    }
    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        headers.insert(SERVER, server);
    }
}

fn access_entry<B>(req: &Request<B>, remote_addr: Option<SocketAddr>) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let uri = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);
    let mut entry = AccessLogEntry::new(
        req.method().to_string(),
        uri,
        format!("{:?}", req.version()),
    );
    if let Some(addr) = remote_addr {
        entry.remote_addr = addr.to_string();
    }
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

fn log_failure(method: &Method, path: &str, err: &DavError) {
    match err {
        // Plain misses are routine
        DavError::NotFound => {}
        DavError::Path(e) => logger::log_warning(&format!("Blocked {method} {path}: {e}")),
        DavError::Storage(e) => logger::log_error(&format!(
            "{method} {path}: {e} (retryable: {})",
            e.is_retryable()
        )),
        other => logger::log_error(&format!("{method} {path}: {other}")),
    }
}
