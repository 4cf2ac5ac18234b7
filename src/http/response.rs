//! HTTP response building module
//!
//! Provides builders for the responses the WebDAV handler sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, WWW_AUTHENTICATE};
use hyper::{Response, StatusCode};

use crate::error::DavError;
use crate::http::propfind;

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 401 Unauthorized response with a Basic challenge
pub fn build_401_response(realm: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("WWW-Authenticate", format!("Basic realm=\"{realm}\""))
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from("Authentication required")))
        .unwrap_or_else(|e| {
            // Unusable realm: still challenge, just without it
            log_build_error("401", &e);
            let mut resp = Response::new(Full::new(Bytes::from("Authentication required")));
            *resp.status_mut() = StatusCode::UNAUTHORIZED;
            let headers = resp.headers_mut();
            headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
            resp
        })
}

/// Build 201 Created response for a finished upload
pub fn build_created_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::CREATED)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("201", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build file download response
pub fn build_file_response(data: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/octet-stream")
        .header("Content-Length", data.len())
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response (directory listings)
pub fn build_json_response(json: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 207 Multi-Status response for PROPFIND
pub fn build_multistatus_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MULTI_STATUS)
        .header("Content-Type", "application/xml")
        .body(Full::new(Bytes::from_static(
            propfind::MULTISTATUS_BODY.as_bytes(),
        )))
        .unwrap_or_else(|e| {
            log_build_error("207", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 501 Not Implemented response for methods outside GET/PUT/PROPFIND/OPTIONS
pub fn build_501_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_IMPLEMENTED)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Unsupported method")))
        .unwrap_or_else(|e| {
            log_build_error("501", &e);
            Response::new(Full::new(Bytes::from("Unsupported method")))
        })
}

/// Build plain-text error response from a request failure
pub fn build_error_response(err: &DavError) -> Response<Full<Bytes>> {
    let message = err.public_message();
    Response::builder()
        .status(err.status())
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message.clone())))
        .unwrap_or_else(|e| {
            log_build_error(err.status().as_str(), &e);
            Response::new(Full::new(Bytes::from(message)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_401_has_challenge() {
        let resp = build_401_response("WebDAV");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get("WWW-Authenticate").unwrap(),
            "Basic realm=\"WebDAV\""
        );
        assert_eq!(body_bytes(resp).await, "Authentication required");
    }

    #[tokio::test]
    async fn test_401_with_invalid_realm_still_challenges() {
        let resp = build_401_response("Wedding\nPhotos");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("WWW-Authenticate").unwrap(), "Basic");
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/html");
        assert_eq!(body_bytes(resp).await, "Authentication required");
    }

    #[tokio::test]
    async fn test_file_response_headers() {
        let resp = build_file_response(Bytes::from_static(b"ABC"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/octet-stream"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "3");
        assert_eq!(body_bytes(resp).await, "ABC");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let resp = build_error_response(&DavError::NotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(resp).await, "File not found");
    }
}
