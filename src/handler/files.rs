//! Upload and retrieval of files under the storage root

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::config::AppState;
use crate::error::DavError;
use crate::http;
use crate::logger;
use crate::storage::{DavPath, EntryKind};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// PUT: store the request body at the request path
pub async fn put<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>, DavError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let path = DavPath::from_uri_path(req.uri().path())?;
    if path.is_collection() {
        return Err(DavError::Collection);
    }

    let max_body_size = state.config.http.max_body_size;
    check_body_size(&req, max_body_size)?;

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let data = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            return Err(DavError::PayloadTooLarge { max: max_body_size })
        }
        Err(e) => return Err(DavError::Body(e.to_string())),
    };

    let len = data.len();
    state.storage.write(&path, data).await?;
    logger::log_upload(&state.storage.describe(&path), len);

    Ok(http::build_created_response())
}

/// GET: file contents or a JSON listing of a directory
pub async fn get(uri_path: &str, state: &AppState) -> Result<Response<Full<Bytes>>, DavError> {
    let path = DavPath::from_uri_path(uri_path)?;

    match state.storage.stat(&path).await? {
        // `file.txt/` does not name a file
        Some(EntryKind::File) if path.is_collection() => Err(DavError::NotFound),
        Some(EntryKind::File) => {
            let data = state.storage.read(&path).await?;
            Ok(http::build_file_response(data))
        }
        Some(EntryKind::Directory) => {
            let entries = state.storage.list(&path).await?;
            let json = serde_json::to_string_pretty(&entries)?;
            Ok(http::build_json_response(json))
        }
        None => Err(DavError::NotFound),
    }
}

/// Reject bodies whose declared Content-Length exceeds the limit
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Result<(), DavError> {
    let Some(content_length) = req.headers().get("content-length") else {
        return Ok(());
    };
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return Ok(());
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => Err(DavError::PayloadTooLarge { max: max_body_size }),
        Ok(_) => Ok(()),
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            Ok(())
        }
    }
}
