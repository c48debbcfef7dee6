//! File content module
//!
//! GET streams a file out, PUT streams a request body into a file.

use crate::http::{self, body};
use crate::logger;
use crate::server::RequestPermit;
use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};
use std::io;
use std::path::Path;
use tokio::fs::{self, File};

/// Response plus the number of file bytes it moved, for access logging
pub struct Served {
    pub response: Response<http::ResponseBody>,
    pub bytes: u64,
}

impl Served {
    pub fn empty(status: StatusCode) -> Self {
        Self {
            response: http::build_empty_response(status),
            bytes: 0,
        }
    }
}

/// Serve the file at `path`.
///
/// The permit is handed to the response body so the request slot stays
/// taken until the whole file has been sent.
pub async fn get(path: &Path, permit: RequestPermit) -> Served {
    logger::log_request("GET", path);

    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) => {
            if !is_missing(&e) {
                logger::log_warning(&format!("Cannot stat '{}': {e}", path.display()));
            }
            return Served::empty(StatusCode::NOT_FOUND);
        }
    };

    if !metadata.is_file() {
        return Served::empty(StatusCode::BAD_REQUEST);
    }

    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            logger::log_error(&format!("Failed to open '{}': {e}", path.display()));
            return Served::empty(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Length of the handle actually being streamed
    let length = match file.metadata().await {
        Ok(m) => m.len(),
        Err(e) => {
            logger::log_error(&format!("Failed to stat '{}': {e}", path.display()));
            return Served::empty(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Served {
        response: http::build_file_response(body::file_body(file, permit), length),
        bytes: length,
    }
}

/// Write the request body to `path`, creating missing parent directories.
pub async fn put<B>(path: &Path, request_body: B) -> Served
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    logger::log_request("PUT", path);

    let Some(parent) = path.parent() else {
        return Served::empty(StatusCode::INTERNAL_SERVER_ERROR);
    };

    if !is_dir(parent).await {
        if let Err(e) = fs::create_dir_all(parent).await {
            logger::log_warning(&format!(
                "Failed to create directory '{}': {e}",
                parent.display()
            ));
        }
    }

    // Nothing is written unless the parent is really there now
    if !is_dir(parent).await {
        return Served::empty(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let file = match File::create(path).await {
        Ok(f) => f,
        Err(e) => {
            logger::log_error(&format!("Failed to create '{}': {e}", path.display()));
            return Served::empty(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match body::copy_body_to_file(request_body, file).await {
        Ok(written) => Served {
            response: http::build_no_content_response(),
            bytes: written,
        },
        Err(e) => {
            logger::log_error(&format!("Failed to write '{}': {e}", path.display()));
            Served::empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
