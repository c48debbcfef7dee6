//! HTTP response building module
//!
//! Builders for the handful of responses the file server sends.

use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use super::body::{self, ResponseBody};

/// The only content type ever served
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Build a response with the given status and no body
pub fn build_empty_response(status: StatusCode) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback(status)
        })
}

/// Build 200 OK response streaming a file of `content_length` bytes
pub fn build_file_response(data: ResponseBody, content_length: u64) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, APPLICATION_OCTET_STREAM)
        .header(CONTENT_LENGTH, content_length)
        .body(data)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            fallback(StatusCode::INTERNAL_SERVER_ERROR)
        })
}

/// Build 204 No Content response for a completed upload
pub fn build_no_content_response() -> Response<ResponseBody> {
    build_empty_response(StatusCode::NO_CONTENT)
}

fn fallback(status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(body::empty());
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
