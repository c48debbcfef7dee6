//! Request dispatch module
//!
//! Entry point for HTTP request processing: takes a request slot, classifies
//! the method, resolves the path and hands off to the content handlers.

use crate::config::AppState;
use crate::handler::content::{self, Served};
use crate::handler::resolve::resolve;
use crate::http::{RequestMethod, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let method = RequestMethod::from(req.method());
    let path = req.uri().path().to_string();

    let mut entry = AccessLogEntry::new(remote_addr.to_string(), method.to_string(), path.clone());
    entry.http_version = version_label(req.version()).to_string();
    entry.user_agent = header_value(&req, "user-agent");
    entry.referer = header_value(&req, "referer");

    // Waits here while every slot is busy
    let Ok(permit) = state.limiter.acquire().await else {
        logger::log_error("Request limiter closed");
        return Ok(Served::empty(StatusCode::SERVICE_UNAVAILABLE).response);
    };

    let served = match method {
        RequestMethod::Get => match resolve_path(&state, &method, &path) {
            Ok(file) => content::get(&file, permit).await,
            Err(rejected) => rejected,
        },
        RequestMethod::Put => match resolve_path(&state, &method, &path) {
            Ok(file) => content::put(&file, req.into_body()).await,
            Err(rejected) => rejected,
        },
        RequestMethod::Other(_) => {
            logger::log_warning(&format!("Unsupported method: {method} {path}"));
            Served::empty(StatusCode::BAD_REQUEST)
        }
    };

    if state.config.logging.access_log {
        entry.status = served.response.status().as_u16();
        entry.body_bytes = served.bytes;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(served.response)
}

/// Resolve the request path, turning a rejection into its response
fn resolve_path(state: &AppState, method: &RequestMethod, path: &str) -> Result<PathBuf, Served> {
    resolve(path, &state.base_path, &state.root).map_err(|e| {
        logger::log_warning(&format!("Rejected {method} {path}: {e}"));
        Served::empty(e.status())
    })
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
