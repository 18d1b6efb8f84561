//! Request dispatch module
//!
//! Entry point for HTTP request processing: route resolution, the single
//! bounded body read, handler invocation, error conversion and access logging.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::Resolution;
use crate::http;
use crate::logger::{self, AccessLogEntry};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let is_head = req.method() == Method::HEAD;
    let access_entry = state
        .config
        .logging
        .access_log
        .then(|| new_access_entry(&req, peer_addr));

    let mut response = dispatch(req, &state).await;
    if is_head {
        response = http::strip_body(response);
    }
    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve, read the body and run the handler
async fn dispatch<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let handler = match state.router.resolve(req.method(), req.uri().path()) {
        Resolution::Found(handler) => handler,
        Resolution::MethodNotAllowed(allow) => {
            logger::log_warning(&format!(
                "Method not allowed: {} {}",
                req.method(),
                req.uri().path()
            ));
            return http::build_405_response(&allow);
        }
        Resolution::NotFound => return http::build_404_response(),
    };

    let req = match read_body(req, state.config.http.max_body_size).await {
        Ok(req) => req,
        Err(e) => {
            logger::log_warning(&e.to_string());
            return e.into_response();
        }
    };

    handler(&req).unwrap_or_else(|e| {
        if e.status().is_server_error() {
            logger::log_error(&format!("{} {}: {e}", req.method(), req.uri().path()));
        }
        e.into_response()
    })
}

/// Collect the request body, refusing anything larger than `max_body_size`
///
/// A declared `Content-Length` over the limit is rejected before reading;
/// the limit is enforced again while reading for bodies without one.
pub async fn read_body<B>(req: Request<B>, max_body_size: u64) -> Result<Request<Bytes>, HandlerError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if let Some(size) = declared_length(&req) {
        if size > max_body_size {
            return Err(HandlerError::PayloadTooLarge {
                limit: max_body_size,
            });
        }
    }

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            HandlerError::PayloadTooLarge {
                limit: max_body_size,
            }
        } else {
            HandlerError::BodyRead(e.to_string())
        }
    })?;

    Ok(Request::from_parts(parts, collected.to_bytes()))
}

/// Parsed `Content-Length`; unparsable values are logged and ignored
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    let value = req.headers().get(CONTENT_LENGTH)?;
    let Ok(text) = value.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match text.parse::<u64>() {
        Ok(size) => Some(size),
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{text}', skipping size check"
            ));
            None
        }
    }
}

fn new_access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = AccessLogEntry::version_label(req.version()).to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

/// Run `/json` through the routing table once and log the outcome
pub async fn self_check(state: &AppState) {
    const PATH: &str = "/json";

    let req = match Request::builder().uri(PATH).body(Full::new(Bytes::new())) {
        Ok(req) => req,
        Err(e) => {
            logger::log_error(&format!("Self-check request could not be built: {e}"));
            return;
        }
    };

    let response = dispatch(req, state).await;
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    match response.into_body().collect().await {
        Ok(collected) => {
            let body = collected.to_bytes();
            logger::log_self_check(PATH, status, &content_type, &String::from_utf8_lossy(&body));
        }
        Err(e) => match e {},
    }
}
