//! HTTP response building module
//!
//! Provides builders for the status codes and content types the handlers
//! produce, decoupled from specific handler logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Build a response with an explicit content type and length
pub fn build_response(
    status: StatusCode,
    content_type: &str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback_500()
        })
}

/// Build 200 HTML response
pub fn build_html_response(body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_response(StatusCode::OK, TEXT_HTML, body)
}

/// Build 200 plain text response
pub fn build_text_response(body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_response(StatusCode::OK, TEXT_PLAIN, body)
}

/// Build JSON response from already-encoded bytes
pub fn build_json_response(
    status: StatusCode,
    content_type: &str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    build_response(status, content_type, body)
}

/// Build JSON error response: `{"error":"<message>"}`
pub fn build_json_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message }).to_string();
    build_response(status, APPLICATION_JSON_UTF8, body)
}

/// Build redirect response with an HTML link body
///
/// The body is `<a href="TARGET">Status Text</a>.` followed by two newlines.
pub fn build_redirect_response(target: &str, status: StatusCode) -> Response<Full<Bytes>> {
    let body = format!(
        "<a href=\"{}\">{}</a>.\n\n",
        html_escape(target),
        status.canonical_reason().unwrap_or("Redirect")
    );

    let location = match HeaderValue::from_str(target) {
        Ok(v) => v,
        Err(e) => {
            crate::logger::log_error(&format!("Invalid redirect target '{target}': {e}"));
            return fallback_500();
        }
    };

    let mut resp = build_response(status, TEXT_HTML, body);
    resp.headers_mut().insert(LOCATION, location);
    resp
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::NOT_FOUND, TEXT_PLAIN, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut resp = build_response(
        StatusCode::METHOD_NOT_ALLOWED,
        TEXT_PLAIN,
        "405 Method Not Allowed",
    );
    match HeaderValue::from_str(allow) {
        Ok(v) => {
            resp.headers_mut().insert(ALLOW, v);
        }
        Err(e) => log_build_error("405", &e.into()),
    }
    resp
}

/// Build 413 Payload Too Large response
pub fn build_413_response(limit: u64) -> Response<Full<Bytes>> {
    build_json_error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &format!("request body exceeds {limit} bytes"),
    )
}

/// Drop the body of a response to a HEAD request, keeping its headers
pub fn strip_body(resp: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (parts, _) = resp.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

fn fallback_500() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(b"500 Internal Server Error")));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}

/// Escape the characters that are significant inside an HTML attribute
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
