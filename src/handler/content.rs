//! Static content handlers
//!
//! Fixed HTML, text and JSON bodies; none of them look at the request.

use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use serde::Serialize;

use crate::error::{HandlerError, HandlerResult};
use crate::http::response::APPLICATION_JSON_UTF8;
use crate::http::{self, build_html_response, build_json_response, build_text_response};

const HELLO_HTML: &str = "<html><body>Hello World!</body></html>";

/// Record served by `/json`; field order is the wire order
#[derive(Debug, Serialize)]
struct Contact {
    name: &'static str,
    email: &'static str,
}

const CONTACT: Contact = Contact {
    name: "john.doe",
    email: "john.doe@mail.com",
};

/// `GET /html`
#[allow(clippy::unnecessary_wraps)]
pub fn html_handler(_req: &Request<Bytes>) -> HandlerResult {
    Ok(build_html_response(HELLO_HTML))
}

/// `GET /format-string`
#[allow(clippy::unnecessary_wraps)]
pub fn formatted_string_handler(_req: &Request<Bytes>) -> HandlerResult {
    Ok(build_text_response(format!("hello {}", "world")))
}

/// `GET /string`
#[allow(clippy::unnecessary_wraps)]
pub fn string_handler(_req: &Request<Bytes>) -> HandlerResult {
    Ok(build_text_response(Bytes::from_static(b"hello world")))
}

/// `GET /json`
pub fn json_handler(_req: &Request<Bytes>) -> HandlerResult {
    let body = http::json::to_vec(&CONTACT).map_err(HandlerError::Encode)?;
    Ok(build_json_response(StatusCode::OK, APPLICATION_JSON_UTF8, body))
}
