//! Query parameter handler

use hyper::body::Bytes;
use hyper::{Request, StatusCode};

use crate::error::HandlerResult;
use crate::http::response::APPLICATION_JSON_UTF8;
use crate::http::{build_json_response, FormValues};

/// `page` as an integer; anything unparsable counts as 0
fn page_number<B>(req: &Request<B>) -> i64 {
    FormValues::from_query(req)
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(0)
}

/// `GET /get`
#[allow(clippy::unnecessary_wraps)]
pub fn get_handler(req: &Request<Bytes>) -> HandlerResult {
    let body: &'static str = if page_number(req) == 1 {
        r#"{"page":1}"#
    } else {
        r#"{"alive": true}"#
    };
    Ok(build_json_response(StatusCode::OK, APPLICATION_JSON_UTF8, body))
}
