//! Form post handler

use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use serde::Serialize;

use crate::error::{HandlerError, HandlerResult};
use crate::http::response::APPLICATION_JSON_UTF8;
use crate::http::{self, build_json_response, FormValues};
use crate::logger;

#[derive(Serialize)]
struct NameEcho<'a> {
    name: &'a str,
}

/// `POST /form`: echo the first `name` form value as JSON
pub fn form_handler(req: &Request<Bytes>) -> HandlerResult {
    let form = FormValues::from_request(req);

    let Some(name) = form.get("name") else {
        logger::log_warning("name is not defined");
        return Err(HandlerError::MissingField("name"));
    };

    let body = http::json::to_vec(&NameEcho { name }).map_err(HandlerError::Encode)?;
    Ok(build_json_response(StatusCode::OK, APPLICATION_JSON_UTF8, body))
}
