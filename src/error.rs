//! Per-request error type
//!
//! Handlers return `HandlerError` instead of aborting; the dispatcher turns it
//! into a JSON error response so a failure never leaves the request it
//! belongs to.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http::{build_413_response, build_json_error_response};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("form field `{0}` is required")]
    MissingField(&'static str),

    #[error("invalid JSON body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type HandlerResult = Result<Response<Full<Bytes>>, HandlerError>;

impl HandlerError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::Decode(_) | Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        match self {
            Self::PayloadTooLarge { limit } => build_413_response(limit),
            other => build_json_error_response(other.status(), &other.to_string()),
        }
    }
}
