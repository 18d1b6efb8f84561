//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! handlers: response builders, URL-encoded form decoding and JSON encoding.

pub mod form;
pub mod json;
pub mod response;

// Re-export commonly used types
pub use form::FormValues;
pub use response::{
    build_404_response, build_405_response, build_413_response, build_html_response,
    build_json_error_response, build_json_response, build_redirect_response,
    build_text_response, strip_body,
};
