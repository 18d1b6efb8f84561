//! JSON create handler

use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::error::{HandlerError, HandlerResult};
use crate::http::build_json_response;
use crate::http::response::APPLICATION_JSON;
use crate::logger;

/// Payload accepted by `/create`
///
/// Keys match `name` ignoring ASCII case and the last one wins; a `null`
/// value leaves the field as it was. Other keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ModelVisitor)
    }
}

struct ModelVisitor;

impl<'de> Visitor<'de> for ModelVisitor {
    type Value = Model;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Model, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut model = Model::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("name") {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    model.name = name;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(model)
    }
}

/// Decode the first JSON value in `body`; trailing bytes are not inspected.
/// A top-level `null` decodes to the default model.
pub fn decode_model(body: &[u8]) -> Result<Model, serde_json::Error> {
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<Option<Model>>();
    match stream.next() {
        Some(result) => result.map(Option::unwrap_or_default),
        None => Err(de::Error::custom("empty request body")),
    }
}

/// `POST /create`
pub fn post_create_handler(req: &Request<Bytes>) -> HandlerResult {
    let model = decode_model(req.body()).map_err(|e| {
        logger::log_warning(&format!("Error decoding create payload: {e}"));
        HandlerError::Decode(e)
    })?;

    tracing::debug!(name = %model.name, "Create request accepted");
    Ok(build_json_response(StatusCode::CREATED, APPLICATION_JSON, r#"{"ok":true}"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{body_string, content_type, post};

    #[tokio::test]
    async fn test_create_accepts_product() {
        let req = post(
            "/create",
            "application/json; charset=utf-8",
            r#"{"name":"test product","price":11.22}"#,
        );
        let resp = post_create_handler(&req).unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(content_type(&resp), "application/json");
        assert_eq!(body_string(resp).await, r#"{"ok":true}"#);
    }

    #[test]
    fn test_decode_model() {
        assert_eq!(
            decode_model(br#"{"name":"test product","price":11.22}"#).unwrap(),
            Model {
                name: "test product".to_string()
            }
        );
        assert_eq!(decode_model(b"{}").unwrap(), Model::default());
        assert_eq!(decode_model(br#"{"name":null}"#).unwrap(), Model::default());
    }

    #[test]
    fn test_decode_reads_only_first_value() {
        let model = decode_model(br#" {"name":"a"} trailing garbage"#).unwrap();
        assert_eq!(model.name, "a");
    }

    #[test]
    fn test_decode_top_level_null() {
        assert_eq!(decode_model(b"null").unwrap(), Model::default());
        assert_eq!(decode_model(b" null {}").unwrap(), Model::default());
    }

    #[test]
    fn test_decode_duplicate_keys_last_wins() {
        assert_eq!(decode_model(br#"{"name":"a","name":"b"}"#).unwrap().name, "b");
        assert_eq!(decode_model(br#"{"name":"a","name":null}"#).unwrap().name, "a");
    }

    #[test]
    fn test_decode_key_case_insensitive() {
        assert_eq!(decode_model(br#"{"Name":"x"}"#).unwrap().name, "x");
        assert_eq!(decode_model(br#"{"NAME":"a","name":"b"}"#).unwrap().name, "b");
        assert_eq!(decode_model(br#"{"name":"a","nAmE":"c"}"#).unwrap().name, "c");
    }

    #[test]
    fn test_decode_ignores_nested_unknown_fields() {
        let body = br#"{"price":11.22,"tags":["a",{"name":"nested"}],"name":"top"}"#;
        assert_eq!(decode_model(body).unwrap().name, "top");
    }

    #[tokio::test]
    async fn test_create_accepts_null_body() {
        let resp = post_create_handler(&post("/create", "application/json", "null")).unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(body_string(resp).await, r#"{"ok":true}"#);
    }

    #[test]
    fn test_decode_failures() {
        assert!(decode_model(b"").is_err());
        assert!(decode_model(b"   ").is_err());
        assert!(decode_model(b"{\"name\":").is_err());
        assert!(decode_model(br#"{"name":42}"#).is_err());
        assert!(decode_model(b"[1,2]").is_err());
        assert!(decode_model(b"42").is_err());
        assert!(decode_model(br#""name""#).is_err());
        assert!(decode_model(br#"{"NAME":true}"#).is_err());
    }

    #[test]
    fn test_create_rejects_malformed_json() {
        let req = post("/create", "application/json", "{not json");
        let err = post_create_handler(&req).unwrap_err();
        assert!(matches!(err, HandlerError::Decode(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
