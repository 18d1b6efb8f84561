//! URL-encoded form and query decoding
//!
//! Decodes `key=value&key2=value2` text into an ordered multimap. Segments
//! with a malformed escape are skipped rather than failing the whole input.

use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::Request;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Ordered `key -> [values]` multimap
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    /// Decode URL-encoded text
    pub fn parse(input: &[u8]) -> Self {
        let pairs = input
            .split(|b| *b == b'&')
            .filter(|segment| !segment.is_empty() && !segment.contains(&b';'))
            .filter_map(|segment| {
                let (key, value) = match segment.iter().position(|b| *b == b'=') {
                    Some(eq) => (&segment[..eq], &segment[eq + 1..]),
                    None => (segment, &b""[..]),
                };
                Some((decode_component(key)?, decode_component(value)?))
            })
            .collect();
        Self { pairs }
    }

    /// Form values of a request: the URL-encoded body (when the content type
    /// says so) followed by the query string values
    pub fn from_request(req: &Request<Bytes>) -> Self {
        let mut values = if is_form_urlencoded(req) {
            Self::parse(req.body())
        } else {
            Self::default()
        };
        values.append(Self::from_query(req));
        values
    }

    /// Query string values of a request
    pub fn from_query<B>(req: &Request<B>) -> Self {
        req.uri()
            .query()
            .map_or_else(Self::default, |q| Self::parse(q.as_bytes()))
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored under `key`, in input order
    #[cfg(test)]
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, other: Self) {
        self.pairs.extend(other.pairs);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn is_form_urlencoded<B>(req: &Request<B>) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// `+` is a space and every `%` must start a two-digit hex escape.
/// Decoded bytes that are not UTF-8 become U+FFFD.
fn decode_component(raw: &[u8]) -> Option<String> {
    if !has_valid_escapes(raw) {
        return None;
    }
    let spaced: Vec<u8> = raw
        .iter()
        .map(|b| if *b == b'+' { b' ' } else { *b })
        .collect();
    let decoded = urlencoding::decode_binary(&spaced);
    Some(String::from_utf8_lossy(&decoded).into_owned())
}

fn has_valid_escapes(raw: &[u8]) -> bool {
    let mut rest = raw;
    while let Some(pct) = rest.iter().position(|b| *b == b'%') {
        match rest.get(pct + 1..pct + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                rest = &rest[pct + 3..];
            }
            _ => return false,
        }
    }
    true
}
