use hyper::body::Bytes;
use hyper::{Request, StatusCode};

use crate::error::HandlerResult;
use crate::http::build_redirect_response;

const PROFILE_PATH: &str = "/profile";

/// `GET /redirect`
#[allow(clippy::unnecessary_wraps)]
pub fn redirect_handler(_req: &Request<Bytes>) -> HandlerResult {
    Ok(build_redirect_response(PROFILE_PATH, StatusCode::FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{body_string, content_type, get};

    #[tokio::test]
    async fn test_redirect_to_profile() {
        let resp = redirect_handler(&get("/redirect")).unwrap();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()["Location"], "/profile");
        assert_eq!(content_type(&resp), "text/html; charset=utf-8");
        assert_eq!(body_string(resp).await, "<a href=\"/profile\">Found</a>.\n\n");
    }
}
