//! Request handler module
//!
//! Responsible for the routing table, request dispatch and the handler set.
//! Every handler is a stateless function of the collected request.

pub mod content;
pub mod create;
pub mod dispatch;
pub mod form;
pub mod query;
pub mod redirect;
pub mod router;

// Re-export main entry point
pub use dispatch::{handle_request, self_check};
pub use router::{Resolution, Router};

/// Build the routing table served by the application
pub fn routes() -> Router {
    Router::new()
        .get("/html", content::html_handler)
        .get("/format-string", content::formatted_string_handler)
        .get("/string", content::string_handler)
        .get("/json", content::json_handler)
        .post("/form", form::form_handler)
        .get("/get", query::get_handler)
        .post("/create", create::post_create_handler)
        .get("/redirect", redirect::redirect_handler)
}


#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    #[test]
    fn test_routes_table() {
        let router = routes();
        assert_eq!(
            router.paths(),
            vec![
                "/create",
                "/form",
                "/format-string",
                "/get",
                "/html",
                "/json",
                "/redirect",
                "/string",
            ]
        );
        for path in ["/html", "/format-string", "/string", "/json", "/get", "/redirect"] {
            assert!(matches!(router.resolve(&Method::GET, path), Resolution::Found(_)));
        }
        for path in ["/form", "/create"] {
            assert!(matches!(router.resolve(&Method::POST, path), Resolution::Found(_)));
            assert!(matches!(
                router.resolve(&Method::GET, path),
                Resolution::MethodNotAllowed(_)
            ));
        }
    }
}
