//! JSONP response wrapping.

use async_trait::async_trait;
use extras_core::{Error, HttpRequest, HttpResponse, Middleware, Next};
use tracing::trace;

/// Query parameter naming the callback.
pub const CALLBACK_PARAM: &str = "callback";

/// Wraps the response body in a JavaScript callback when the request names
/// one with `?callback=`.
#[derive(Debug, Clone, Default)]
pub struct JsonpMiddleware;

impl JsonpMiddleware {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Middleware for JsonpMiddleware {
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, Error> {
        let callback = req
            .query(CALLBACK_PARAM)
            .filter(|callback| !callback.is_empty())
            .cloned();

        let mut response = next(req).await?;

        if let Some(callback) = callback {
            trace!(callback = %callback, "Wrapping response as JSONP");
            let mut body = escape_callback(&callback).into_bytes();
            body.push(b'(');
            body.append(&mut response.body);
            body.push(b')');
            response.body = body;
            response.set_header("Content-Type", "application/javascript");
        }

        Ok(response)
    }
}

/// Escape markup characters in the callback name.
fn escape_callback(callback: &str) -> String {
    callback
        .chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#039;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use extras_core::{MiddlewareChain, handler};

    fn chain() -> MiddlewareChain {
        let mut chain = MiddlewareChain::new();
        chain.use_middleware(JsonpMiddleware::new());
        chain
    }

    fn json_handler() -> extras_core::HandlerFn {
        handler(|_req: HttpRequest| async move {
            Ok(HttpResponse::ok()
                .with_header("Content-Type", "application/json")
                .with_text("{\"id\":1}"))
        })
    }

    #[tokio::test]
    async fn test_wraps_body_with_callback() {
        let req = HttpRequest::new("GET", "/items").with_query("callback", "render");
        let response = chain().apply(req, json_handler()).await.unwrap();

        assert_eq!(response.body_text(), "render({\"id\":1})");
        assert_eq!(
            response.header("content-type").map(String::as_str),
            Some("application/javascript")
        );
    }

    #[tokio::test]
    async fn test_untouched_without_callback() {
        let req = HttpRequest::new("GET", "/items");
        let response = chain().apply(req, json_handler()).await.unwrap();

        assert_eq!(response.body_text(), "{\"id\":1}");
        assert_eq!(
            response.header("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_empty_callback_ignored() {
        let req = HttpRequest::new("GET", "/items").with_query("callback", "");
        let response = chain().apply(req, json_handler()).await.unwrap();
        assert_eq!(response.body_text(), "{\"id\":1}");
    }

    #[test]
    fn test_callback_escaped() {
        assert_eq!(escape_callback("a<b>\"c\""), "a&lt;b&gt;&quot;c&quot;");
    }
}
