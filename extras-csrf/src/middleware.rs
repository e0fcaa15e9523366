use crate::error::{CsrfError, INVALID_TOKEN_MESSAGE};
use crate::guard::CsrfGuard;
use async_trait::async_trait;
use extras_core::{Error, HttpRequest, HttpResponse, Middleware, MiddlewareChain, Next};
use std::sync::Arc;

/// CSRF protection middleware
///
/// Runs the guard before the handler: a protected request without the
/// session token is halted with `400 Invalid or missing CSRF token.`,
/// everything else continues with the token data merged into the request's
/// view data.
#[derive(Clone)]
pub struct CsrfMiddleware {
    guard: Arc<CsrfGuard>,
}

impl CsrfMiddleware {
    /// Create new CSRF middleware
    pub fn new(guard: CsrfGuard) -> Self {
        Self {
            guard: Arc::new(guard),
        }
    }

    pub fn guard(&self) -> &CsrfGuard {
        &self.guard
    }
}

#[async_trait]
impl Middleware for CsrfMiddleware {
    async fn handle(&self, mut req: HttpRequest, next: Next) -> Result<HttpResponse, Error> {
        let Some(mut session) = req.session.clone() else {
            return Err(CsrfError::SessionRequired.into());
        };

        let mut view = std::mem::take(&mut req.view_data);
        match self.guard.check(&req, &mut session, &mut view) {
            Ok(()) => {}
            Err(CsrfError::TokenMismatch) => {
                return Ok(HttpResponse::halt(400, INVALID_TOKEN_MESSAGE));
            }
            Err(other) => return Err(other.into()),
        }
        req.view_data = view;

        next(req).await
    }
}

impl CsrfGuard {
    /// Register the guard on a middleware chain so it runs before routing.
    pub fn attach(self, chain: &mut MiddlewareChain) {
        chain.use_middleware(CsrfMiddleware::new(self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CsrfConfig;
    use extras_core::{Session, SessionStore, handler};
    use std::time::Duration;

    fn chain() -> MiddlewareChain {
        let mut chain = MiddlewareChain::new();
        CsrfGuard::new(CsrfConfig::default())
            .unwrap()
            .attach(&mut chain);
        chain
    }

    fn echo_token() -> extras_core::HandlerFn {
        handler(|req: HttpRequest| async move {
            let token = req.view_data.get_str("csrf_token").unwrap_or_default().to_string();
            Ok(HttpResponse::ok().with_text(&token))
        })
    }

    #[tokio::test]
    async fn test_get_issues_token() {
        let session: extras_core::SessionHandle = Session::start(Duration::from_secs(60)).into();
        let req = HttpRequest::new("GET", "/form").with_session(session.clone());

        let res = chain().apply(req, echo_token()).await.unwrap();

        assert_eq!(res.status, 200);
        assert_eq!(Some(res.body_text()), session.get_string("csrf_token"));
    }

    #[tokio::test]
    async fn test_missing_session_is_an_error() {
        let err = chain()
            .apply(HttpRequest::new("GET", "/"), echo_token())
            .await
            .unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_post_without_token_halts() {
        let session: extras_core::SessionHandle = Session::start(Duration::from_secs(60)).into();
        let req = HttpRequest::new("POST", "/submit").with_session(session);

        let res = chain().apply(req, echo_token()).await.unwrap();

        assert_eq!(res.status, 400);
        assert_eq!(res.body_text(), "Invalid or missing CSRF token.");
    }
}
