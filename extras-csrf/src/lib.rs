//! # Armature Extras CSRF Guard
//!
//! Session-bound, single-use anti-forgery tokens.
//!
//! Every request gets a token stored in its session under the configured
//! key. `POST`, `PUT` and `DELETE` requests must echo it back, either as the
//! form field of the same name or through the `X-CSRFToken` header. A
//! matching token is consumed; a missing or wrong one halts the request with
//! `400 Invalid or missing CSRF token.`
//!
//! ## Quick Start
//!
//! ```rust
//! use extras_core::MiddlewareChain;
//! use extras_csrf::{CsrfConfig, CsrfGuard};
//!
//! let guard = CsrfGuard::new(CsrfConfig::default().with_key("_token")).unwrap();
//!
//! let mut chain = MiddlewareChain::new();
//! guard.attach(&mut chain);
//! ```
//!
//! ## Checking by hand
//!
//! ```rust
//! use extras_core::{HttpRequest, Session, ViewData};
//! use extras_csrf::{CsrfConfig, CsrfError, CsrfGuard};
//! use std::time::Duration;
//!
//! let guard = CsrfGuard::new(CsrfConfig::default()).unwrap();
//! let mut session = Session::start(Duration::from_secs(3600));
//! let mut view = ViewData::new();
//!
//! // A GET issues the token and exposes it to templates
//! guard.check(&HttpRequest::new("GET", "/form"), &mut session, &mut view).unwrap();
//! let token = view.get_str("csrf_token").unwrap().to_string();
//!
//! // The form post carries it back once
//! let post = HttpRequest::new("POST", "/form").with_form(&[("csrf_token", token.as_str())]);
//! assert!(guard.check(&post, &mut session, &mut ViewData::new()).is_ok());
//!
//! // Replaying it fails
//! assert_eq!(
//!     guard.check(&post, &mut session, &mut ViewData::new()),
//!     Err(CsrfError::TokenMismatch)
//! );
//! ```
//!
//! Templates embed the token with something like
//! `<input type="hidden" name="{{ csrf_key }}" value="{{ csrf_token }}">`.

pub mod config;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod token;

pub use config::CsrfConfig;
pub use error::{CsrfError, INVALID_TOKEN_MESSAGE, Result};
pub use guard::CsrfGuard;
pub use middleware::CsrfMiddleware;
pub use token::CsrfToken;
