//! # Armature Extras Middleware
//!
//! Small pipeline middleware:
//!
//! - [`JsonpMiddleware`] wraps responses as `callback(body)` for `?callback=`
//! - [`BasicAuthMiddleware`] requires HTTP Basic credentials
//! - [`FormAuthMiddleware`] sends anonymous visitors of secured paths to a
//!   login page
//!
//! ```rust
//! use extras_core::MiddlewareChain;
//! use extras_middleware::{
//!     BasicAuthMiddleware, FormAuthConfig, FormAuthMiddleware, JsonpMiddleware,
//!     StaticCredentials,
//! };
//!
//! let mut chain = MiddlewareChain::new();
//! chain.use_middleware(JsonpMiddleware::new());
//! chain.use_middleware(BasicAuthMiddleware::new(
//!     "Protected",
//!     StaticCredentials::new().with_user("admin", "hunter2"),
//! ));
//! chain.use_middleware(
//!     FormAuthMiddleware::new(
//!         FormAuthConfig::default()
//!             .with_login_url("/login")
//!             .secure("/admin/"),
//!     )
//!     .unwrap(),
//! );
//! assert_eq!(chain.len(), 3);
//! ```

pub mod basic_auth;
pub mod error;
pub mod form_auth;
pub mod jsonp;

pub use basic_auth::{Authenticator, BasicAuthMiddleware, BasicCredentials, StaticCredentials};
pub use error::{MiddlewareError, Result};
pub use form_auth::{FormAuthConfig, FormAuthMiddleware};
pub use jsonp::{CALLBACK_PARAM, JsonpMiddleware};
