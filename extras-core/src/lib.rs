// Core capabilities for the Armature extras.
// Everything the add-ons need from the host pipeline lives here: the request
// and response wrappers, the session and view contracts, and the middleware chain.

pub mod context;
pub mod error;
pub mod http;
pub mod middleware;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use context::RequestContext;
pub use error::{Error, Result};
pub use http::{HttpRequest, HttpResponse};
pub use middleware::{HandlerFn, Middleware, MiddlewareChain, Next, handler};
pub use session::{Session, SessionHandle, SessionStore, generate_session_id};
pub use view::{ViewContext, ViewData};
