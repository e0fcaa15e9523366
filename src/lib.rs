// Armature Extras - add-ons for Armature applications
//
// A session-bound CSRF guard, date-rotated log writers, and small pipeline
// middleware, built on shared request, session and view capabilities.

// Re-export core functionality
pub use extras_core::*;

// Re-export optional crates
#[cfg(feature = "csrf")]
pub use extras_csrf;

#[cfg(feature = "log")]
pub use extras_log;

#[cfg(feature = "middleware")]
pub use extras_middleware;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Error, HttpRequest, HttpResponse, Middleware, MiddlewareChain, RequestContext, Session,
        SessionHandle, SessionStore, ViewContext, ViewData, handler,
    };

    #[cfg(feature = "csrf")]
    pub use extras_csrf::{CsrfConfig, CsrfError, CsrfGuard, CsrfMiddleware};

    #[cfg(feature = "log")]
    pub use extras_log::{
        DateTimeFileWriter, HtmlFileWriter, LogRecord, LogWriter, LogWriterBridge, Severity,
        UserControlFileWriter, WriterSettings,
    };

    #[cfg(feature = "middleware")]
    pub use extras_middleware::{
        BasicAuthMiddleware, FormAuthConfig, FormAuthMiddleware, JsonpMiddleware,
    };
}
