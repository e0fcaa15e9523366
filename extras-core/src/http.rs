// HTTP request and response types

use crate::session::SessionHandle;
use crate::view::ViewData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP request wrapper
///
/// `root_uri` is the mount point of the application (the script name in CGI
/// terms) and `path` is the resource path below it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub root_uri: String,
    pub scheme: String,
    pub port: u16,
    pub remote_addr: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub query_params: HashMap<String, String>,
    pub session: Option<SessionHandle>,
    pub view_data: ViewData,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into().to_uppercase(),
            path: path.into(),
            root_uri: String::new(),
            scheme: "http".to_string(),
            port: 80,
            remote_addr: None,
            headers: HashMap::new(),
            body: Vec::new(),
            query_params: HashMap::new(),
            session: None,
            view_data: ViewData::default(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set an `application/x-www-form-urlencoded` body.
    pub fn with_form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = serde_urlencoded::to_string(fields)
            .unwrap_or_default()
            .into_bytes();
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_root_uri(mut self, root_uri: impl Into<String>) -> Self {
        self.root_uri = root_uri.into();
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Parse the request body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, crate::Error> {
        serde_json::from_slice(&self.body)
            .map_err(|e| crate::Error::Deserialization(e.to_string()))
    }

    /// Get a query parameter by name
    pub fn query(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Look up a header, ignoring case and `-`/`_` differences.
    ///
    /// `X-CSRFToken`, `x-csrftoken`, `X_CSRFTOKEN` and the CGI spelling
    /// `HTTP_X_CSRFTOKEN` all resolve to the same header.
    pub fn header(&self, name: &str) -> Option<&String> {
        let wanted = normalize_header_name(name);
        self.headers.iter().find_map(|(key, value)| {
            let key = normalize_header_name(key);
            let key = key.strip_prefix("HTTP_").unwrap_or(&key);
            (key == wanted || key == wanted.strip_prefix("HTTP_").unwrap_or(&wanted))
                .then_some(value)
        })
    }

    /// Get a field from the request body.
    ///
    /// JSON object bodies are tried first, then url-encoded form data.
    pub fn form_field(&self, name: &str) -> Option<String> {
        if let Ok(serde_json::Value::Object(map)) =
            serde_json::from_slice::<serde_json::Value>(&self.body)
        {
            return map.get(name).and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            });
        }

        serde_urlencoded::from_bytes::<Vec<(String, String)>>(&self.body)
            .ok()?
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Normalize a header name the way CGI environments do: upper-case and
/// `-` replaced by `_`.
pub fn normalize_header_name(name: &str) -> String {
    name.to_uppercase().replace('-', "_")
}

/// HTTP response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn bad_request() -> Self {
        Self::new(400)
    }

    pub fn unauthorized() -> Self {
        Self::new(401)
    }

    pub fn internal_server_error() -> Self {
        Self::new(500)
    }

    /// A `302 Found` redirect to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::new(302).with_header("Location", location)
    }

    /// Stop request processing with a status and a plain-text body.
    pub fn halt(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(body.into().into_bytes())
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_text(self, body: &str) -> Self {
        self.with_body(body.as_bytes().to_vec())
    }

    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body =
            serde_json::to_vec(value).map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Get a header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Replace a header regardless of the casing it was stored with.
    pub fn set_header(&mut self, key: &str, value: impl Into<String>) {
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
        self.headers.insert(key.to_string(), value.into());
    }

    /// The body as UTF-8 text, lossily decoded.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_is_uppercased() {
        let req = HttpRequest::new("post", "/submit");
        assert_eq!(req.method, "POST");
    }

    #[test]
    fn test_header_normalization() {
        let req = HttpRequest::new("GET", "/").with_header("x-csrftoken", "abc");
        assert_eq!(req.header("X-CSRFToken"), Some(&"abc".to_string()));
        assert_eq!(req.header("X_CSRFTOKEN"), Some(&"abc".to_string()));

        let cgi = HttpRequest::new("GET", "/").with_header("HTTP_X_CSRFTOKEN", "def");
        assert_eq!(cgi.header("X-CSRFToken"), Some(&"def".to_string()));
    }

    #[test]
    fn test_form_field_urlencoded() {
        let req = HttpRequest::new("POST", "/").with_form(&[("name", "a b"), ("csrf_token", "t")]);
        assert_eq!(req.form_field("name"), Some("a b".to_string()));
        assert_eq!(req.form_field("csrf_token"), Some("t".to_string()));
        assert_eq!(req.form_field("missing"), None);
    }

    #[test]
    fn test_form_field_json() {
        let req = HttpRequest::new("POST", "/").with_body(r#"{"csrf_token":"t","n":3}"#);
        assert_eq!(req.form_field("csrf_token"), Some("t".to_string()));
        assert_eq!(req.form_field("n"), Some("3".to_string()));
    }

    #[test]
    fn test_halt_response() {
        let res = HttpResponse::halt(400, "stop");
        assert_eq!(res.status, 400);
        assert_eq!(res.body_text(), "stop");
        assert_eq!(
            res.header("content-type"),
            Some(&"text/plain; charset=utf-8".to_string())
        );
    }

    #[test]
    fn test_set_header_replaces_any_casing() {
        let mut res = HttpResponse::ok().with_header("content-type", "text/html");
        res.set_header("Content-Type", "application/javascript");
        assert_eq!(res.headers.len(), 1);
        assert_eq!(
            res.header("CONTENT-TYPE"),
            Some(&"application/javascript".to_string())
        );
    }
}
