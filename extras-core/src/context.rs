//! Read-only view of the current request.
//!
//! Add-ons depend on this narrow capability instead of a concrete request
//! type, so hosts can adapt their own request objects.

use crate::http::HttpRequest;

/// Request accessors used by the CSRF guard and the request-annotated log
/// writer.
pub trait RequestContext {
    /// HTTP method, upper-case.
    fn method(&self) -> &str;

    /// A field from the submitted body, by name.
    fn body_field(&self, name: &str) -> Option<String>;

    /// A header, looked up by its normalized (`X_CSRFTOKEN`-style) name.
    fn header(&self, name: &str) -> Option<String>;

    /// Mount point of the application.
    fn root_uri(&self) -> String;

    /// Path below the mount point.
    fn resource_uri(&self) -> String;

    fn content_type(&self) -> Option<String> {
        self.header("Content-Type")
    }

    /// Content type without its parameters, lower-cased.
    fn media_type(&self) -> Option<String> {
        self.content_type().and_then(|ct| {
            let media = ct.split(';').next()?.trim().to_lowercase();
            (!media.is_empty()).then_some(media)
        })
    }

    /// The `charset` parameter of the content type.
    fn content_charset(&self) -> Option<String> {
        self.content_type().and_then(|ct| {
            ct.split(';').skip(1).find_map(|param| {
                let (name, value) = param.split_once('=')?;
                name.trim()
                    .eq_ignore_ascii_case("charset")
                    .then(|| value.trim().trim_matches('"').to_lowercase())
            })
        })
    }

    fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|len| len.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Host name without the port.
    fn host(&self) -> String;

    fn port(&self) -> u16;

    fn host_with_port(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    fn scheme(&self) -> String;

    /// Root URI followed by the resource URI.
    fn path(&self) -> String {
        format!("{}{}", self.root_uri(), self.resource_uri())
    }

    /// Scheme and host, with the port only when it is not the default one.
    fn url(&self) -> String {
        let scheme = self.scheme();
        let port = self.port();
        let default_port = matches!((scheme.as_str(), port), ("https", 443) | ("http", 80));
        if default_port {
            format!("{}://{}", scheme, self.host())
        } else {
            format!("{}://{}:{}", scheme, self.host(), port)
        }
    }

    /// Client address, honouring proxy headers.
    fn ip(&self) -> Option<String>;

    fn referer(&self) -> Option<String> {
        self.header("Referer")
    }

    fn user_agent(&self) -> Option<String> {
        self.header("User-Agent")
    }
}

impl RequestContext for HttpRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn body_field(&self, name: &str) -> Option<String> {
        self.form_field(name)
    }

    fn header(&self, name: &str) -> Option<String> {
        HttpRequest::header(self, name).cloned()
    }

    fn root_uri(&self) -> String {
        self.root_uri.clone()
    }

    fn resource_uri(&self) -> String {
        self.path.clone()
    }

    fn host(&self) -> String {
        match HttpRequest::header(self, "Host") {
            Some(host) => match host.rsplit_once(':') {
                // Leave bracketed IPv6 literals without a port alone
                Some((name, port)) if !port.contains(']') => name.to_string(),
                _ => host.clone(),
            },
            None => "localhost".to_string(),
        }
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn scheme(&self) -> String {
        self.scheme.clone()
    }

    fn ip(&self) -> Option<String> {
        HttpRequest::header(self, "X-Forwarded-For")
            .and_then(|chain| chain.split(',').next().map(|ip| ip.trim().to_string()))
            .filter(|ip| !ip.is_empty())
            .or_else(|| HttpRequest::header(self, "Client-Ip").cloned())
            .or_else(|| self.remote_addr.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest::new("GET", "/users/7")
            .with_root_uri("/app")
            .with_header("Host", "example.com:8080")
            .with_header("Content-Type", "text/html; charset=UTF-8")
            .with_header("Content-Length", "42")
            .with_port(8080)
            .with_remote_addr("10.0.0.1")
    }

    #[test]
    fn test_uri_accessors() {
        let req = request();
        assert_eq!(req.root_uri(), "/app");
        assert_eq!(req.resource_uri(), "/users/7");
        assert_eq!(RequestContext::path(&req), "/app/users/7");
        assert_eq!(req.url(), "http://example.com:8080");
    }

    #[test]
    fn test_host_accessors() {
        let req = request();
        assert_eq!(req.host(), "example.com");
        assert_eq!(req.host_with_port(), "example.com:8080");
    }

    #[test]
    fn test_content_accessors() {
        let req = request();
        assert_eq!(req.media_type(), Some("text/html".to_string()));
        assert_eq!(req.content_charset(), Some("utf-8".to_string()));
        assert_eq!(req.content_length(), 42);
    }

    #[test]
    fn test_ip_prefers_forwarded_header() {
        let req = request();
        assert_eq!(req.ip(), Some("10.0.0.1".to_string()));

        let proxied = request().with_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1");
        assert_eq!(proxied.ip(), Some("203.0.113.9".to_string()));
    }

    #[test]
    fn test_default_port_omitted_from_url() {
        let req = HttpRequest::new("GET", "/")
            .with_header("Host", "example.com")
            .with_scheme("https")
            .with_port(443);
        assert_eq!(req.url(), "https://example.com");
    }
}
