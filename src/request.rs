//! Request-side boundary between the host framework and the resolver
//!
//! The host owns the real request/response objects; it hands the resolver a
//! [`RequestContext`] built from the parts this crate consumes (headers,
//! query/form parameters, cookies) and flushes the drained `Set-Cookie`
//! values onto its response. The resolved-locale memo lives here too, so it
//! is dropped with the request.

use std::collections::HashMap;

/// Per-request view of the negotiation inputs plus the resolution memo.
#[derive(Debug, Default)]
pub struct RequestContext {
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
    form_params: HashMap<String, String>,
    cookies: HashMap<String, String>,
    /// `Set-Cookie` header values produced while handling this request.
    set_cookies: Vec<String>,
    /// Resolved locale memo; set at most once per resolution pass.
    locale: Option<String>,
}

impl RequestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a request header. Names are stored lowercase.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Attach a query parameter.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Attach a request cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Parse a urlencoded form body into form parameters.
    /// A body that fails to parse contributes nothing.
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        if let Ok(pairs) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
            self.form_params.extend(pairs);
        }
        self
    }

    /// Get a header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Get a query parameter by name.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Get a form parameter by name.
    pub fn form(&self, name: &str) -> Option<&str> {
        self.form_params.get(name).map(|s| s.as_str())
    }

    /// Get a request cookie by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|s| s.as_str())
    }

    /// The resolved locale for this request, when already determined.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub(crate) fn memoize_locale(&mut self, key: String) {
        self.locale = Some(key);
    }

    pub(crate) fn push_set_cookie(&mut self, value: String) {
        self.set_cookies.push(value);
    }

    /// `Set-Cookie` values accumulated so far.
    pub fn set_cookies(&self) -> &[String] {
        &self.set_cookies
    }

    /// Drain the accumulated `Set-Cookie` values for the host to emit.
    pub fn take_set_cookies(&mut self) -> Vec<String> {
        std::mem::take(&mut self.set_cookies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let ctx = RequestContext::new().with_header("Accept-Language", "en");
        assert_eq!(ctx.header("accept-language"), Some("en"));
        assert_eq!(ctx.header("ACCEPT-LANGUAGE"), Some("en"));
        assert_eq!(ctx.header("cookie"), None);
    }

    #[test]
    fn form_body_parsing() {
        let ctx = RequestContext::new().with_form_body(b"locale=fr&name=jo%C3%ABlle");
        assert_eq!(ctx.form("locale"), Some("fr"));
        assert_eq!(ctx.form("name"), Some("joëlle"));
    }

    #[test]
    fn malformed_form_body_is_ignored() {
        let ctx = RequestContext::new().with_form_body(&[0xff, 0xfe]);
        assert_eq!(ctx.form("locale"), None);
    }

    #[test]
    fn set_cookie_drain() {
        let mut ctx = RequestContext::new();
        ctx.push_set_cookie("locale=en; Path=/".to_string());
        assert_eq!(ctx.set_cookies().len(), 1);
        let drained = ctx.take_set_cookies();
        assert_eq!(drained.len(), 1);
        assert!(ctx.set_cookies().is_empty());
    }
}
