//! Session cookie jar
//!
//! Unify keeps its session in cookies set by `login`. The session's HTTP
//! client stores every `Set-Cookie` in a [`Jar`] and replays the matching
//! cookies on later calls. Expired and deleted cookies leave the jar.

use reqwest::cookie::{CookieStore, Jar};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Cookie jar shared with the session's HTTP client
///
/// Reads are scoped to one request URL, the `saveReport` endpoint, so they
/// show what the next save will send.
#[derive(Clone)]
pub struct SessionCookies {
    jar: Arc<Jar>,
    url: Url,
}

impl SessionCookies {
    pub fn new(url: Url) -> Self {
        Self {
            jar: Arc::new(Jar::default()),
            url,
        }
    }

    /// Handle for [`reqwest::ClientBuilder::cookie_provider`]
    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Store one raw `Set-Cookie` value as if `url` had sent it
    ///
    /// Malformed values are ignored. `Max-Age=0` or a past `Expires` removes
    /// the cookie.
    pub fn merge_set_cookie(&self, raw: &str) {
        self.jar.add_cookie_str(raw, &self.url);
    }

    /// Value for the `Cookie` request header, `None` when nothing applies
    pub fn header_value(&self) -> Option<String> {
        self.jar
            .cookies(&self.url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.header_value()?.split("; ").find_map(|pair| {
            let (n, v) = pair.split_once('=')?;
            (n == name).then(|| v.to_string())
        })
    }

    pub fn len(&self) -> usize {
        self.header_value()
            .map(|header| header.split("; ").count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.header_value().is_none()
    }
}

impl fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookies")
            .field("url", &self.url.as_str())
            .field("cookies", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar() -> SessionCookies {
        SessionCookies::new(
            Url::parse("https://unify.example.com/reportbuilder/saveReport").unwrap(),
        )
    }

    #[test]
    fn test_attributes_are_not_replayed() {
        let jar = jar();
        jar.merge_set_cookie("JSESSIONID=abc123; Path=/reportbuilder; HttpOnly; Secure");
        assert_eq!(jar.get("JSESSIONID").as_deref(), Some("abc123"));
        assert_eq!(jar.header_value().as_deref(), Some("JSESSIONID=abc123"));
    }

    #[test]
    fn test_later_values_replace_earlier() {
        let jar = jar();
        jar.merge_set_cookie("JSESSIONID=first; Path=/");
        jar.merge_set_cookie("XSRF-TOKEN=tok; Path=/");
        jar.merge_set_cookie("JSESSIONID=second; Path=/");

        assert_eq!(jar.len(), 2);
        assert_eq!(jar.get("JSESSIONID").as_deref(), Some("second"));
        assert_eq!(jar.get("XSRF-TOKEN").as_deref(), Some("tok"));
    }

    #[test]
    fn test_max_age_zero_deletes_cookie() {
        let jar = jar();
        jar.merge_set_cookie("JSESSIONID=abc123; Path=/");
        jar.merge_set_cookie("JSESSIONID=; Max-Age=0; Path=/");

        assert!(jar.get("JSESSIONID").is_none());
        assert!(jar.header_value().is_none());
    }

    #[test]
    fn test_past_expiry_deletes_cookie() {
        let jar = jar();
        jar.merge_set_cookie("route=node2; Path=/");
        jar.merge_set_cookie("route=node2; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        assert!(jar.is_empty());
    }

    #[test]
    fn test_cookie_for_other_path_is_not_sent() {
        let jar = jar();
        jar.merge_set_cookie("admin=1; Path=/console");
        jar.merge_set_cookie("JSESSIONID=abc; Path=/");
        assert_eq!(jar.header_value().as_deref(), Some("JSESSIONID=abc"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let jar = jar();
        jar.merge_set_cookie("token=a=b==; Path=/");
        assert_eq!(jar.get("token").as_deref(), Some("a=b=="));
    }

    #[test]
    fn test_foreign_domain_ignored() {
        let jar = jar();
        jar.merge_set_cookie("tracker=1; Domain=other.example.org; Path=/");
        assert!(jar.is_empty());
        assert_eq!(jar.len(), 0);
    }

    #[test]
    fn test_debug_hides_values() {
        let jar = jar();
        jar.merge_set_cookie("JSESSIONID=secret-session; Path=/");
        let debug = format!("{jar:?}");
        assert!(!debug.contains("secret-session"));
    }
}
