//! Anti-forgery token handling
//!
//! State-changing POST forms carry a `csrf_token` field that must match
//! the `csrf_token` cookie issued on GET pages. The cookie is HttpOnly
//! and SameSite=Lax; the token is random per session, not per request.

use axum::http::HeaderMap;

use crate::config::Config;

/// Cookie and form field name for the anti-forgery token
pub const CSRF_COOKIE: &str = "csrf_token";

const TOKEN_LEN: usize = 32;
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some((key, value)) = cookie.split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Generate a fresh random token (hex string)
pub fn generate_token() -> String {
    (0..TOKEN_LEN)
        .map(|_| HEX[fastrand::usize(..HEX.len())] as char)
        .collect()
}

/// Cookie header value for the token, with environment-dependent flags
pub fn build_cookie(token: &str, config: &Config) -> String {
    format!(
        "{}={}; Path=/; SameSite=Lax; HttpOnly{}{}",
        CSRF_COOKIE,
        token,
        config.cookie_domain_attr(),
        config.cookie_secure_flag()
    )
}

/// Token for the current request: the cookie value if present, otherwise
/// a fresh one that the response must set
///
/// Returns the token and whether it is new.
pub fn request_token(headers: &HeaderMap) -> (String, bool) {
    match extract_cookie(headers, CSRF_COOKIE).filter(|t| !t.is_empty()) {
        Some(token) => (token, false),
        None => (generate_token(), true),
    }
}

/// Check a submitted form token against the session cookie
pub fn verify(headers: &HeaderMap, form_token: &str) -> bool {
    match extract_cookie(headers, CSRF_COOKIE) {
        Some(cookie) => !cookie.is_empty() && cookie == form_token,
        None => false,
    }
}
