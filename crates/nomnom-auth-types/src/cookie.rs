//! Cookie builders for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session token.
pub const NOMNOM_SESSION: &str = "nomnom_session";

/// Session lifetime in seconds (7 days). Used for both the JWT `exp` and the cookie Max-Age.
pub const SESSION_TTL_SECS: u64 = 604_800;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use nomnom_auth_types::cookie::{set_session_cookie, NOMNOM_SESSION};
///
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), "example.com".to_string());
/// let cookie = jar.get(NOMNOM_SESSION).unwrap();
/// assert_eq!(cookie.value(), "token");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    jar.add(session_cookie(
        value,
        domain,
        Duration::seconds(SESSION_TTL_SECS as i64),
    ))
}

/// Expire the session cookie (Max-Age 0).
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use nomnom_auth_types::cookie::{clear_session_cookie, set_session_cookie, NOMNOM_SESSION};
///
/// let jar = set_session_cookie(CookieJar::new(), "t".to_string(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(NOMNOM_SESSION).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    jar.add(session_cookie(String::new(), domain, Duration::ZERO))
}

fn session_cookie(value: String, domain: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((NOMNOM_SESSION, value))
        .path("/")
        .domain(domain)
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}
