//! Session-cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::SESSION_TOKEN_EXP;

/// Cookie name for the session token.
pub const MERCATO_SESSION: &str = "mercato_session";

/// Set the session-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use mercato_auth_types::cookie::{set_session_cookie, MERCATO_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(MERCATO_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(14400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((MERCATO_SESSION, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_TOKEN_EXP as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use mercato_auth_types::cookie::{clear_session_cookie, set_session_cookie, MERCATO_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "a".to_string(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(MERCATO_SESSION).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((MERCATO_SESSION, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
