//! `last_city` and `user_id` cookies.

use axum::http::{HeaderMap, HeaderValue, header};
use tower_sessions::cookie::{Cookie, SameSite};

use crate::constants::cookies::{
    LAST_CITY, LAST_CITY_MAX_AGE_DAYS, USER_ID, USER_ID_MAX_AGE_DAYS,
};

/// Raw value of the first cookie named `name` across all `Cookie` headers.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Last searched city, percent-decoded. Undecodable values read as absent.
pub fn last_city(headers: &HeaderMap) -> Option<String> {
    let raw = read(headers, LAST_CITY)?;
    urlencoding::decode(&raw).ok().map(|city| city.into_owned())
}

/// Non-empty `user_id` cookie.
pub fn user_id(headers: &HeaderMap) -> Option<String> {
    read(headers, USER_ID).filter(|id| !id.is_empty())
}

pub fn last_city_cookie(city: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((LAST_CITY, urlencoding::encode(city).into_owned()))
        .path("/")
        .max_age(time::Duration::days(LAST_CITY_MAX_AGE_DAYS))
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub fn user_id_cookie(user_id: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((USER_ID, user_id.to_string()))
        .path("/")
        .max_age(time::Duration::days(USER_ID_MAX_AGE_DAYS))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .build()
}

/// Renders a cookie as a `Set-Cookie` header value.
pub fn header_value(cookie: &Cookie<'_>) -> Option<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string()).ok()
}
