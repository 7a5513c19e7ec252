use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState, ErrorQuery, WeatherForm, cookies};
use crate::constants::messages;

/// `GET /`
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let last_city = cookies::last_city(&headers);
    Ok(Html(state.views().index_page(last_city.as_deref())?))
}

/// `POST /weather`
///
/// Blank input goes back to the home page. On success both cookies are
/// refreshed.
pub async fn weather(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<WeatherForm>,
) -> Result<Response, ApiError> {
    let existing_user_id = cookies::user_id(&headers);
    let outcome = state.lookup().lookup(&form.city, existing_user_id).await?;
    let page = state.views().weather_page(&outcome.weather)?;

    let secure = state.config().server.secure_cookies;
    let set_cookies = [
        cookies::last_city_cookie(&outcome.city, secure),
        cookies::user_id_cookie(&outcome.user_id, secure),
    ]
    .iter()
    .filter_map(cookies::header_value)
    .map(|value| (header::SET_COOKIE, value))
    .collect::<Vec<_>>();

    Ok((AppendHeaders(set_cookies), Html(page)).into_response())
}

/// `GET /history`
pub async fn history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(user_id) = cookies::user_id(&headers) else {
        return Ok(Redirect::to("/").into_response());
    };

    let entries = state.store().get_user_history(&user_id).await;
    Ok(Html(state.views().history_page(&entries)?).into_response())
}

/// `GET /error`
pub async fn error_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ErrorQuery>,
) -> Result<Html<String>, ApiError> {
    let message = query
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| messages::DEFAULT_ERROR.to_string());
    Ok(Html(state.views().error_page(&message)?))
}
