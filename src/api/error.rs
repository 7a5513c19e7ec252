use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;
use std::sync::Arc;

use super::AppState;
use crate::constants::messages;
use crate::services::LookupError;

/// Failures rendered as HTML error pages.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    UpstreamUnavailable(String),

    DatabaseError(String),

    InternalError(String),

    /// Input that cannot be looked up sends the user back to the search form.
    RedirectHome,
}

/// User-facing message attached to an error response, rendered into the
/// error page by [`render_error_pages`].
#[derive(Clone, Debug)]
pub struct ErrorPage(pub String);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::UpstreamUnavailable(msg) => write!(f, "Upstream unavailable: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Self::RedirectHome => write!(f, "Redirect to home page"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::UpstreamUnavailable(msg) => {
                tracing::warn!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::INTERNAL_ERROR.to_string(),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::INTERNAL_ERROR.to_string(),
                )
            }
            Self::RedirectHome => return Redirect::to("/").into_response(),
        };

        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorPage(message));
        response
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<handlebars::RenderError> for ApiError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::InternalError(format!("Template rendering failed: {err}"))
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::CityNotFound(_) => Self::NotFound(err.to_string()),
            LookupError::WeatherUnavailable => {
                Self::UpstreamUnavailable(messages::WEATHER_UNAVAILABLE.to_string())
            }
            LookupError::Storage(e) => Self::DatabaseError(format!("{e:#}")),
            LookupError::EmptyCity => Self::RedirectHome,
        }
    }
}

/// Swaps the plain-text body of an [`ApiError`] response for the error page.
/// Falls back to the plain-text body if the template fails.
pub async fn render_error_pages(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    let Some(ErrorPage(message)) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    match state.views().error_page(&message) {
        Ok(html) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            parts.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
            (parts, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_map_to_status() {
        let response = ApiError::from(LookupError::CityNotFound("Atlantis".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.0, "City 'Atlantis' not found");

        let response = ApiError::from(LookupError::WeatherUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response =
            ApiError::from(LookupError::Storage(anyhow::anyhow!("disk full"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.0, messages::INTERNAL_ERROR);
    }

    #[test]
    fn test_empty_city_redirects_home() {
        let response = ApiError::from(LookupError::EmptyCity).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        assert!(response.extensions().get::<ErrorPage>().is_none());
    }
}
