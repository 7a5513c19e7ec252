use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{AppState, CitiesQuery};
use crate::db::CityStat;

/// `GET /api/cities?q=`
///
/// Known city names containing `q`, for the search box autocomplete.
pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CitiesQuery>,
) -> Json<Vec<String>> {
    Json(state.store().autocomplete_cities(&query.q).await)
}

/// `GET /api/stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<Vec<CityStat>> {
    Json(state.store().get_city_stats().await)
}
