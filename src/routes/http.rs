//! HTTP endpoint handlers: read-only views the setup screen needs before a
//! session exists. Games themselves run over the WebSocket.

use std::sync::Arc;
use axum::{extract::{Query, State}, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::catalog::{count_of, list_by_region, region_filters, RegionFilter};
use crate::error::QuizError;
use crate::hints::MAX_HINT_LEVEL;
use crate::protocol::*;
use crate::scoring::HINT_SCORES;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_regions() -> impl IntoResponse {
  let regions: Vec<RegionOut> = region_filters()
    .into_iter()
    .map(|f| RegionOut { id: f.id(), name: f.display_name(), count: count_of(f) })
    .collect();
  Json(regions)
}

#[instrument(level = "info", skip(state), fields(region = ?q.region))]
pub async fn http_countries(
  State(state): State<Arc<AppState>>,
  Query(q): Query<CountriesQuery>,
) -> Result<Json<Vec<CountryOut>>, QuizError> {
  let filter = match q.region.as_deref() {
    Some(r) => r.parse::<RegionFilter>()?,
    None => RegionFilter::All,
  };
  let countries: Vec<CountryOut> = list_by_region(filter)
    .into_iter()
    .map(|c| country_out(c, &state.settings.flags))
    .collect();
  info!(target: "quiz", region = %filter, count = countries.len(), "HTTP countries served");
  Ok(Json(countries))
}

#[instrument(level = "info", skip(state))]
pub async fn http_options(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let s = &state.settings;
  Json(OptionsOut {
    defaults: s.defaults.clone(),
    count_options: s.count_options.clone(),
    time_options: s.time_options.clone(),
    max_hint_level: MAX_HINT_LEVEL,
    hint_scores: &HINT_SCORES,
    display: s.display.clone(),
  })
}
