//! Application state shared by every connection: the quiz settings.
//!
//! Sessions themselves are not stored here. Each WebSocket connection owns its
//! own controller, so nothing about a game is shared between players.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::catalog::{count_of, region_filters};
use crate::config::{load_settings_from_env, QuizSettings};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<QuizSettings>,
}

impl AppState {
    /// Build state from env: load settings and log the catalog inventory.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let settings = load_settings_from_env();
        for filter in region_filters() {
            info!(target: "quiz", region = %filter, countries = count_of(filter), "Catalog inventory");
        }
        info!(
            target: "flagquiz_backend",
            mode = ?settings.defaults.mode,
            region = %settings.defaults.region,
            flag_cdn = %settings.flags.cdn_base,
            "Quiz settings ready"
        );
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: QuizSettings) -> Self {
        Self { settings: Arc::new(settings) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
