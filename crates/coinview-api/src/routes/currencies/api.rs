//! Currencies API endpoints - JSON API

use crate::AppState;
use coinview_config::Currency;

pub async fn api_currencies(state: axum::extract::State<AppState>) -> axum::Json<Vec<Currency>> {
    axum::Json(state.config.currencies.clone())
}
