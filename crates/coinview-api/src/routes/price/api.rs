//! Price API endpoints - JSON API

use std::collections::HashMap;

use axum::extract::{rejection::PathRejection, Path, State};
use axum::Json;
use coinview_core::{PageLoader, PriceQuote, RouteParams};

use crate::{ApiError, AppState};

pub async fn api_price(
    State(state): State<AppState>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Result<Json<PriceQuote>, ApiError> {
    let params = match params {
        Ok(Path(params)) => RouteParams::from(params),
        Err(rejection) => {
            log::warn!("Rejected price path: {}", rejection);
            RouteParams::new()
        }
    };
    let quote = state.price_loader.load(&params).await?;
    Ok(Json(quote))
}
