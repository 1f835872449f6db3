//! Price page rendering
//!
//! The loader resolves before anything is rendered; the page then draws
//! either the quote or an error panel.

use std::collections::HashMap;

use axum::extract::{rejection::PathRejection, Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use coinview_core::{FetchError, PageLoader, PriceQuote, RouteParams, SYMBOL_PARAM};
use coinview_utils::escape_html;

use crate::error::{error_panel, fetch_status};
use crate::{page_error_response, page_response, AppState};

pub async fn page_price(
    State(state): State<AppState>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    // An undecodable segment leaves the symbol unset; the loader reports it
    let params = match params {
        Ok(Path(params)) => RouteParams::from(params),
        Err(rejection) => {
            log::warn!("Rejected price path: {}", rejection);
            RouteParams::new()
        }
    };
    let symbol = params.get(SYMBOL_PARAM).unwrap_or_default().to_string();
    let current_path = format!("/price/{}", urlencoding::encode(&symbol));
    let title = format!("{} price", symbol);

    match state.price_loader.load(&params).await {
        Ok(quote) => Html(page_response(&headers, &title, &current_path, &render_quote(&quote))).into_response(),
        Err(e) => {
            log::error!("Price loader failed for '{}': {}", symbol, e);
            page_error_response(
                &headers,
                fetch_status(&e),
                &title,
                &current_path,
                &render_fetch_error(&symbol, &e),
            )
        }
    }
}

/// Render whatever the API returned; missing fields show as `-`
fn render_quote(quote: &PriceQuote) -> String {
    let api_error = quote
        .error_message()
        .map(|msg| format!("<p class='mt-3 text-sm text-red-600'>{}</p>", escape_html(&msg)))
        .unwrap_or_default();

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h1 class='text-3xl font-bold'>{}</h1>
            <h2 class='text-2xl text-indigo-600 mt-2'>{}</h2>{}
        </div>"#,
        escape_html(&quote.pair()),
        escape_html(&quote.rate_display()),
        api_error
    )
}

fn render_fetch_error(symbol: &str, err: &FetchError) -> String {
    let heading = if symbol.is_empty() {
        "Could not load the rate".to_string()
    } else {
        format!("Could not load the {} rate", symbol)
    };
    error_panel(&heading, &err.to_details())
}
