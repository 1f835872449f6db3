//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::main: Landing page
//! - routes::currencies: List of tracked currencies
//! - routes::price: Exchange rate for one asset, backed by the price loader

pub mod error;
pub mod routes;

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use coinview_config::Config;
use coinview_core::{PriceLoader, SourceRef};
use coinview_utils::escape_html;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub price_loader: PriceLoader,
}

impl AppState {
    pub fn new(config: Config, source: SourceRef) -> Self {
        let price_loader = PriceLoader::new(source, config.api.quote_currency.clone());
        Self { config, price_loader }
    }
}

// ==================== Route Table ====================

/// Page handlers the route table can bind a path to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Main,
    Currencies,
    /// Runs the price loader before rendering
    Price,
}

impl Page {
    fn handler(self) -> MethodRouter<AppState> {
        use routes::currencies::page_currencies;
        use routes::main::page_main;
        use routes::price::page_price;

        match self {
            Page::Main => get(page_main),
            Page::Currencies => get(page_currencies),
            Page::Price => get(page_price),
        }
    }

    /// Name of the loader that resolves before the page renders
    pub fn loader(self) -> Option<&'static str> {
        match self {
            Page::Price => Some("price"),
            Page::Main | Page::Currencies => None,
        }
    }
}

/// A page the router serves inside the navigation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRoute {
    /// Path pattern, placeholders written as `:name`
    pub path: &'static str,
    pub title: &'static str,
    /// Label in the navigation shell; `None` keeps the page out of the nav
    pub nav_label: Option<&'static str>,
    pub page: Page,
}

/// Every page route, in navigation order
pub const ROUTE_TABLE: &[PageRoute] = &[
    PageRoute { path: "/", title: "Crypto Prices", nav_label: Some("Home"), page: Page::Main },
    PageRoute { path: "/currencies", title: "Currencies", nav_label: Some("Currencies"), page: Page::Currencies },
    PageRoute { path: "/price/:symbol", title: "Price", nav_label: None, page: Page::Price },
];

/// Create the application router
///
/// Page routes come from `ROUTE_TABLE`; the JSON API is registered here.
pub fn create_router(state: AppState) -> Router {
    use routes::currencies::api_currencies;
    use routes::price::api_price;

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/currencies", get(api_currencies))
        .route("/api/price/:symbol", get(api_price))
        .layer(CorsLayer::permissive());

    let pages = ROUTE_TABLE
        .iter()
        .fold(Router::<AppState>::new(), |router, route| router.route(route.path, route.page.handler()));

    pages
        .merge(api)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Unmatched paths: JSON under /api, a page inside the shell elsewhere
async fn not_found(uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") {
        return ApiError::NotFound { resource: path.to_string() }.into_response();
    }

    log::debug!("No route for {}", path);
    let inner_content = format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h1 class='text-2xl font-bold mb-2'>Page not found</h1>
            <p class='text-gray-500'>Nothing lives at <code>{}</code>.</p>
        </div>"#,
        escape_html(path)
    );
    page_error_response(&headers, StatusCode::NOT_FOUND, "Not found", path, &inner_content)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Coinview</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Link that swaps the content slot in place and falls back to a full load
pub fn outlet_link(path: &str, class: &str, label: &str) -> String {
    format!(
        r#"<a href='{0}' hx-get='{0}' hx-target='#outlet' hx-push-url='true' class='{1}'>{2}</a>"#,
        path, class, label
    )
}

/// Navigation bar with one link per nav entry in the route table
pub fn nav_bar(current_path: &str) -> String {
    let mut nav = String::from(
        "<nav id='nav' class='bg-white border-b'><div class='max-w-4xl mx-auto flex items-center gap-2 px-4 py-3'>",
    );

    for route in ROUTE_TABLE {
        let Some(label) = route.nav_label else { continue };
        let is_active = current_path == route.path
            || (route.path != "/" && current_path.starts_with(&format!("{}/", route.path)));
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        // The home link doubles as the site title
        let label = if route.path == "/" {
            format!("{}<div class='text-xs font-bold'>Crypto Prices</div>", label)
        } else {
            format!("<div>{}</div>", label)
        };
        nav.push_str(&outlet_link(
            route.path,
            &format!("px-3 py-2 rounded-lg {}", active_class),
            &label,
        ));
    }
    nav.push_str("</div></nav>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
///
/// Partials carry the nav out-of-band so the active link follows navigation.
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(
            "<title>{} - Coinview</title>\n{}\n{}",
            escape_html(title),
            nav_bar(current_path).replacen("<nav id='nav'", "<nav id='nav' hx-swap-oob='true'", 1),
            inner_content
        )
    } else {
        base_html(title, &format!(
            r#"<div class='App min-h-screen flex flex-col'>
    {}
    <main id='outlet' class='flex-1 max-w-4xl w-full mx-auto p-6'>{}</main>
</div>"#,
            nav_bar(current_path), inner_content))
    }
}

/// Page shown in place of content that failed
///
/// HTMX drops 4xx/5xx responses without swapping them, so partial requests
/// get the panel with 200 and only full loads carry the error status.
pub fn page_error_response(
    headers: &HeaderMap,
    status: StatusCode,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> Response {
    let status = if is_htmx_request(headers) { StatusCode::OK } else { status };
    (status, Html(page_response(headers, title, current_path, inner_content))).into_response()
}

// ==================== Server ====================

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(config: Config, source: SourceRef) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config, source);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Coinview server on http://{}", addr);
    for route in ROUTE_TABLE {
        match route.page.loader() {
            Some(loader) => log::info!("  - {} ({}, loader: {})", route.path, route.title, loader),
            None => log::info!("  - {} ({})", route.path, route.title),
        }
    }
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    const BTC: &str = r#"{"asset_id_base":"BTC","asset_id_quote":"USD","rate":50000}"#;

    #[test]
    fn test_route_table_paths_unique() {
        let mut paths: Vec<&str> = ROUTE_TABLE.iter().map(|r| r.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ROUTE_TABLE.len());
    }

    #[tokio::test]
    async fn test_every_table_route_is_served() {
        for route in ROUTE_TABLE {
            let path = route.path.replace(":symbol", "BTC");
            let (status, body) = send(app(StubSource::new(Reply::Body(BTC))), &path, false).await;
            assert_ne!(status, StatusCode::NOT_FOUND, "{} not routed", route.path);
            assert!(!body.contains("Page not found"), "{} hit the fallback", route.path);
        }
    }

    #[test]
    fn test_only_price_page_has_loader() {
        let with_loader: Vec<&str> = ROUTE_TABLE
            .iter()
            .filter(|r| r.page.loader().is_some())
            .map(|r| r.path)
            .collect();
        assert_eq!(with_loader, vec!["/price/:symbol"]);
    }

    #[test]
    fn test_nav_bar_prefix_is_not_active() {
        let nav = nav_bar("/currencies-anything");
        assert!(!nav.contains("bg-indigo-50"));
        let nav = nav_bar("/currencies/extra");
        assert!(nav.contains("bg-indigo-50"));
    }

    #[test]
    fn test_nav_bar_marks_active_link() {
        let nav = nav_bar("/currencies");
        assert!(nav.contains("href='/'"));
        assert!(nav.contains("href='/currencies'"));
        assert!(!nav.contains("/price"));
        let active = nav.find("bg-indigo-50").unwrap();
        assert!(nav[active..].contains("Currencies"));
        assert!(!nav[active..].contains("Crypto Prices"));
    }

    #[tokio::test]
    async fn test_home_renders_inside_shell() {
        let source = StubSource::new(Reply::Body(BTC));
        let (status, body) = send(app(source.clone()), "/", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<nav id='nav'"));
        assert!(body.contains("href='/'"));
        assert!(body.contains("href='/currencies'"));
        assert!(body.contains("<main id='outlet'"));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_htmx_request_gets_partial() {
        let (status, body) = send(app(StubSource::new(Reply::Body(BTC))), "/currencies", true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("hx-swap-oob='true'"));
        assert!(body.contains("<title>Currencies - Coinview</title>"));
    }

    #[tokio::test]
    async fn test_unknown_page_is_404_in_shell() {
        let (status, body) = send(app(StubSource::new(Reply::Body(BTC))), "/nope", false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(body.contains("<nav id='nav'"));
    }

    #[tokio::test]
    async fn test_unknown_page_htmx_partial_is_swappable() {
        let (status, body) = send(app(StubSource::new(Reply::Body(BTC))), "/nope", true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Page not found"));
        assert!(!body.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_unknown_api_is_json_404() {
        let (status, body) = send(app(StubSource::new(Reply::Body(BTC))), "/api/nope", false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(StubSource::new(Reply::Body(BTC))), "/api/health", false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_server_survives_loader_failure() {
        let source = StubSource::new(Reply::NetworkDown);
        let router = app(source.clone());

        let (status, _) = send(router.clone(), "/price/BTC", false).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (status, _) = send(router, "/", false).await;
        assert_eq!(status, StatusCode::OK);
    }
}
