//! Currencies page rendering

use crate::{outlet_link, page_response, AppState};
use coinview_config::Currency;
use coinview_utils::escape_html;

/// Currencies page - one link per configured currency
pub async fn page_currencies(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let inner_content = format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h1 class='text-2xl font-bold mb-4'>Currencies</h1>
            {}
        </div>"#,
        render_currency_list(&state.config.currencies)
    );

    axum::response::Html(page_response(&headers, "Currencies", "/currencies", &inner_content))
}

fn render_currency_list(currencies: &[Currency]) -> String {
    if currencies.is_empty() {
        return "<p class='text-gray-500'>No currencies configured.</p>".to_string();
    }

    let mut html = String::from("<ul class='divide-y divide-gray-100'>");
    for currency in currencies {
        let path = format!("/price/{}", urlencoding::encode(&currency.symbol));
        let label = format!(
            "<span class='font-medium'>{}</span> <span class='text-gray-500'>{}</span>",
            escape_html(&currency.name),
            escape_html(&currency.symbol)
        );
        html.push_str("<li class='py-2'>");
        html.push_str(&outlet_link(&path, "hover:text-indigo-600", &label));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[test]
    fn test_currency_list_links_to_price_pages() {
        let html = render_currency_list(&[
            Currency::new("Bitcoin", "BTC"),
            Currency::new("Odd <Coin>", "A B"),
        ]);
        assert!(html.contains("href='/price/BTC'"));
        assert!(html.contains("href='/price/A%20B'"));
        assert!(html.contains("Odd &lt;Coin&gt;"));
        assert_eq!(html.matches("<li").count(), 2);
    }

    #[test]
    fn test_empty_list() {
        assert!(render_currency_list(&[]).contains("No currencies configured"));
    }

    #[tokio::test]
    async fn test_currencies_page_inside_shell() {
        let source = StubSource::new(Reply::NetworkDown);
        let (status, body) = send(app(source.clone()), "/currencies", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<nav id='nav'"));
        assert!(body.contains("<h1 class='text-2xl font-bold mb-4'>Currencies</h1>"));
        assert!(body.contains("href='/price/ZEC'"));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_currencies_api() {
        let (status, body) = send(app(StubSource::new(Reply::NetworkDown)), "/api/currencies", false).await;
        assert_eq!(status, StatusCode::OK);
        let list: Vec<Currency> = serde_json::from_str(&body).unwrap();
        assert_eq!(list[1], Currency::new("Litecoin", "LTC"));
    }
}
