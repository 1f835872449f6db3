//! CoinAPI exchange-rate client

use async_trait::async_trait;
use coinview_config::ApiConfig;

use crate::loader::ExchangeRateSource;
use crate::models::PriceQuote;
use crate::{FetchError, FetchResult};

/// HTTP client for the CoinAPI `exchangerate` endpoint
///
/// One request per call, no retries and no caching.
#[derive(Clone)]
pub struct CoinApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CoinApiClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client with its own connection pool from the API settings
    pub fn from_config(config: &ApiConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("coinview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(http, &config.base_url, &config.key))
    }

    /// Build the request URL. `base` and `quote` go into the path as given.
    pub fn quote_url(&self, base: &str, quote: &str) -> String {
        format!(
            "{}/exchangerate/{}/{}?apikey={}",
            self.base_url, base, quote, self.api_key
        )
    }

    /// Same URL with the key masked, for logs and error messages
    fn redacted_url(&self, base: &str, quote: &str) -> String {
        format!("{}/exchangerate/{}/{}?apikey=***", self.base_url, base, quote)
    }
}

#[async_trait]
impl ExchangeRateSource for CoinApiClient {
    async fn exchange_rate(&self, base: &str, quote: &str) -> FetchResult<PriceQuote> {
        let shown_url = self.redacted_url(base, quote);
        log::debug!("GET {}", shown_url);

        let response = self
            .http
            .get(self.quote_url(base, quote))
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: shown_url.clone(),
                message: e.without_url().to_string(),
            })?;

        // Non-2xx bodies are parsed like any other; CoinAPI reports
        // problems as {"error": "..."} which the page shows.
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered {}", shown_url, status);
        }

        let body = response.text().await.map_err(|e| FetchError::Network {
            url: shown_url.clone(),
            message: e.without_url().to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: shown_url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, http::Uri, routing::get, Router};
    use std::sync::{Arc, Mutex};

    /// Requests seen by the fake API, as `path?query`
    type Seen = Arc<Mutex<Vec<String>>>;

    async fn spawn_api(status: StatusCode, body: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/v1/exchangerate/:base/:quote",
                get(move |State(seen): State<Seen>, uri: Uri| async move {
                    seen.lock().unwrap().push(uri.to_string());
                    (status, body)
                }),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1", addr), seen)
    }

    #[test]
    fn test_quote_url_interpolates_verbatim() {
        let client = CoinApiClient::new(reqwest::Client::new(), "http://rest-sandbox.coinapi.io/v1/", "k3y");
        assert_eq!(
            client.quote_url("BTC", "USD"),
            "http://rest-sandbox.coinapi.io/v1/exchangerate/BTC/USD?apikey=k3y"
        );
        assert_eq!(
            client.quote_url("a%2Fb", "USD"),
            "http://rest-sandbox.coinapi.io/v1/exchangerate/a%2Fb/USD?apikey=k3y"
        );
        assert!(!client.redacted_url("BTC", "USD").contains("k3y"));
    }

    #[tokio::test]
    async fn test_single_get_per_quote() {
        let (base_url, seen) = spawn_api(
            StatusCode::OK,
            r#"{"asset_id_base":"DOGE","asset_id_quote":"USD","rate":0.08}"#,
        )
        .await;
        let client = CoinApiClient::new(reqwest::Client::new(), &base_url, "secret");

        let quote = client.exchange_rate("DOGE", "USD").await.unwrap();
        assert_eq!(quote.pair(), "DOGE/USD");
        assert_eq!(quote.rate_display(), "0.08");
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["/v1/exchangerate/DOGE/USD?apikey=secret".to_string()]
        );
    }

    #[tokio::test]
    async fn test_error_status_body_still_returned() {
        let (base_url, seen) = spawn_api(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid API key"}"#).await;
        let client = CoinApiClient::new(reqwest::Client::new(), &base_url, "wrong");

        let quote = client.exchange_rate("BTC", "USD").await.unwrap();
        assert_eq!(quote.error_message().as_deref(), Some("Invalid API key"));
        assert!(quote.rate.is_none());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (base_url, _seen) = spawn_api(StatusCode::BAD_GATEWAY, "<html>upstream down</html>").await;
        let client = CoinApiClient::new(reqwest::Client::new(), &base_url, "secret");

        let err = client.exchange_rate("BTC", "USD").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CoinApiClient::new(reqwest::Client::new(), &format!("http://{}/v1", addr), "secret");
        let err = client.exchange_rate("BTC", "USD").await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
        assert!(!err.to_string().contains("secret"));
    }
}
