use crate::weather_data::error::FetchError;
use crate::weather_data::observation::{HistoricalResponse, ObservationSeries};
use crate::weather_data::query::WeatherQuery;
use log::{debug, warn};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// A source of observation series.
///
/// Implemented over HTTP by [`HttpObservationFetcher`]; tests and offline runs
/// can plug in their own source.
pub trait ObservationFetcher: Send + Sync {
    fn fetch(
        &self,
        query: &WeatherQuery,
    ) -> impl Future<Output = Result<ObservationSeries, FetchError>> + Send;
}

impl<T: ObservationFetcher> ObservationFetcher for &T {
    fn fetch(
        &self,
        query: &WeatherQuery,
    ) -> impl Future<Output = Result<ObservationSeries, FetchError>> + Send {
        (**self).fetch(query)
    }
}

/// Fetches observations from the historical JSON endpoint.
///
/// Holds a single `reqwest::Client`, so connections are pooled across every
/// request of a batch.
#[derive(Debug, Clone)]
pub struct HttpObservationFetcher {
    client: Client,
}

impl HttpObservationFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Applies a per-request timeout; without one, the transport default applies.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::NetworkRequest("client setup".to_string(), e))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpObservationFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationFetcher for HttpObservationFetcher {
    async fn fetch(&self, query: &WeatherQuery) -> Result<ObservationSeries, FetchError> {
        // Log the redacted form; the raw URL carries the API key.
        let shown = query.to_string();
        debug!("Requesting {}", shown);

        let response = self
            .client
            .get(query.endpoint())
            .query(&query.query_params())
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(shown.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", shown, e.status());
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: shown,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(shown, e)
                });
            }
        };

        let body: HistoricalResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(shown.clone(), e))?;

        let series = body
            .observations
            .ok_or_else(|| FetchError::MissingObservations(shown.clone()))?;
        debug!("Received {} observations for {}", series.len(), shown);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::resolve::resolve_date_range;
    use crate::types::parameter::TrackedParameter;
    use crate::types::units::Units;
    use crate::weather_data::query::Credentials;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned HTTP response and returns the request line it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base_url, handle)
    }

    fn fetcher() -> HttpObservationFetcher {
        // Bypass any proxy configured in the environment; the server is local.
        HttpObservationFetcher::with_client(Client::builder().no_proxy().build().unwrap())
    }

    fn query(base_url: &str) -> WeatherQuery {
        let range = resolve_date_range("01/05/2016", None, 7).unwrap();
        WeatherQuery::builder()
            .lat("-8.05")
            .lon("-34.9")
            .range(range)
            .credentials(&Credentials::new("KEY", Units::Metric))
            .base_url(base_url)
            .build()
    }

    #[tokio::test]
    async fn test_fetch_parses_observations() -> Result<(), FetchError> {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"observations":[{"temp":20,"dewPt":18},{"temp":22,"dewPt":null}]}"#,
        )
        .await;

        let series = fetcher().fetch(&query(&base_url)).await?;
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.readings(TrackedParameter::Temperature).collect::<Vec<_>>(),
            [20.0, 22.0]
        );

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with(
            "GET /v1/geocode/-8.05/-34.9/observations/historical.json?apiKey=KEY&units=m&startDate=20151229&endDate=20160105"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let (base_url, _server) = serve_once("401 Unauthorized", r#"{"errors":[]}"#).await;

        let err = fetcher()
            .fetch(&query(&base_url))
            .await
            .unwrap_err();
        match err {
            FetchError::HttpStatus { status, url, .. } => {
                assert_eq!(status.as_u16(), 401);
                assert!(!url.contains("KEY"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_missing_series() {
        let (base_url, _server) = serve_once("200 OK", r#"{"metadata":{}}"#).await;

        let err = fetcher()
            .fetch(&query(&base_url))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingObservations(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_undecodable_body() {
        let (base_url, _server) = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = fetcher()
            .fetch(&query(&base_url))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(..)));
    }

    #[tokio::test]
    async fn test_fetch_reports_connection_failure() {
        // Bind then drop to obtain a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = fetcher()
            .fetch(&query(&base_url))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NetworkRequest(..)));
    }
}
