//! FRED (Federal Reserve Economic Data) observations adapter.
//!
//! Wraps the `fred/series/observations` endpoint: builds the query string,
//! executes the GET through the [`HttpClient`] transport, and normalizes the
//! JSON payload into a [`Series`]. Rows whose value is the `"."` missing
//! marker, or otherwise fails numeric coercion, are dropped.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Observation, ObservationDate, Series, SeriesId, ValidationError};

/// Production observations endpoint.
pub const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Value FRED emits for periods with no data.
const MISSING_VALUE_MARKER: &str = ".";

/// Where to obtain a free API key.
pub const API_KEY_URL: &str = "https://fred.stlouisfed.org/docs/api/api_key.html";

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// No API key was configured; detected before any network call.
    MissingCredential,
    InvalidRequest,
    /// Transport failure or non-2xx upstream status.
    Unavailable,
    /// The response body did not match the expected JSON shape.
    Parse,
}

/// Structured error returned by the FRED client.
///
/// "Call failed" is deliberately distinct from "zero observations": the
/// latter is a successful fetch of an empty [`Series`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn missing_credential() -> Self {
        Self {
            kind: SourceErrorKind::MissingCredential,
            message: format!("FRED API key is not set; get a free key at {API_KEY_URL}"),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        matches!(self.kind, SourceErrorKind::Unavailable)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::MissingCredential => "source.missing_credential",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Parse => "source.parse",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Native reporting frequency of a catalog series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Quarterly,
    Annual,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quarterly => "Quarterly",
            Self::Annual => "Annual",
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for one of the FRED series used in tax-rate analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub frequency: Frequency,
    pub earliest: &'static str,
}

/// Federal tax receipts on corporate income, annual.
pub const TAX_RECEIPTS_ANNUAL_ID: &str = "FCTAX";
/// Federal government current tax receipts on corporate income, quarterly.
pub const TAX_RECEIPTS_QUARTERLY_ID: &str = "B075RC1Q027SBEA";
/// Corporate profits before tax (without IVA and CCAdj), quarterly.
pub const PROFITS_BEFORE_TAX_QUARTERLY_ID: &str = "A053RC1Q027SBEA";
/// Corporate profits after tax (without IVA and CCAdj), quarterly.
pub const PROFITS_AFTER_TAX_QUARTERLY_ID: &str = "CP";
/// Corporate profits with IVA and CCAdj, quarterly.
pub const PROFITS_WITH_ADJUSTMENTS_ID: &str = "CPROFIT";

/// The FRED series relevant to corporate tax analysis.
pub const fn series_catalog() -> [SeriesInfo; 5] {
    [
        SeriesInfo {
            id: TAX_RECEIPTS_ANNUAL_ID,
            name: "Federal Government: Tax Receipts on Corporate Income",
            frequency: Frequency::Annual,
            earliest: "1929-01-01",
        },
        SeriesInfo {
            id: TAX_RECEIPTS_QUARTERLY_ID,
            name: "Federal government current tax receipts: Taxes on corporate income",
            frequency: Frequency::Quarterly,
            earliest: "1947-01-01",
        },
        SeriesInfo {
            id: PROFITS_BEFORE_TAX_QUARTERLY_ID,
            name: "Corporate profits before tax (without IVA and CCAdj)",
            frequency: Frequency::Quarterly,
            earliest: "1947-01-01",
        },
        SeriesInfo {
            id: PROFITS_AFTER_TAX_QUARTERLY_ID,
            name: "Corporate Profits After Tax (without IVA and CCAdj)",
            frequency: Frequency::Quarterly,
            earliest: "1947-01-01",
        },
        SeriesInfo {
            id: PROFITS_WITH_ADJUSTMENTS_ID,
            name: "Corporate Profits with IVA and CCAdj",
            frequency: Frequency::Quarterly,
            earliest: "1947-01-01",
        },
    ]
}

/// Request payload for the observations endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationsRequest {
    pub series_id: SeriesId,
    pub start: Option<ObservationDate>,
    pub end: Option<ObservationDate>,
}

impl ObservationsRequest {
    pub fn new(
        series_id: SeriesId,
        start: Option<ObservationDate>,
        end: Option<ObservationDate>,
    ) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ValidationError::InvertedDateRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }

        Ok(Self {
            series_id,
            start,
            end,
        })
    }
}

/// Client for the FRED observations API.
///
/// One blocking-style async call per series; no retry, no caching, no shared
/// state across calls.
#[derive(Clone)]
pub struct FredClient {
    http: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl std::fmt::Debug for FredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredClient")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl FredClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), api_key)
    }

    pub fn with_http_client(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: String::from(OBSERVATIONS_URL),
            timeout_ms: 10_000,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch one series of observations, sorted ascending by date.
    ///
    /// Zero observations is a successful empty series, not an error. Rows
    /// with an unparseable date or value are dropped and counted in a debug
    /// log line.
    pub async fn observations(&self, req: &ObservationsRequest) -> Result<Series, SourceError> {
        if self.api_key.trim().is_empty() {
            return Err(SourceError::missing_credential());
        }

        let url = self.observations_url(req);
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);

        let response = self.http.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!(
                "fred transport error for {}: {}",
                req.series_id,
                e.message()
            ))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "fred returned status {} for {}",
                response.status, req.series_id
            )));
        }

        let payload: FredObservationsResponse =
            serde_json::from_str(&response.body).map_err(|e| {
                SourceError::parse(format!(
                    "failed to parse fred response for {}: {}",
                    req.series_id, e
                ))
            })?;

        let mut observations = Vec::with_capacity(payload.observations.len());
        let mut dropped = 0_usize;

        for row in payload.observations {
            match parse_observation(&row) {
                Some(obs) => observations.push(obs),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            log::debug!(
                "dropped {dropped} unparseable observation(s) for {}",
                req.series_id
            );
        }

        Ok(Series::new(
            req.series_id.as_str().to_ascii_lowercase(),
            observations,
        ))
    }

    fn observations_url(&self, req: &ObservationsRequest) -> String {
        let mut url = format!(
            "{}?series_id={}&api_key={}&file_type=json&sort_order=asc",
            self.base_url,
            urlencoding::encode(req.series_id.as_str()),
            urlencoding::encode(&self.api_key),
        );

        if let Some(start) = req.start {
            url.push_str(&format!("&observation_start={start}"));
        }
        if let Some(end) = req.end {
            url.push_str(&format!("&observation_end={end}"));
        }

        url
    }
}

fn parse_observation(row: &FredObservation) -> Option<Observation> {
    if row.value == MISSING_VALUE_MARKER {
        return None;
    }

    let date = ObservationDate::parse(&row.date).ok()?;
    let value = row.value.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(Observation::new(date, value))
}

#[derive(Debug, Deserialize)]
struct FredObservationsResponse {
    observations: Vec<FredObservation>,
}

#[derive(Debug, Deserialize)]
struct FredObservation {
    date: String,
    value: String,
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::*;
    use crate::http_client::{HttpError, HttpResponse};

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn with_body(body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::ok_json(body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_status(status: u16) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: String::new(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(HttpError::new(message)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .iter()
                .map(|request| request.url.clone())
                .collect()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn request(series_id: &str) -> ObservationsRequest {
        ObservationsRequest::new(
            SeriesId::parse(series_id).expect("valid series id"),
            None,
            None,
        )
        .expect("valid request")
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_network_call() {
        let client = Arc::new(RecordingHttpClient::with_body(r#"{"observations":[]}"#));
        let fred = FredClient::with_http_client(client.clone(), "  ");

        let error = fred
            .observations(&request("FCTAX"))
            .await
            .expect_err("blank key must fail fast");

        assert_eq!(error.kind(), SourceErrorKind::MissingCredential);
        assert!(client.recorded_urls().is_empty());
    }

    #[tokio::test]
    async fn builds_query_with_credentials_and_date_bounds() {
        let client = Arc::new(RecordingHttpClient::with_body(r#"{"observations":[]}"#));
        let fred = FredClient::with_http_client(client.clone(), "test-key");

        let req = ObservationsRequest::new(
            SeriesId::parse("FCTAX").expect("valid series id"),
            Some(ObservationDate::parse("1950-01-01").expect("valid date")),
            Some(ObservationDate::parse("2000-12-31").expect("valid date")),
        )
        .expect("valid request");

        fred.observations(&req).await.expect("fetch should succeed");

        let urls = client.recorded_urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].contains("series_id=FCTAX"));
        assert!(urls[0].contains("api_key=test-key"));
        assert!(urls[0].contains("file_type=json"));
        assert!(urls[0].contains("sort_order=asc"));
        assert!(urls[0].contains("observation_start=1950-01-01"));
        assert!(urls[0].contains("observation_end=2000-12-31"));
    }

    #[tokio::test]
    async fn drops_missing_value_marker_rows() {
        let body = r#"{"observations":[
            {"date":"2020-01-01","value":"5.0"},
            {"date":"2020-04-01","value":"."}
        ]}"#;
        let client = Arc::new(RecordingHttpClient::with_body(body));
        let fred = FredClient::with_http_client(client, "test-key");

        let series = fred
            .observations(&request("CP"))
            .await
            .expect("fetch should succeed");

        assert_eq!(series.len(), 1);
        let only = series.first().expect("one observation");
        assert_eq!(only.date.to_string(), "2020-01-01");
        assert_eq!(only.value, 5.0);
    }

    #[tokio::test]
    async fn drops_rows_that_fail_numeric_coercion() {
        let body = r#"{"observations":[
            {"date":"2020-01-01","value":"not-a-number"},
            {"date":"bad-date","value":"1.0"},
            {"date":"2020-07-01","value":"2.5"}
        ]}"#;
        let client = Arc::new(RecordingHttpClient::with_body(body));
        let fred = FredClient::with_http_client(client, "test-key");

        let series = fred
            .observations(&request("CP"))
            .await
            .expect("fetch should succeed");

        assert_eq!(series.len(), 1);
    }

    #[tokio::test]
    async fn zero_observations_is_an_empty_series_not_an_error() {
        let client = Arc::new(RecordingHttpClient::with_body(r#"{"observations":[]}"#));
        let fred = FredClient::with_http_client(client, "test-key");

        let series = fred
            .observations(&request("FCTAX"))
            .await
            .expect("empty payload should succeed");

        assert!(series.is_empty());
        assert_eq!(series.name(), "fctax");
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable_and_retryable() {
        let client = Arc::new(RecordingHttpClient::failing("connection refused"));
        let fred = FredClient::with_http_client(client, "test-key");

        let error = fred
            .observations(&request("FCTAX"))
            .await
            .expect_err("transport failure must error");

        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.retryable());
        assert!(error.message().contains("connection refused"));
    }

    #[tokio::test]
    async fn upstream_error_status_is_unavailable() {
        let client = Arc::new(RecordingHttpClient::with_status(403));
        let fred = FredClient::with_http_client(client, "test-key");

        let error = fred
            .observations(&request("FCTAX"))
            .await
            .expect_err("403 must error");

        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.message().contains("403"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let client = Arc::new(RecordingHttpClient::with_body(r#"{"error":"bad request"}"#));
        let fred = FredClient::with_http_client(client, "test-key");

        let error = fred
            .observations(&request("FCTAX"))
            .await
            .expect_err("missing observations field must error");

        assert_eq!(error.kind(), SourceErrorKind::Parse);
        assert!(!error.retryable());
    }

    #[tokio::test]
    async fn base_url_override_redirects_requests() {
        let client = Arc::new(RecordingHttpClient::with_body(r#"{"observations":[]}"#));
        let fred = FredClient::with_http_client(client.clone(), "test-key")
            .with_base_url("http://localhost:9999/obs");

        fred.observations(&request("FCTAX"))
            .await
            .expect("fetch should succeed");

        assert!(client.recorded_urls()[0].starts_with("http://localhost:9999/obs?"));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let err = ObservationsRequest::new(
            SeriesId::parse("FCTAX").expect("valid series id"),
            Some(ObservationDate::parse("2000-01-01").expect("valid date")),
            Some(ObservationDate::parse("1950-01-01").expect("valid date")),
        )
        .expect_err("inverted range must fail");

        assert!(matches!(err, ValidationError::InvertedDateRange { .. }));
    }

    #[test]
    fn catalog_lists_the_five_analysis_series() {
        let catalog = series_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().any(|info| info.id == TAX_RECEIPTS_ANNUAL_ID));
        assert!(catalog
            .iter()
            .any(|info| info.id == PROFITS_BEFORE_TAX_QUARTERLY_ID
                && info.frequency == Frequency::Quarterly));
    }
}
