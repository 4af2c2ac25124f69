// IP geolocation client - ipapi.co free tier (1000 requests/day)
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const IPAPI_ENDPOINT: &str = "https://ipapi.co/json/";

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Geolocation request failed with status {0}")]
    BadStatus(u16),

    #[error("Geolocation response is missing {0}")]
    Incomplete(&'static str),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;

/// Raw response body from the geolocation service
///
/// Every field is optional on the wire; the service happily answers with an
/// error object (`{"error": true, "reason": "RateLimited"}`) and a 200.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpApiResponse {
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

/// A complete geolocation answer: both country fields present and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLookup {
    pub country_code: String,
    pub country_name: String,
    pub region: Option<String>,
    pub city: Option<String>,
}

impl TryFrom<IpApiResponse> for GeoLookup {
    type Error = GeoError;

    fn try_from(raw: IpApiResponse) -> Result<Self> {
        let country_code = non_empty(raw.country_code).ok_or(GeoError::Incomplete("country_code"))?;
        let country_name = non_empty(raw.country_name).ok_or(GeoError::Incomplete("country_name"))?;

        Ok(Self {
            country_code,
            country_name,
            region: non_empty(raw.region),
            city: non_empty(raw.city),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Thin client over the geolocation endpoint
///
/// Makes exactly one request per lookup.
/// Callers fall back to the locale when this fails.
pub struct IpApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiClient {
    /// Client for `endpoint`, normally [`IPAPI_ENDPOINT`]
    pub fn with_endpoint(endpoint: String, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("IssueScout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Look up the caller's location from their public IP
    pub async fn lookup(&self) -> Result<GeoLookup> {
        debug!("Querying geolocation service at {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::BadStatus(status.as_u16()));
        }

        let body = response.text().await?;
        parse_lookup(&body)
    }
}

/// Parse a response body into a complete lookup
pub fn parse_lookup(body: &str) -> Result<GeoLookup> {
    let raw: IpApiResponse = serde_json::from_str(body)?;
    GeoLookup::try_from(raw)
}
