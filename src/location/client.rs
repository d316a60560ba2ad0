//! Location lookup trait and the HTTP client for the remote service

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::location::{
    errors::{LocationError, LocationResult},
    types::Region,
};

/// Source of selectable regions for each tier
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// All provinces
    async fn list_provinces(&self) -> LocationResult<Vec<Region>>;

    /// Districts of one province
    async fn list_districts(&self, province_code: &str) -> LocationResult<Vec<Region>>;

    /// Wards of one district
    async fn list_wards(&self, district_code: &str) -> LocationResult<Vec<Region>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// `GET /p/{code}?depth=2` response
#[derive(Debug, Deserialize)]
struct ProvinceDetail {
    #[serde(default)]
    districts: Vec<Region>,
}

/// `GET /d/{code}?depth=2` response
#[derive(Debug, Deserialize)]
struct DistrictDetail {
    #[serde(default)]
    wards: Vec<Region>,
}

/// Client for the province/district/ward REST API
#[derive(Debug, Clone)]
pub struct HttpLocationClient {
    client: Client,
    base_url: String,
}

impl HttpLocationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> LocationResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("donorlink/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> LocationResult<Self> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn provinces_url(&self) -> String {
        format!("{}/p/", self.base_url)
    }

    fn districts_url(&self, province_code: &str) -> String {
        format!("{}/p/{}?depth=2", self.base_url, province_code)
    }

    fn wards_url(&self, district_code: &str) -> String {
        format!("{}/d/{}?depth=2", self.base_url, district_code)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> LocationResult<T> {
        debug!("Fetching locations from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Api(format!("{} returned {}", url, status)));
        }

        let body = response.text().await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> LocationResult<T> {
    serde_json::from_str(body).map_err(|e| LocationError::Decode(e.to_string()))
}

#[async_trait]
impl LocationLookup for HttpLocationClient {
    async fn list_provinces(&self) -> LocationResult<Vec<Region>> {
        self.get_json(&self.provinces_url()).await
    }

    async fn list_districts(&self, province_code: &str) -> LocationResult<Vec<Region>> {
        let detail: ProvinceDetail = self.get_json(&self.districts_url(province_code)).await?;
        Ok(detail.districts)
    }

    async fn list_wards(&self, district_code: &str) -> LocationResult<Vec<Region>> {
        let detail: DistrictDetail = self.get_json(&self.wards_url(district_code)).await?;
        Ok(detail.wards)
    }

    fn name(&self) -> &str {
        "http"
    }
}
