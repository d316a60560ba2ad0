//! In-memory location lookup backed by a JSON tree
//!
//! The tree uses the same shape as the lookup service's `?depth=3` dump:
//! a list of provinces, each carrying `districts`, each carrying `wards`.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::location::{
    client::LocationLookup,
    errors::{LocationError, LocationResult},
    types::Region,
};

#[derive(Debug, Clone, Deserialize)]
struct WardNode {
    #[serde(flatten)]
    region: Region,
}

#[derive(Debug, Clone, Deserialize)]
struct DistrictNode {
    #[serde(flatten)]
    region: Region,
    #[serde(default)]
    wards: Vec<WardNode>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProvinceNode {
    #[serde(flatten)]
    region: Region,
    #[serde(default)]
    districts: Vec<DistrictNode>,
}

/// Lookup that answers from a preloaded tree
#[derive(Debug, Clone, Default)]
pub struct StaticLocations {
    provinces: Vec<ProvinceNode>,
}

impl StaticLocations {
    pub fn from_json(json: &str) -> LocationResult<Self> {
        let provinces: Vec<ProvinceNode> = serde_json::from_str(json)?;
        Ok(Self { provinces })
    }

    pub async fn from_path(path: &Path) -> LocationResult<Self> {
        debug!("Loading offline locations from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    fn province(&self, code: &str) -> LocationResult<&ProvinceNode> {
        self.provinces
            .iter()
            .find(|p| p.region.code == code)
            .ok_or_else(|| LocationError::Api(format!("province {} not found", code)))
    }

    fn district(&self, code: &str) -> LocationResult<&DistrictNode> {
        self.provinces
            .iter()
            .flat_map(|p| p.districts.iter())
            .find(|d| d.region.code == code)
            .ok_or_else(|| LocationError::Api(format!("district {} not found", code)))
    }
}

#[async_trait]
impl LocationLookup for StaticLocations {
    async fn list_provinces(&self) -> LocationResult<Vec<Region>> {
        Ok(self.provinces.iter().map(|p| p.region.clone()).collect())
    }

    async fn list_districts(&self, province_code: &str) -> LocationResult<Vec<Region>> {
        let province = self.province(province_code)?;
        Ok(province.districts.iter().map(|d| d.region.clone()).collect())
    }

    async fn list_wards(&self, district_code: &str) -> LocationResult<Vec<Region>> {
        let district = self.district(district_code)?;
        Ok(district.wards.iter().map(|w| w.region.clone()).collect())
    }

    fn name(&self) -> &str {
        "offline"
    }
}
