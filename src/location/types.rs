//! Core location types: tiers, tier entities, the selection and its
//! serialized form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Separator between tier names in the serialized location value
pub const VALUE_SEPARATOR: char = '_';

/// One level of the Province / District / Ward hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Province,
    District,
    Ward,
}

impl Tier {
    /// All tiers, top-down
    pub const ALL: [Tier; 3] = [Tier::Province, Tier::District, Tier::Ward];

    /// The tier this one depends on
    pub fn parent(self) -> Option<Tier> {
        match self {
            Tier::Province => None,
            Tier::District => Some(Tier::Province),
            Tier::Ward => Some(Tier::District),
        }
    }

    /// The tier that depends on this one
    pub fn child(self) -> Option<Tier> {
        match self {
            Tier::Province => Some(Tier::District),
            Tier::District => Some(Tier::Ward),
            Tier::Ward => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tier::Province => 0,
            Tier::District => 1,
            Tier::Ward => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Province => "Province",
            Tier::District => "District",
            Tier::Ward => "Ward",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A province, district or ward as returned by the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Opaque identifier. The lookup service sends numbers; other
    /// backends send strings, so both are accepted.
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    pub name: String,
}

impl Region {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    })
}

/// The current Province / District / Ward choice.
///
/// Setting a tier always clears every tier below it, so a district can
/// only ever sit under the province it was chosen for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    province: Option<Region>,
    district: Option<Region>,
    ward: Option<Region>,
}

impl Selection {
    pub fn province(&self) -> Option<&Region> {
        self.province.as_ref()
    }

    pub fn district(&self) -> Option<&Region> {
        self.district.as_ref()
    }

    pub fn ward(&self) -> Option<&Region> {
        self.ward.as_ref()
    }

    pub fn get(&self, tier: Tier) -> Option<&Region> {
        match tier {
            Tier::Province => self.province(),
            Tier::District => self.district(),
            Tier::Ward => self.ward(),
        }
    }

    /// Set (or unset) a tier and clear everything below it
    pub(crate) fn set(&mut self, tier: Tier, region: Option<Region>) {
        match tier {
            Tier::Province => {
                self.province = region;
                self.district = None;
                self.ward = None;
            }
            Tier::District => {
                self.district = region;
                self.ward = None;
            }
            Tier::Ward => self.ward = region,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.province.is_some() && self.district.is_some() && self.ward.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.province.is_none()
    }

    /// The published value, available only once all three tiers are set
    pub fn location_value(&self) -> Option<LocationValue> {
        match (&self.province, &self.district, &self.ward) {
            (Some(province), Some(district), Some(ward)) => {
                Some(LocationValue::new(&province.name, &district.name, &ward.name))
            }
            _ => None,
        }
    }
}

/// Tier names parsed out of a serialized location value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNames {
    pub province: String,
    pub district: Option<String>,
    pub ward: Option<String>,
}

impl LocationNames {
    /// Split `"{province}_{district}_{ward}"` into its names. Missing or
    /// empty trailing components come back as `None`; a blank string or a
    /// blank province yields nothing at all.
    pub fn parse(serialized: &str) -> Option<Self> {
        let mut parts = serialized
            .trim()
            .splitn(3, VALUE_SEPARATOR)
            .map(str::trim)
            .map(|part| (!part.is_empty()).then(|| part.to_string()));

        let province = parts.next().flatten()?;
        let district = parts.next().flatten();
        let ward = district.as_ref().and_then(|_| parts.next().flatten());

        Some(Self {
            province,
            district,
            ward,
        })
    }

    pub fn get(&self, tier: Tier) -> Option<&str> {
        match tier {
            Tier::Province => Some(self.province.as_str()),
            Tier::District => self.district.as_deref(),
            Tier::Ward => self.ward.as_deref(),
        }
    }
}

/// The two strings published to the host form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationValue {
    /// Machine value: `"{province}_{district}_{ward}"`
    pub value: String,
    /// Display value: `"{ward}, {district}, {province}"`
    pub label: String,
}

impl LocationValue {
    pub fn new(province: &str, district: &str, ward: &str) -> Self {
        Self {
            value: format!(
                "{province}{sep}{district}{sep}{ward}",
                sep = VALUE_SEPARATOR
            ),
            label: format!("{ward}, {district}, {province}"),
        }
    }
}

impl fmt::Display for LocationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
