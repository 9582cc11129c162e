//! Region domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::allocations::AllocationError;

/// A geographic allocation bucket.
///
/// The declaration order is the iteration order used everywhere, including
/// tie-breaks during redistribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Au,
    Dm,
    Usa,
    Uk,
    Europe,
    Japan,
    Asia,
    China,
    Em,
}

impl Region {
    pub const COUNT: usize = 9;

    pub const ALL: [Region; Region::COUNT] = [
        Region::Au,
        Region::Dm,
        Region::Usa,
        Region::Uk,
        Region::Europe,
        Region::Japan,
        Region::Asia,
        Region::China,
        Region::Em,
    ];

    /// Stable lowercase key, used for wire and storage field names.
    pub fn key(self) -> &'static str {
        match self {
            Region::Au => "au",
            Region::Dm => "dm",
            Region::Usa => "usa",
            Region::Uk => "uk",
            Region::Europe => "europe",
            Region::Japan => "japan",
            Region::Asia => "asia",
            Region::China => "china",
            Region::Em => "em",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Region::Au => "Australia",
            Region::Dm => "Developed Markets",
            Region::Usa => "United States",
            Region::Uk => "United Kingdom",
            Region::Europe => "Europe",
            Region::Japan => "Japan",
            Region::Asia => "Asia (ex-Japan)",
            Region::China => "China",
            Region::Em => "Emerging Markets",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Name of the percentage field, e.g. `au_size`.
    pub fn size_field(self) -> String {
        format!("{}_size", self.key())
    }

    /// Name of the hedge flag field, e.g. `au_currency_hedge`.
    pub fn currency_hedge_field(self) -> String {
        format!("{}_currency_hedge", self.key())
    }

    /// Region that first absorbs the difference when `self` is moved.
    pub fn default_absorber(self) -> Region {
        match self {
            Region::Dm => Region::Au,
            _ => Region::Dm,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.key() == key)
            .ok_or_else(|| AllocationError::UnknownRegion(s.to_string()))
    }
}

/// Key and display title of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    pub key: String,
    pub title: String,
}

impl From<Region> for RegionInfo {
    fn from(region: Region) -> Self {
        Self {
            key: region.key().to_string(),
            title: region.title().to_string(),
        }
    }
}
