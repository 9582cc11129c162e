//! Allocation domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use super::AllocationError;
use crate::constants::{CHANGE_TOLERANCE, FULL_ALLOCATION, MIN_REGION_PERCENT};
use crate::regions::Region;

/// Percentage and hedge flag of a single region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSetting {
    pub percent: Decimal,
    pub currency_hedge: bool,
}

/// Percentages and hedge flags for all nine regions.
///
/// On the wire and in storage each region is two flat fields,
/// `<key>_size` and `<key>_currency_hedge`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionAllocation {
    pub(crate) settings: [RegionSetting; Region::COUNT],
}

impl RegionAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings<I>(settings: I) -> Self
    where
        I: IntoIterator<Item = (Region, RegionSetting)>,
    {
        let mut allocation = Self::default();
        for (region, setting) in settings {
            allocation.settings[region.index()] = setting;
        }
        allocation
    }

    pub fn with_percent(mut self, region: Region, percent: Decimal) -> Self {
        self.assign(region, percent);
        self
    }

    pub fn with_currency_hedge(mut self, region: Region, hedged: bool) -> Self {
        self.settings[region.index()].currency_hedge = hedged;
        self
    }

    pub fn setting(&self, region: Region) -> RegionSetting {
        self.settings[region.index()]
    }

    pub fn percent(&self, region: Region) -> Decimal {
        self.settings[region.index()].percent
    }

    pub fn currency_hedge(&self, region: Region) -> bool {
        self.settings[region.index()].currency_hedge
    }

    /// Overwrites one percentage without touching the other regions.
    pub fn assign(&mut self, region: Region, percent: Decimal) {
        self.settings[region.index()].percent = percent;
    }

    /// Returns true when the flag actually changed.
    pub fn set_currency_hedge(&mut self, region: Region, hedged: bool) -> bool {
        let setting = &mut self.settings[region.index()];
        if setting.currency_hedge == hedged {
            return false;
        }
        setting.currency_hedge = hedged;
        true
    }

    pub fn total(&self) -> Decimal {
        self.settings.iter().map(|s| s.percent).sum()
    }

    /// An allocation with nothing assigned falls back to the base portfolio set.
    pub fn is_unallocated(&self) -> bool {
        self.total().is_zero()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &RegionSetting)> + '_ {
        Region::ALL
            .iter()
            .copied()
            .zip(self.settings.iter())
    }

    pub fn validate_total(&self) -> Result<(), AllocationError> {
        let total = self.total();
        if total != FULL_ALLOCATION {
            return Err(AllocationError::InvalidTotal(total));
        }
        Ok(())
    }

    pub fn validate_ranges(&self) -> Result<(), AllocationError> {
        for (region, setting) in self.iter() {
            if setting.percent < MIN_REGION_PERCENT || setting.percent > FULL_ALLOCATION {
                return Err(AllocationError::PercentOutOfRange {
                    region,
                    value: setting.percent,
                });
            }
        }
        Ok(())
    }

    /// Compares against a saved baseline. Percent moves of one point or less
    /// are ignored.
    pub fn changes_from(&self, baseline: &RegionAllocation) -> ChangeRecord {
        let mut record = ChangeRecord::default();
        for (region, setting) in self.iter() {
            let saved = baseline.setting(region);
            record.changes[region.index()] = RegionChange {
                percent: (setting.percent - saved.percent).abs() > CHANGE_TOLERANCE,
                currency_hedge: setting.currency_hedge != saved.currency_hedge,
            };
        }
        record
    }

    /// Builds an allocation from flat `<key>_size` / `<key>_currency_hedge` fields.
    /// Missing fields default to zero and unhedged; unrelated fields are ignored.
    pub fn from_fields(fields: &HashMap<String, Value>) -> Result<Self, AllocationError> {
        let mut allocation = Self::default();
        for region in Region::ALL {
            let size_field = region.size_field();
            if let Some(value) = fields.get(&size_field) {
                allocation.assign(region, parse_size(&size_field, value)?);
            }
            let hedge_field = region.currency_hedge_field();
            if let Some(value) = fields.get(&hedge_field) {
                allocation.settings[region.index()].currency_hedge =
                    parse_hedge(&hedge_field, value)?;
            }
        }
        Ok(allocation)
    }
}

fn parse_size(field: &str, value: &Value) -> Result<Decimal, AllocationError> {
    let invalid = |reason: String| AllocationError::InvalidField {
        field: field.to_string(),
        reason,
    };
    match value {
        Value::Null => Ok(Decimal::ZERO),
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|e| invalid(e.to_string()))
        }
        Value::String(s) => Decimal::from_str(s.trim()).map_err(|e| invalid(e.to_string())),
        other => Err(invalid(format!("expected a number, got {}", other))),
    }
}

fn parse_hedge(field: &str, value: &Value) -> Result<bool, AllocationError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_i64().is_some() => Ok(n.as_i64() != Some(0)),
        other => Err(AllocationError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a boolean, got {}", other),
        }),
    }
}

impl Serialize for RegionAllocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Region::COUNT * 2))?;
        for (region, setting) in self.iter() {
            map.serialize_entry(&region.size_field(), &setting.percent)?;
            map.serialize_entry(&region.currency_hedge_field(), &setting.currency_hedge)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionAllocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = HashMap::<String, Value>::deserialize(deserializer)?;
        RegionAllocation::from_fields(&fields).map_err(de::Error::custom)
    }
}

/// Which parts of one region differ from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionChange {
    pub percent: bool,
    pub currency_hedge: bool,
}

impl RegionChange {
    pub fn any(&self) -> bool {
        self.percent || self.currency_hedge
    }
}

/// Per-region change flags against the last saved baseline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeRecord {
    changes: [RegionChange; Region::COUNT],
}

impl ChangeRecord {
    pub fn get(&self, region: Region) -> RegionChange {
        self.changes[region.index()]
    }

    pub fn has_changed(&self) -> bool {
        self.changes.iter().any(RegionChange::any)
    }

    pub fn changed_regions(&self) -> Vec<Region> {
        Region::ALL
            .iter()
            .copied()
            .filter(|region| self.get(*region).any())
            .collect()
    }
}

/// Persisted custom allocation of one account or goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAllocation {
    pub account_id: String,
    pub portfolio_set_id: String,
    #[serde(flatten)]
    pub regions: RegionAllocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl AccountAllocation {
    pub fn new(
        account_id: impl Into<String>,
        portfolio_set_id: impl Into<String>,
        regions: RegionAllocation,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            portfolio_set_id: portfolio_set_id.into(),
            regions,
            updated_at: None,
        }
    }

    /// Checks everything a save requires, including the 100% total.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.account_id.trim().is_empty() {
            return Err(AllocationError::InvalidField {
                field: "accountId".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        if self.portfolio_set_id.trim().is_empty() {
            return Err(AllocationError::InvalidField {
                field: "portfolioSetId".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        self.regions.validate_ranges()?;
        self.regions.validate_total()
    }
}

/// Result of applying one slider move to a stored allocation without saving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedistributionPreview {
    pub allocation: AccountAllocation,
    pub affected: Vec<Region>,
}
