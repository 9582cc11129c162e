//! Regions module - the fixed set of geographic allocation buckets.

mod regions_model;

pub use regions_model::{Region, RegionInfo};
