use rust_decimal::Decimal;
use thiserror::Error;

use crate::regions::Region;

/// Errors raised by allocation editing and persistence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("Region allocations must total 100%, got {0}%")]
    InvalidTotal(Decimal),

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),

    #[error("Allocation for {region} must be between 0 and 100, got {value}")]
    PercentOutOfRange { region: Region, value: Decimal },

    #[error("Invalid allocation field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}
