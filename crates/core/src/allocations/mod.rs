//! Allocations module - region allocation model, redistribution, editor and services.

mod allocations_editor;
mod allocations_errors;
mod allocations_model;
mod allocations_service;
mod allocations_traits;
mod redistribution;


pub use allocations_editor::{AllocationEditor, AllocationObserver, EditorState, NoopObserver};
pub use allocations_errors::AllocationError;
pub use allocations_model::{
    AccountAllocation, ChangeRecord, RedistributionPreview, RegionAllocation, RegionChange,
    RegionSetting,
};
pub use allocations_service::AllocationService;
pub use allocations_traits::{AllocationRepositoryTrait, AllocationServiceTrait};
