//! Calculation modules for the simplified-scheme consumption tax return.
//!
//! [`simplified`] computes the return, [`derivation`] describes the ordered
//! chain of truncating stages it follows, and [`field_mapping`] lays the
//! results out on the schedules and forms.

pub mod common;
pub mod derivation;
pub mod field_mapping;
pub mod simplified;

pub use derivation::DerivationStage;
pub use field_mapping::{FieldEntry, FieldId, FieldMapping, Form, FormLine};
pub use simplified::{
    SimplifiedTaxConfig, SimplifiedTaxError, SimplifiedTaxResult, SimplifiedTaxWorksheet,
};
