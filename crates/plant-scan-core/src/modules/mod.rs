//! Quality check implementations.
//!
//! Each check implements the `QualityCheck` trait for one rule of the gate.

mod exposure;
mod resolution;
mod sharpness;

pub use exposure::ExposureCheck;
pub use resolution::ResolutionCheck;
pub use sharpness::SharpnessCheck;
