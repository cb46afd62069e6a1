//! Core domain types for the plant photo quality gate.

mod issue;
mod policy;
mod quality;
mod quality_check;
mod species;

pub use issue::{Issue, IssueType};
pub use policy::QualityPolicy;
pub use quality::{ImageInput, ImageQuality, QualityReport, Resolution};
pub use quality_check::QualityCheck;
pub use species::{Candidate, LightRecommendation, ScanFeedback, ScanRecord, SpeciesGuess};
