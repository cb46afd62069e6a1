//! Plant Scan Core - Domain logic and quality checks
//!
//! This crate contains the image-quality gate applied to plant photos before
//! species identification: decoding, pixel metrics, the individual quality
//! checks, the assessor that runs them, and the scanner session that wires
//! the gate to an identifier port.

pub mod assessor;
pub mod decode;
pub mod domain;
pub mod metrics;
pub mod modules;
pub mod ports;
pub mod scanner;

pub use assessor::QualityAssessor;
pub use decode::{decode_image, DecodeError};
pub use domain::{
    Candidate, ImageInput, ImageQuality, Issue, IssueType, LightRecommendation, QualityCheck,
    QualityPolicy, QualityReport, Resolution, ScanFeedback, ScanRecord, SpeciesGuess,
};
pub use metrics::ImageMetrics;
pub use modules::{ExposureCheck, ResolutionCheck, SharpnessCheck};
pub use ports::{
    ImageSource, PlantIdentifier, ProgressEvent, ProgressSink, ReadError, ResultOutput,
};
pub use scanner::{ScanState, ScannerSession, SessionError};
