//! Test support utilities for plant-scan.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the quality gate and the scanner session.
//!
//! # Example
//!
//! ```
//! use plant_scan_test_support::{encode_png, MockImageSource, SyntheticImageBuilder};
//! use plant_scan_core::{ImageInput, ImageSource};
//!
//! // Create synthetic test images
//! let sharp = SyntheticImageBuilder::acceptable();
//! let blurry = SyntheticImageBuilder::uniform_gray(128, 128, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![
//!     ImageInput::new("sharp.png", encode_png(&sharp)),
//!     ImageInput::new("blurry.png", encode_png(&blurry)),
//! ]);
//! assert_eq!(source.count_hint(), Some(2));
//! ```

mod builders;
mod mocks;

pub use builders::{data_url, encode, encode_png, SyntheticImageBuilder};
pub use mocks::{
    BatchTotals, MockImageSource, MockPlantIdentifier, MockProgressSink, MockResultOutput,
};
