//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod identifier;
mod image_source;
mod progress;
mod result_output;

pub use identifier::PlantIdentifier;
pub use image_source::{ImageSource, ReadError};
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
