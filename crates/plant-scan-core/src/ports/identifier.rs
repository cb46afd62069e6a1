//! Species identification port.

use image::DynamicImage;

use crate::domain::SpeciesGuess;

/// Port for the species identification service.
///
/// Only photos accepted by the quality gate are handed to an identifier.
pub trait PlantIdentifier: Send + Sync {
    /// Returns the name of this identifier.
    fn name(&self) -> &'static str;

    /// Identifies the plant in a decoded photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot produce a guess.
    fn identify(&self, image: &DynamicImage) -> anyhow::Result<SpeciesGuess>;
}
