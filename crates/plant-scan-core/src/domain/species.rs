//! Species identification results and scan history.

use serde::{Deserialize, Serialize};

use super::ImageQuality;

/// Best guess returned by a plant identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesGuess {
    /// Common name.
    pub species_name: String,
    /// Latin binomial.
    pub scientific_name: String,
    /// Identifier confidence (0.0 to 1.0).
    pub confidence: f32,
    /// Whether the plant looks under-watered.
    pub needs_water: bool,
    /// Suggested change in light exposure.
    pub light: LightRecommendation,
    /// Care tips.
    pub tips: Vec<String>,
    /// Runner-up candidates, best first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Candidate>,
}

/// A runner-up species candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Common name.
    pub name: String,
    /// Latin binomial.
    pub scientific_name: String,
    /// Identifier confidence (0.0 to 1.0).
    pub confidence: f32,
}

/// Light adjustment suggested for the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightRecommendation {
    /// Move to a brighter spot.
    More,
    /// Move to a shadier spot.
    Less,
    /// Current light is fine.
    Ok,
}

/// User verdict on an identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanFeedback {
    /// The identification was right.
    Correct,
    /// The identification was wrong.
    Incorrect,
}

/// One successful identification kept in the session history.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    /// Sequence number within the session, starting at 1.
    pub id: u64,
    /// Quality verdict of the submitted photo.
    pub quality: ImageQuality,
    /// What the identifier returned.
    pub guess: SpeciesGuess,
    /// Feedback given by the user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<ScanFeedback>,
}
