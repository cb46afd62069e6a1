//! Scanner session: quality gate followed by species identification.
//!
//! What the scanner currently shows is a single [`ScanState`] value, so a
//! rejected photo and an identification result can never be visible at the
//! same time.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assessor::QualityAssessor;
use crate::decode::decode_image;
use crate::domain::{ImageQuality, ScanFeedback, ScanRecord, SpeciesGuess};
use crate::ports::PlantIdentifier;

/// What the scanner is currently showing.
#[derive(Debug, Clone, Default)]
pub enum ScanState {
    /// Nothing submitted yet, or the session was reset.
    #[default]
    Idle,
    /// The photo did not pass the quality gate.
    Rejected {
        /// Verdict listing the reasons.
        quality: ImageQuality,
    },
    /// The photo passed and the identifier produced a guess.
    Identified {
        /// Verdict of the accepted photo.
        quality: ImageQuality,
        /// The identifier's guess.
        guess: SpeciesGuess,
    },
    /// The photo passed but the identifier failed.
    Failed {
        /// Verdict of the accepted photo.
        quality: ImageQuality,
        /// Error reported by the identifier.
        reason: String,
    },
}

impl ScanState {
    /// The quality verdict behind the current state, if any.
    #[must_use]
    pub const fn quality(&self) -> Option<&ImageQuality> {
        match self {
            Self::Idle => None,
            Self::Rejected { quality }
            | Self::Identified { quality, .. }
            | Self::Failed { quality, .. } => Some(quality),
        }
    }
}

/// Errors raised by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Feedback was given while no identification is shown.
    #[error("no identification to give feedback on")]
    NoIdentification,
}

/// One scanner screen: at most one photo is being handled at a time.
pub struct ScannerSession<I> {
    assessor: QualityAssessor,
    identifier: I,
    state: ScanState,
    history: Vec<ScanRecord>,
}

impl<I: PlantIdentifier> ScannerSession<I> {
    /// Creates an idle session.
    #[must_use]
    pub const fn new(assessor: QualityAssessor, identifier: I) -> Self {
        Self {
            assessor,
            identifier,
            state: ScanState::Idle,
            history: Vec::new(),
        }
    }

    /// Submits a photo, replacing whatever the scanner was showing.
    ///
    /// The identifier is only consulted for photos the quality gate accepts.
    pub fn submit(&mut self, data: &[u8]) -> &ScanState {
        self.state = match decode_image(data) {
            Err(e) => {
                debug!("Scan rejected, decode failed: {e}");
                ScanState::Rejected {
                    quality: ImageQuality::load_failed(),
                }
            }
            Ok(image) => {
                let quality = self.assessor.assess_image(&image);
                if quality.is_acceptable() {
                    match self.identifier.identify(&image) {
                        Ok(guess) => {
                            info!(
                                "{} identified {} ({:.0}%)",
                                self.identifier.name(),
                                guess.species_name,
                                guess.confidence * 100.0
                            );
                            self.history.push(ScanRecord {
                                id: self.history.len() as u64 + 1,
                                quality: quality.clone(),
                                guess: guess.clone(),
                                feedback: None,
                            });
                            ScanState::Identified { quality, guess }
                        }
                        Err(e) => {
                            warn!("Identification failed: {e:#}");
                            ScanState::Failed {
                                quality,
                                reason: format!("{e:#}"),
                            }
                        }
                    }
                } else {
                    debug!("Scan rejected: {}", quality.reasons().join(", "));
                    ScanState::Rejected { quality }
                }
            }
        };
        &self.state
    }

    /// Returns the scanner to idle. History is kept.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }

    /// Records the user's verdict on the identification currently shown.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoIdentification`] unless the current state is
    /// [`ScanState::Identified`].
    pub fn record_feedback(&mut self, feedback: ScanFeedback) -> Result<(), SessionError> {
        if !matches!(self.state, ScanState::Identified { .. }) {
            return Err(SessionError::NoIdentification);
        }
        let record = self
            .history
            .last_mut()
            .ok_or(SessionError::NoIdentification)?;
        record.feedback = Some(feedback);
        Ok(())
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &ScanState {
        &self.state
    }

    /// All successful identifications in this session, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ScanRecord] {
        &self.history
    }

    /// The identifier in use.
    #[must_use]
    pub const fn identifier(&self) -> &I {
        &self.identifier
    }
}
