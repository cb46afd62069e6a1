//! Progress reporting port for UI integration.

use crate::domain::QualityReport;

/// Events emitted during a batch for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Assessment started for a photo.
    Started {
        /// Path to the photo.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total photos in batch, if known.
        total: Option<usize>,
    },
    /// Assessment completed for a photo.
    Completed {
        /// The quality report.
        report: QualityReport,
    },
    /// A photo was skipped because it could not be read.
    Skipped {
        /// Path to the photo.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All photos have been processed.
    Finished {
        /// Total photos assessed.
        processed: usize,
        /// Assessed photos that did not pass the gate.
        rejected: usize,
        /// Rejected photos whose bytes did not decode at all.
        load_failed: usize,
        /// Total photos skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
