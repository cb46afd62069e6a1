//! Mock implementations of core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use image::DynamicImage;
use plant_scan_core::domain::{
    Candidate, ImageInput, LightRecommendation, QualityReport, SpeciesGuess,
};
use plant_scan_core::metrics::ImageMetrics;
use plant_scan_core::ports::{
    ImageSource, PlantIdentifier, ProgressEvent, ProgressSink, ReadError, ResultOutput,
};

/// In-memory photo source.
///
/// Entries are yielded in insertion order; unreadable entries surface as
/// [`ReadError`]s carrying their path.
#[derive(Default)]
pub struct MockImageSource {
    entries: Vec<Result<ImageInput, String>>,
    iterations: AtomicUsize,
}

impl MockImageSource {
    /// Creates a source yielding `images`.
    #[must_use]
    pub fn new(images: Vec<ImageInput>) -> Self {
        Self {
            entries: images.into_iter().map(Ok).collect(),
            iterations: AtomicUsize::new(0),
        }
    }

    /// Creates a source with nothing in it.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a readable entry.
    #[must_use]
    pub fn with_input(mut self, input: ImageInput) -> Self {
        self.entries.push(Ok(input));
        self
    }

    /// Appends an entry that fails to read.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.entries.push(Err(path.into()));
        self
    }

    /// How many times `images()` was called.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.iterations.load(Ordering::SeqCst)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInput, ReadError>> + Send + '_> {
        self.iterations.fetch_add(1, Ordering::SeqCst);
        Box::new(self.entries.iter().map(|entry| match entry {
            Ok(input) => Ok(input.clone()),
            Err(path) => Err(ReadError::new(
                path.clone(),
                anyhow::anyhow!("mock source cannot read this entry"),
            )),
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Collects written reports in memory.
#[derive(Default)]
pub struct MockResultOutput {
    reports: Mutex<Vec<QualityReport>>,
    flushes: AtomicUsize,
}

impl MockResultOutput {
    /// Creates an empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports written so far, in order.
    #[must_use]
    pub fn reports(&self) -> Vec<QualityReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Paths of the reports written so far, in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.reports().into_iter().map(|r| r.path).collect()
    }

    /// How many times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &QualityReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Totals carried by a `Finished` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTotals {
    /// Photos assessed.
    pub processed: usize,
    /// Photos that failed the gate.
    pub rejected: usize,
    /// Rejections caused by undecodable bytes.
    pub load_failed: usize,
    /// Photos that could not be read.
    pub skipped: usize,
}

/// Records progress events for later assertions.
#[derive(Default)]
pub struct MockProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MockProgressSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received, in order.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Paths named by `Skipped` events, in order.
    #[must_use]
    pub fn skipped_paths(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Skipped { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Totals from the `Finished` event, if the batch ended.
    #[must_use]
    pub fn totals(&self) -> Option<BatchTotals> {
        self.events().into_iter().find_map(|e| match e {
            ProgressEvent::Finished {
                processed,
                rejected,
                load_failed,
                skipped,
            } => Some(BatchTotals {
                processed,
                rejected,
                load_failed,
                skipped,
            }),
            _ => None,
        })
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Catalog entry for the mock identifier.
struct Species {
    name: &'static str,
    scientific_name: &'static str,
    tips: &'static [&'static str],
}

const CATALOG: &[Species] = &[
    Species {
        name: "Mexican snowball",
        scientific_name: "Echeveria elegans",
        tips: &["Water only when the soil is completely dry", "Give it full sun"],
    },
    Species {
        name: "Swiss cheese plant",
        scientific_name: "Monstera deliciosa",
        tips: &["Keep out of direct afternoon sun", "Wipe the leaves monthly"],
    },
    Species {
        name: "Moth orchid",
        scientific_name: "Phalaenopsis amabilis",
        tips: &["Water weekly by soaking the roots", "Prefers bright, indirect light"],
    },
];

/// Deterministic stand-in for the species identification service.
///
/// The guess depends only on the photo's brightness and sharpness, so the
/// same pixels always produce the same species and confidence.
pub struct MockPlantIdentifier {
    fail: bool,
    calls: AtomicUsize,
}

impl MockPlantIdentifier {
    /// Creates an identifier that always answers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates an identifier whose every call fails.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns how many times `identify` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockPlantIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantIdentifier for MockPlantIdentifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn identify(&self, image: &DynamicImage) -> anyhow::Result<SpeciesGuess> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("mock identifier configured to fail");
        }

        let metrics = ImageMetrics::from_image(image);
        let index = ((metrics.brightness / 256.0) * CATALOG.len() as f64) as usize;
        let index = index.min(CATALOG.len() - 1);
        let species = &CATALOG[index];
        let confidence = (0.5 + metrics.sharpness / 200.0).min(0.99) as f32;

        let light = if metrics.brightness < 90.0 {
            LightRecommendation::More
        } else if metrics.brightness > 170.0 {
            LightRecommendation::Less
        } else {
            LightRecommendation::Ok
        };

        let alternatives = CATALOG
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .zip([0.5f32, 0.25])
            .map(|((_, s), factor)| Candidate {
                name: s.name.to_string(),
                scientific_name: s.scientific_name.to_string(),
                confidence: confidence * factor,
            })
            .collect();

        Ok(SpeciesGuess {
            species_name: species.name.to_string(),
            scientific_name: species.scientific_name.to_string(),
            confidence,
            needs_water: metrics.brightness < 100.0,
            light,
            tips: species.tips.iter().map(|t| (*t).to_string()).collect(),
            alternatives,
        })
    }
}
