//! Progress reporting on stderr, with an indicatif bar when attached to a terminal.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use plant_scan_core::{IssueType, ProgressEvent, ProgressSink, QualityReport};

/// Progress adapter for the check command.
///
/// With a bar, rejections are counted and summarized when the batch ends.
/// Without one, each rejected photo gets its own line naming the reasons.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of photos, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show a bar; otherwise print per-photo verdicts
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        let bar = (!quiet && show_bar).then(|| {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self { bar, quiet }
    }
}

/// One-line verdict for a rejected photo.
fn rejection_line(report: &QualityReport) -> String {
    if report.quality.has_issue(IssueType::LoadFailed) {
        format!("{}: failed to load", report.path)
    } else {
        format!(
            "{}: rejected ({})",
            report.path,
            report.quality.reasons().join(", ")
        )
    }
}

/// End-of-batch summary.
fn summary(processed: usize, rejected: usize, load_failed: usize, skipped: usize) -> String {
    let mut line = format!("Done: {processed} checked, {rejected} rejected");
    if load_failed > 0 {
        line.push_str(&format!(" ({load_failed} failed to load)"));
    }
    line.push_str(&format!(", {skipped} skipped"));
    line
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Started { path, index, total } => {
                if let Some(bar) = &self.bar {
                    if let Some(t) = total {
                        bar.set_length(t as u64);
                    }
                    bar.set_position(index as u64);
                    bar.set_message(path);
                }
            }
            ProgressEvent::Completed { report } => match &self.bar {
                Some(bar) => bar.inc(1),
                None if !report.quality.is_acceptable() => eprintln!("{}", rejection_line(&report)),
                None => {}
            },
            ProgressEvent::Skipped { path, reason } => {
                let line = format!("WARN: Skipping {path}: {reason}");
                match &self.bar {
                    Some(bar) => {
                        bar.inc(1);
                        bar.println(line);
                    }
                    None => eprintln!("{line}"),
                }
            }
            ProgressEvent::Finished {
                processed,
                rejected,
                load_failed,
                skipped,
            } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(summary(processed, rejected, load_failed, skipped));
                }
            }
        }
    }
}
