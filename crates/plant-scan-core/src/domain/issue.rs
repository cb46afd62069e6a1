//! Issue types raised by the quality checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reason an image was refused by the quality gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Type of issue detected.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Human-readable reason shown to the user.
    pub message: String,
}

impl Issue {
    /// Creates an issue carrying the standard message for its type.
    #[must_use]
    pub fn new(issue_type: IssueType) -> Self {
        Self {
            issue_type,
            message: issue_type.message().to_string(),
        }
    }
}

impl From<IssueType> for Issue {
    fn from(issue_type: IssueType) -> Self {
        Self::new(issue_type)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The type of quality issue.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// The input could not be decoded into pixels.
    LoadFailed,
    /// Width or height below the minimum.
    LowResolution,
    /// Mean brightness below the minimum.
    TooDark,
    /// Mean brightness above the maximum.
    TooBright,
    /// Grayscale standard deviation below the minimum.
    Blurry,
}

impl IssueType {
    /// Returns the user-facing message for this issue type.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LoadFailed => "image failed to load",
            Self::LowResolution => "resolution too low",
            Self::TooDark => "image too dark",
            Self::TooBright => "image too bright",
            Self::Blurry => "image out of focus / blurry",
        }
    }
}
