//! Plant Scan Adapters - External adapters for plant-scan.
//!
//! This crate provides adapters for:
//! - Filesystem image source

pub mod fs;

pub use fs::FsImageSource;
