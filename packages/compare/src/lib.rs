#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Version comparison workflow for `CodeGlance`.
//!
//! This crate ties the git backend and the AI provider together: it fetches
//! a repository's two most recent commits, materializes both working trees,
//! intersects their tracked source files by name, and asks the backend for
//! release notes plus a README-style explanation of the newer version.

mod analyzer;
mod matcher;
mod workflow;

pub use analyzer::{AnalysisError, ChangeAnalyzer, SYSTEM_INSTRUCTION, build_prompt};
pub use matcher::common_files;
pub use workflow::{CompareError, ComparisonService, RepoComparison};

/// Filename extension of tracked source files.
pub const TRACKED_EXTENSION: &str = "py";
