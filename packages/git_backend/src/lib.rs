#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Git backend abstraction for `CodeGlance`.
//!
//! This crate provides the `GitBackend` trait for repository acquisition and
//! the `Snapshot` guard that owns a materialized working tree.

mod backend;
mod snapshot;

pub use backend::GitBackend;
pub use codeglance_git_backend_models as models;
pub use snapshot::Snapshot;
