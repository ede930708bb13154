#![deny(clippy::all)]

//! mdx-scope - command line driver for the Gatsby MDX loader
//!
//! Runs the loader over wrapper modules on disk, with JSON fixtures standing
//! in for the data layer.

pub mod fixtures;
pub mod run;

pub use run::{run, RunOptions};

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
