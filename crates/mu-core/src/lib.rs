//! # mu-core
//!
//! Error taxonomy and result value types shared by the mustat crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error enum and `Result` alias.
pub mod error;
/// Fit, bootstrap and toy-MC result types.
pub mod types;

pub use error::{Error, Result};
pub use types::{BootstrapResult, GaussianFit, ToyMcResult};
