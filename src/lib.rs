//! shrinkray mirrors a static site tree into an output directory, minifying
//! HTML, CSS and JavaScript on the way and copying everything else verbatim.

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;

pub use crate::core::{BuildConfig, BuildResult, BuildService, TreeProcessorService};
pub use crate::utils::{Result, ShrinkError};
