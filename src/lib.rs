// SPDX-License-Identifier: CC0-1.0

//! schemagen umbrella crate.
//!
//! Build scripts depend on this crate alone: it re-exports the pipeline entry
//! points and the types needed to configure a run. The stages themselves live
//! in the workspace member crates under `compiler`, `backends` and
//! `primitives`.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! let config = schemagen::Config::load("schemagen.toml").expect("config");
//! let base = std::path::Path::new(".");
//! let resolver = schemagen::LocalRepositoryResolver::new(config.repository_root(base));
//! let report = schemagen::run(&config.pipeline_config(base), Arc::new(resolver)).expect("run");
//! assert!(report.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

pub use config::{ArtifactItemConfig, Config, ConfigError};
pub use logging::init as init_logging;
pub use pipeline::{
    run, CompileRootRegistrar, ConfigurationError, Pipeline, PipelineBuilder, PipelineError,
    RunReport, SourceSink,
};
pub use repository::LocalRepositoryResolver;
pub use resolver::{ArtifactResolver, ArtifactRequest, DynResolver, ResolutionError};
pub use types::{ArtifactCoordinate, ArtifactItem, OverwritePolicy, PipelineConfig};

/// Miscellaneous metadata about the schemagen workspace.
pub mod schemagen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
