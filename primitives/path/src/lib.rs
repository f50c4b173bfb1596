// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Path utility functions for finding project roots and naming pipeline outputs.
//!
//! This module provides utilities for finding project roots, rendering paths
//! relative to the project for log output, and deriving the directories and
//! file names the pipeline writes to.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
