//! Core domain models for the monitor
//!
//! This module defines pipelines, stages, their status, and the registry
//! that holds them in memory.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod state;

pub use error::*;
pub use pipeline::*;
pub use registry::*;
pub use state::*;
