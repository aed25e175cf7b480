//! Core types, configuration, and errors for the dashgrid layout engine.
//!
//! This crate provides the foundational types shared by all other dashgrid crates:
//! - Layout item and rectangle types on the integer grid
//! - Container configuration
//! - Error types

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
