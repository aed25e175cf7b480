//! Error types for the dashgrid engine.
//!
//! Layout mutations never fail: out-of-range geometry is clamped and unknown
//! item ids are ignored. These errors cover the places where a caller hands
//! us something we refuse to guess about.

use thiserror::Error;

use crate::types::ItemId;

/// Top-level error type for the dashgrid engine.
#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Breakpoint(#[from] BreakpointError),
}

/// Errors in container configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Column count must be at least 1")]
    ZeroColumns,

    #[error("Row height must be a positive finite number, got {value}")]
    InvalidRowHeight { value: f32 },

    #[error("Margin must be non-negative and finite, got [{x}, {y}]")]
    InvalidMargin { x: f32, y: f32 },

    #[error("Container width must be non-negative and finite, got {value}")]
    InvalidContainerWidth { value: f32 },

    #[error("Transform scale must be a positive finite number, got {value}")]
    InvalidTransformScale { value: f32 },

    #[error("Max rows must be at least 1")]
    ZeroMaxRows,
}

/// Errors reported by layout validation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate item id '{id}' at positions {first} and {second}")]
    DuplicateId {
        id: ItemId,
        first: usize,
        second: usize,
    },

    #[error("Item '{id}' has zero {axis}")]
    ZeroSize { id: ItemId, axis: &'static str },

    #[error("Item '{id}' has min {axis} {min} greater than max {axis} {max}")]
    InvertedBounds {
        id: ItemId,
        axis: &'static str,
        min: u32,
        max: u32,
    },
}

/// Errors in breakpoint lookups.
#[derive(Debug, Error, PartialEq)]
pub enum BreakpointError {
    #[error("Unknown breakpoint: {name}")]
    Unknown { name: String },

    #[error("Breakpoint table is empty")]
    Empty,
}
