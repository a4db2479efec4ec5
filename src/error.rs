// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while translating swara or tonic text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Base symbol is not one of the twelve recognized degrees
    #[error("unknown swara symbol: {0:?}")]
    UnknownSymbol(String),
    /// Tonic name is not a Western pitch class
    #[error("unknown tonic: {0:?}")]
    UnknownTonic(String),
}

/// Errors raised when an externally produced melody does not match the
/// note event contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    /// Start offset is negative or not finite
    #[error("event {index} has invalid start time {start}")]
    InvalidStart { index: usize, start: f64 },
    /// Duration is negative or not finite
    #[error("event {index} has invalid duration {duration}")]
    InvalidDuration { index: usize, duration: f64 },
    /// Velocity above the 0-100 range
    #[error("event {index} has velocity {velocity} outside 0-100")]
    InvalidVelocity { index: usize, velocity: u8 },
    /// Start times go backwards
    #[error("event {index} starts at {start} before previous event at {previous}")]
    OutOfOrder {
        index: usize,
        start: f64,
        previous: f64,
    },
}
