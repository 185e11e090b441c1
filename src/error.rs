// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.hpp (clipperException)
//
// Error type shared by ingestion, the sweep, and the offsetter.
//
// Degenerate input is not an error: such paths are dropped and `add_path`
// reports `Ok(false)`. Broken engine invariants panic instead of returning.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// Open paths may only be added as subjects.
    #[error("open paths are only supported as subject paths")]
    OpenPathNotSupported,

    #[error("coordinate ({x}, {y}) is outside the supported range")]
    CoordinateOutOfRange { x: i64, y: i64 },

    /// No ordering of the scanbeam's intersections keeps every swap between
    /// adjacent active edges.
    #[error("unable to find an adjacency-consistent intersection order")]
    IntersectionOrder,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type ClipResult<T> = Result<T, ClipError>;
