//! Error types for the quadtree index.

use crate::point::PointId;
use thiserror::Error;

/// Errors produced while building, configuring or querying a quadtree.
///
/// Insert rejections (out of bounds, duplicate id) are not errors; they are
/// reported through the boolean return of [`crate::QuadTree::insert`].
#[derive(Debug, Error)]
pub enum QuadTreeError {
    /// A rectangle was constructed with a non-positive or non-finite extent.
    #[error("invalid rectangle extent: width {w}, height {h} (both must be finite and > 0)")]
    InvalidRectangle { w: f64, h: f64 },

    /// Bad coordinates or configuration values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The point store could not resolve an id that the tree holds.
    #[error("point store has no record for id {0}")]
    UnresolvedPoint(PointId),

    /// The point store already holds a record with this id.
    #[error("point {0} already exists in the store")]
    DuplicatePoint(PointId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, QuadTreeError>;
