//! Validation for geographic coordinates.

use crate::error::{QuadTreeError, Result};
use crate::point::Locatable;

/// Validates that a point has a finite longitude in [-180.0, 180.0] and a
/// finite latitude in [-90.0, 90.0].
///
/// This is a coordinate sanity check only. Whether the point falls inside a
/// tree's domain (which is half-open) is decided by the tree itself.
///
/// # Examples
///
/// ```
/// use spatio_quadtree::Location;
/// use spatio_quadtree::validation::validate_geographic_point;
///
/// let nyc = Location::new(1u64, 40.7128, -74.0060);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// // Invalid longitude
/// let invalid = Location::new(2u64, 40.0, 200.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point<P: Locatable + ?Sized>(point: &P) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(QuadTreeError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(QuadTreeError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(QuadTreeError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(QuadTreeError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}
