//! Point identities and the records indexed by the quadtree.
//!
//! The tree never owns point records. It stores [`PointId`]s and reads
//! coordinates through [`Locatable`] at insert time and through a
//! [`PointStore`](crate::store::PointStore) at query time.

use bytes::Bytes;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an indexed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u64);

impl PointId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PointId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can be inserted into a quadtree: an identity plus a
/// position in the tree's coordinate space.
///
/// For geographic data `x` is longitude and `y` is latitude.
pub trait Locatable {
    fn id(&self) -> PointId;
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn id(&self) -> PointId {
        (**self).id()
    }

    fn x(&self) -> f64 {
        (**self).x()
    }

    fn y(&self) -> f64 {
        (**self).y()
    }
}

impl Locatable for (PointId, Point) {
    fn id(&self) -> PointId {
        self.0
    }

    fn x(&self) -> f64 {
        self.1.x()
    }

    fn y(&self) -> f64 {
        self.1.y()
    }
}

/// A geographic location record with an opaque payload.
///
/// # Examples
///
/// ```
/// use spatio_quadtree::{Locatable, Location, PointId};
///
/// let nyc = Location::new(PointId(1), 40.7128, -74.0060);
/// assert_eq!(nyc.x(), -74.0060);
/// assert_eq!(nyc.y(), 40.7128);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: PointId,
    pub latitude: f64,
    pub longitude: f64,
    /// Application data attached to the location (a user name, a JSON blob...)
    #[serde(default)]
    pub data: Bytes,
}

impl Location {
    /// Create a location without payload.
    pub fn new(id: impl Into<PointId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            data: Bytes::new(),
        }
    }

    /// Create a location carrying `data`.
    pub fn with_data(
        id: impl Into<PointId>,
        latitude: f64,
        longitude: f64,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            data: data.into(),
        }
    }

    /// The location as a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl Locatable for Location {
    fn id(&self) -> PointId {
        self.id
    }

    fn x(&self) -> f64 {
        self.longitude
    }

    fn y(&self) -> f64 {
        self.latitude
    }
}
