//! Region quadtree for fast rectangular range queries over geographic points.
//!
//! ```rust
//! use spatio_quadtree::{Location, PointIndex, Rectangle};
//!
//! let mut index = PointIndex::memory()?;
//! index.insert(Location::new(1u64, 0.0, 0.0))?;
//! index.insert(Location::new(2u64, 1.0, 1.0))?;
//! index.insert(Location::new(3u64, 2.0, 2.0))?;
//!
//! let hits = index.query(&Rectangle::new(-1.0, -1.0, 10.0, 10.0)?)?;
//! assert_eq!(hits.len(), 3);
//! # Ok::<(), spatio_quadtree::QuadTreeError>(())
//! ```
//!
//! The [`QuadTree`] itself only stores point ids; records live in a
//! [`PointStore`]. [`PointIndex`] pairs the two for the common in-memory case.

pub mod config;
pub mod error;
pub mod index;
pub mod point;
pub mod quadtree;
pub mod rectangle;
pub mod store;
pub mod validation;

#[cfg(feature = "sync")]
pub mod sync;

pub use config::Config;
pub use error::{QuadTreeError, Result};
pub use index::{PointIndex, QueryReport};
pub use point::{Locatable, Location, PointId};
pub use quadtree::{DEFAULT_CAPACITY, InsertOutcome, QuadTree, Quadrant, SyncReport, TreeStats};
pub use rectangle::Rectangle;
pub use store::{MemoryStore, PointStore};

#[cfg(feature = "sync")]
pub use sync::SyncPointIndex;

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, QuadTreeError, Result};

    pub use crate::{Locatable, Location, PointId};

    pub use crate::{InsertOutcome, QuadTree, Quadrant, Rectangle};

    pub use crate::{MemoryStore, PointIndex, PointStore};

    #[cfg(feature = "sync")]
    pub use crate::SyncPointIndex;
}
