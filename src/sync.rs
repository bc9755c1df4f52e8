//! Thread-safe wrapper for concurrent index access.
//!
//! `SyncPointIndex` wraps [`PointIndex`] in `Arc<RwLock<_>>`. Every mutation
//! takes the write lock for its whole duration, so inserts are serialized
//! against each other and against queries; queries share the read lock.
//!
//! # Examples
//!
//! ```rust
//! use spatio_quadtree::{Location, SyncPointIndex};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = SyncPointIndex::memory()?;
//!
//! let writer = index.clone();
//! let handle = thread::spawn(move || {
//!     writer.insert(Location::new(1u64, 10.0, 10.0)).unwrap();
//! });
//!
//! index.insert(Location::new(2u64, -10.0, -10.0))?;
//! handle.join().unwrap();
//!
//! assert_eq!(index.nearby(0.0, 0.0)?.len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::index::{PointIndex, QueryReport};
use crate::point::{Location, PointId};
use crate::quadtree::{SyncReport, TreeStats};
use crate::rectangle::Rectangle;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe, cloneable handle to a shared [`PointIndex`].
#[derive(Clone)]
pub struct SyncPointIndex {
    inner: Arc<RwLock<PointIndex>>,
}

impl SyncPointIndex {
    /// Creates an empty index with default configuration.
    pub fn memory() -> Result<Self> {
        Ok(Self::from_index(PointIndex::memory()?))
    }

    /// Creates an empty index with custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::from_index(PointIndex::with_config(config)?))
    }

    pub fn from_index(index: PointIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    // ===== Writes =====

    pub fn insert(&self, location: Location) -> Result<bool> {
        self.inner.write().insert(location)
    }

    pub fn resync(&self) -> Result<SyncReport> {
        self.inner.write().resync()
    }

    pub fn clear(&self) -> Result<()> {
        self.inner.write().clear()
    }

    // ===== Reads =====

    pub fn get(&self, id: PointId) -> Option<Location> {
        self.inner.read().get(id).cloned()
    }

    pub fn query(&self, range: &Rectangle) -> Result<Vec<Location>> {
        self.inner.read().query(range)
    }

    pub fn scan(&self, range: &Rectangle) -> Result<Vec<Location>> {
        self.inner.read().scan(range)
    }

    pub fn nearby(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>> {
        self.inner.read().nearby(latitude, longitude)
    }

    pub fn nearby_with_stats(
        &self,
        latitude: f64,
        longitude: f64,
        use_index: bool,
    ) -> Result<QueryReport> {
        self.inner
            .read()
            .nearby_with_stats(latitude, longitude, use_index)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> TreeStats {
        self.inner.read().stats()
    }

    /// Run `f` with shared access to the underlying index.
    pub fn read<R>(&self, f: impl FnOnce(&PointIndex) -> R) -> R {
        f(&self.inner.read())
    }
}
