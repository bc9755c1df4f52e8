//! In-memory point index: a [`MemoryStore`] paired with the [`QuadTree`]
//! that indexes it.
//!
//! ```rust
//! use spatio_quadtree::{Location, PointIndex};
//!
//! let mut index = PointIndex::memory()?;
//! index.insert(Location::with_data(1u64, 40.7128, -74.0060, "nyc"))?;
//! index.insert(Location::with_data(2u64, 40.6782, -73.9442, "brooklyn"))?;
//! index.insert(Location::with_data(3u64, 51.5074, -0.1278, "london"))?;
//!
//! // 40x40 degree window around the caller
//! let nearby = index.nearby(40.0, -74.0)?;
//! assert_eq!(nearby.len(), 2);
//! # Ok::<(), spatio_quadtree::QuadTreeError>(())
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::point::{Location, PointId};
use crate::quadtree::{InsertOutcome, QuadTree, SyncReport, TreeStats};
use crate::rectangle::Rectangle;
use crate::store::{MemoryStore, PointStore};
use crate::validation::validate_geographic_point;
use std::time::{Duration, Instant};

/// Results of a range query together with timing metadata.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub results: Vec<Location>,
    pub elapsed: Duration,
    /// Number of points in the store when the query ran
    pub total_points: usize,
    /// Whether the quadtree was used, or the store was scanned linearly
    pub used_index: bool,
}

/// A point store and its quadtree, kept consistent with each other.
#[derive(Debug, Clone)]
pub struct PointIndex {
    config: Config,
    store: MemoryStore,
    tree: QuadTree,
}

impl PointIndex {
    /// Empty index with the default configuration.
    pub fn memory() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let tree = QuadTree::from_config(&config)?;
        Ok(Self {
            config,
            store: MemoryStore::new(),
            tree,
        })
    }

    /// Index the records of an existing store.
    pub fn from_store(config: Config, store: MemoryStore) -> Result<(Self, SyncReport)> {
        let mut index = Self::with_config(config)?;
        index.store = store;
        let report = index.tree.extend_from_store(&index.store);
        Ok((index, report))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Store and index a location.
    ///
    /// Returns `Ok(false)` when the tree rejects the point (outside the
    /// domain, or an id the tree already holds); the store is left
    /// unchanged in that case. Invalid coordinates are an error when
    /// coordinate validation is enabled.
    pub fn insert(&mut self, location: Location) -> Result<bool> {
        if self.config.validate_coordinates {
            validate_geographic_point(&location)?;
        }

        if self.store.contains(location.id) {
            log::debug!("point {} already exists in the index", location.id);
            return Ok(false);
        }

        match self.tree.insert_with_outcome(&location) {
            InsertOutcome::Inserted => {
                self.store.insert(location)?;
                Ok(true)
            }
            outcome => {
                log::debug!("point {} rejected by quadtree: {:?}", location.id, outcome);
                Ok(false)
            }
        }
    }

    pub fn get(&self, id: PointId) -> Option<&Location> {
        self.store.get(id)
    }

    /// All indexed points inside `range`, via the quadtree.
    pub fn query(&self, range: &Rectangle) -> Result<Vec<Location>> {
        self.tree.query(&self.store, range)
    }

    /// All points inside `range` by scanning every record.
    pub fn scan(&self, range: &Rectangle) -> Result<Vec<Location>> {
        self.store.scan_within(range)
    }

    /// Points in the configured window around `(latitude, longitude)`.
    pub fn nearby(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>> {
        self.tree.query_nearby(
            &self.store,
            longitude,
            latitude,
            self.config.nearby_half_extent,
        )
    }

    /// [`PointIndex::nearby`] with timing metadata. With `use_index` false
    /// the store is scanned linearly instead.
    pub fn nearby_with_stats(
        &self,
        latitude: f64,
        longitude: f64,
        use_index: bool,
    ) -> Result<QueryReport> {
        let range = Rectangle::around(longitude, latitude, self.config.nearby_half_extent)?;

        let start = Instant::now();
        let results = if use_index {
            self.query(&range)?
        } else {
            self.scan(&range)?
        };
        let elapsed = start.elapsed();

        log::debug!(
            "nearby query found {} of {} points in {:?} (index: {})",
            results.len(),
            self.store.len(),
            elapsed,
            use_index
        );

        Ok(QueryReport {
            results,
            elapsed,
            total_points: self.store.len(),
            used_index: use_index,
        })
    }

    /// Rebuild the tree from scratch out of the current store contents.
    pub fn resync(&mut self) -> Result<SyncReport> {
        self.tree = QuadTree::from_config(&self.config)?;
        Ok(self.tree.extend_from_store(&self.store))
    }

    /// Drop every point and start over with an empty root.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear();
        self.tree = QuadTree::from_config(&self.config)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// Node boundaries in pre-order, for drawing the partition.
    pub fn boundaries(&self) -> Vec<Rectangle> {
        self.tree.boundaries()
    }
}
