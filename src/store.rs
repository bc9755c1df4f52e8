//! Point store abstraction.
//!
//! The quadtree only holds point identities. Whoever owns the point records
//! implements [`PointStore`] so that queries can turn ids back into
//! locations.

use crate::error::{QuadTreeError, Result};
use crate::point::{Location, PointId};
use crate::rectangle::Rectangle;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Trait for point record owners.
///
/// `resolve` must succeed for every id the tree has accepted, and a record's
/// coordinates must not change after it has been inserted into a tree.
pub trait PointStore {
    /// Look up a point record by id
    fn resolve(&self, id: PointId) -> Result<Option<Location>>;

    /// Total number of records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterator over all records
    fn iter(&self) -> Box<dyn Iterator<Item = Location> + '_>;

    /// Brute-force range query over every record, without any index.
    fn scan_within(&self, range: &Rectangle) -> Result<Vec<Location>> {
        Ok(self.iter().filter(|loc| range.contains(loc)).collect())
    }
}

impl PointStore for BTreeMap<PointId, Location> {
    fn resolve(&self, id: PointId) -> Result<Option<Location>> {
        Ok(self.get(&id).cloned())
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Location> + '_> {
        Box::new(self.values().cloned())
    }
}

impl PointStore for FxHashMap<PointId, Location> {
    fn resolve(&self, id: PointId) -> Result<Option<Location>> {
        Ok(self.get(&id).cloned())
    }

    fn len(&self) -> usize {
        std::collections::HashMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Location> + '_> {
        Box::new(self.values().cloned())
    }
}

/// In-memory point store ordered by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: BTreeMap<PointId, Location>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. Ids are unique; a second record with the same id is
    /// refused and the store is left unchanged.
    pub fn insert(&mut self, location: Location) -> Result<()> {
        if self.data.contains_key(&location.id) {
            return Err(QuadTreeError::DuplicatePoint(location.id));
        }
        self.data.insert(location.id, location);
        Ok(())
    }

    pub fn get(&self, id: PointId) -> Option<&Location> {
        self.data.get(&id)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.data.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl PointStore for MemoryStore {
    fn resolve(&self, id: PointId) -> Result<Option<Location>> {
        Ok(self.data.get(&id).cloned())
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Location> + '_> {
        Box::new(self.data.values().cloned())
    }
}

impl FromIterator<Location> for MemoryStore {
    /// Later records with an already-seen id replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|loc| (loc.id, loc)).collect(),
        }
    }
}
