//! Region quadtree over point identities.
//!
//! Each node covers a [`Rectangle`] and directly holds up to `capacity`
//! point ids. The first insert that overflows a node splits it into four
//! owned children (NW, NE, SW, SE); ids already held by the node stay where
//! they are. Nodes never merge back.
//!
//! ```rust
//! use spatio_quadtree::{Location, MemoryStore, QuadTree, Rectangle};
//!
//! let mut store = MemoryStore::new();
//! let mut tree = QuadTree::new(Rectangle::WORLD, 2)?;
//!
//! for (id, lat, lon) in [(1u64, 0.0, 0.0), (2, 1.0, 1.0), (3, 2.0, 2.0)] {
//!     let loc = Location::new(id, lat, lon);
//!     assert!(tree.insert(&loc));
//!     store.insert(loc)?;
//! }
//!
//! let hits = tree.query(&store, &Rectangle::new(-1.0, -1.0, 10.0, 10.0)?)?;
//! assert_eq!(hits.len(), 3);
//! # Ok::<(), spatio_quadtree::QuadTreeError>(())
//! ```

use crate::config::Config;
use crate::error::{QuadTreeError, Result};
use crate::point::{Locatable, Location, PointId};
use crate::rectangle::Rectangle;
use crate::store::PointStore;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::time::{Duration, Instant};

/// Node capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 4;

/// Child position inside a divided node.
///
/// The declaration order is the fixed order used for insertion attempts and
/// query traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    const fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }
}

/// Why an insert was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The id is now stored in the subtree.
    Inserted,
    /// The point lies outside the node's boundary.
    OutOfBounds,
    /// The node that would store the point already holds this id.
    Duplicate,
}

impl InsertOutcome {
    pub fn is_inserted(self) -> bool {
        self == InsertOutcome::Inserted
    }
}

/// Result of bulk-indexing a point store.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub inserted: usize,
    pub rejected: usize,
    pub elapsed: Duration,
}

/// Shape statistics of a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes including the root
    pub node_count: usize,
    /// Number of undivided nodes
    pub leaf_count: usize,
    /// Depth of the deepest node (the root is depth 0)
    pub max_depth: usize,
    /// Number of point ids stored across all nodes
    pub point_count: usize,
}

/// A quadtree node. The root is just the node whose boundary spans the
/// whole domain.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadTree {
    boundary: Rectangle,
    capacity: usize,
    point_ids: SmallVec<[PointId; DEFAULT_CAPACITY]>,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    /// Create an empty leaf covering `boundary`.
    ///
    /// `capacity` must be at least 1.
    pub fn new(boundary: Rectangle, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QuadTreeError::InvalidInput(
                "Quadtree capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Self::leaf(boundary, capacity))
    }

    /// Create an empty leaf with [`DEFAULT_CAPACITY`].
    pub fn with_boundary(boundary: Rectangle) -> Self {
        Self::leaf(boundary, DEFAULT_CAPACITY)
    }

    /// Create an empty root from the configured domain and capacity.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.domain, config.capacity)
    }

    fn leaf(boundary: Rectangle, capacity: usize) -> Self {
        Self {
            boundary,
            capacity,
            point_ids: SmallVec::new(),
            children: None,
        }
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ids held directly by this node, in insertion order.
    pub fn point_ids(&self) -> &[PointId] {
        &self.point_ids
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Children in NW, NE, SW, SE order, if the node has been divided.
    pub fn children(&self) -> Option<&[QuadTree; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadTree> {
        self.children
            .as_deref()
            .map(|children| &children[quadrant.index()])
    }

    /// Insert a point. Returns `false` if it lies outside this node's
    /// boundary or if the node that would store it already holds its id.
    ///
    /// A rejected insert leaves the tree unchanged.
    pub fn insert<P: Locatable + ?Sized>(&mut self, point: &P) -> bool {
        let outcome = self.insert_with_outcome(point);
        match outcome {
            InsertOutcome::Inserted => {
                log::debug!("point {} added to quadtree", point.id());
            }
            InsertOutcome::OutOfBounds => {
                log::debug!(
                    "point {} at ({}, {}) is outside the quadtree boundary",
                    point.id(),
                    point.x(),
                    point.y()
                );
            }
            InsertOutcome::Duplicate => {
                log::debug!("point {} already exists in quadtree", point.id());
            }
        }
        outcome.is_inserted()
    }

    /// Like [`QuadTree::insert`] but reports why a point was rejected.
    pub fn insert_with_outcome<P: Locatable + ?Sized>(&mut self, point: &P) -> InsertOutcome {
        if !self.boundary.contains(point) {
            return InsertOutcome::OutOfBounds;
        }

        let id = point.id();
        if self.point_ids.contains(&id) {
            return InsertOutcome::Duplicate;
        }

        if self.point_ids.len() < self.capacity {
            self.point_ids.push(id);
            return InsertOutcome::Inserted;
        }

        // Don't split for a point no quarter can take (float rounding at the
        // far edges); the tree must stay untouched on rejection.
        if self.children.is_none()
            && !self
                .boundary
                .quadrants()
                .iter()
                .any(|quarter| quarter.contains(point))
        {
            return InsertOutcome::OutOfBounds;
        }

        let (boundary, capacity) = (self.boundary, self.capacity);
        let children = self
            .children
            .get_or_insert_with(|| Self::subdivide(boundary, capacity));

        let mut outcome = InsertOutcome::OutOfBounds;
        for child in children.iter_mut() {
            match child.insert_with_outcome(point) {
                InsertOutcome::Inserted => return InsertOutcome::Inserted,
                InsertOutcome::Duplicate => outcome = InsertOutcome::Duplicate,
                InsertOutcome::OutOfBounds => {}
            }
        }
        outcome
    }

    fn subdivide(boundary: Rectangle, capacity: usize) -> Box<[QuadTree; 4]> {
        log::debug!(
            "subdividing quadtree node at ({}, {}) size {}x{}",
            boundary.x(),
            boundary.y(),
            boundary.w(),
            boundary.h()
        );
        let [nw, ne, sw, se] = boundary.quadrants();
        Box::new([
            Self::leaf(nw, capacity),
            Self::leaf(ne, capacity),
            Self::leaf(sw, capacity),
            Self::leaf(se, capacity),
        ])
    }

    /// All stored points inside `range`.
    ///
    /// Results are ordered node first (in insertion order), then the
    /// children in NW, NE, SW, SE order. Subtrees whose boundary does not
    /// intersect `range` are skipped entirely.
    pub fn query<S: PointStore + ?Sized>(
        &self,
        store: &S,
        range: &Rectangle,
    ) -> Result<Vec<Location>> {
        let mut found = Vec::new();
        self.query_into(store, range, &mut found)?;
        Ok(found)
    }

    /// Accumulator form of [`QuadTree::query`]; matches are appended to
    /// `found`.
    pub fn query_into<S: PointStore + ?Sized>(
        &self,
        store: &S,
        range: &Rectangle,
        found: &mut Vec<Location>,
    ) -> Result<()> {
        if !self.boundary.intersects(range) {
            return Ok(());
        }

        for &id in &self.point_ids {
            let Some(location) = store.resolve(id)? else {
                log::warn!("quadtree holds point {} but the store cannot resolve it", id);
                return Err(QuadTreeError::UnresolvedPoint(id));
            };
            if range.contains(&location) {
                found.push(location);
            }
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(store, range, found)?;
            }
        }

        Ok(())
    }

    /// Points inside the window of `half_extent` around `(x, y)`.
    pub fn query_nearby<S: PointStore + ?Sized>(
        &self,
        store: &S,
        x: f64,
        y: f64,
        half_extent: f64,
    ) -> Result<Vec<Location>> {
        let range = Rectangle::around(x, y, half_extent)?;
        self.query(store, &range)
    }

    /// Insert every record of `store`, one at a time.
    pub fn extend_from_store<S: PointStore + ?Sized>(&mut self, store: &S) -> SyncReport {
        let start = Instant::now();
        let mut report = SyncReport::default();

        for location in store.iter() {
            if self.insert(&location) {
                report.inserted += 1;
            } else {
                report.rejected += 1;
            }
        }

        report.elapsed = start.elapsed();
        log::info!(
            "indexed {} of {} points in {:?} ({} rejected)",
            report.inserted,
            store.len(),
            report.elapsed,
            report.rejected
        );
        report
    }

    /// Pre-order walk: node, then NW, NE, SW, SE.
    fn walk<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a QuadTree, usize)) {
        visit(self, depth);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.walk(depth + 1, &mut *visit);
            }
        }
    }

    /// Boundaries of every node in pre-order.
    pub fn boundaries(&self) -> Vec<Rectangle> {
        let mut out = Vec::new();
        self.walk(0, &mut |node, _| out.push(node.boundary));
        out
    }

    /// Number of point ids stored in the subtree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(0, &mut |node, _| count += node.point_ids.len());
        count
    }

    pub fn is_empty(&self) -> bool {
        self.point_ids.is_empty() && self.children.is_none()
    }

    /// Whether `id` is stored anywhere in the subtree.
    pub fn contains_id(&self, id: PointId) -> bool {
        let mut found = false;
        self.walk(0, &mut |node, _| found |= node.point_ids.contains(&id));
        found
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.walk(0, &mut |node, depth| {
            stats.node_count += 1;
            if node.is_leaf() {
                stats.leaf_count += 1;
            }
            stats.max_depth = stats.max_depth.max(depth);
            stats.point_count += node.point_ids.len();
        });
        stats
    }

    /// Verify the structural invariants of the subtree against `store`:
    /// leaves respect capacity, children exactly quarter their parent, every
    /// id resolves to a point inside its node, and no id appears twice.
    pub fn check_invariants<S: PointStore + ?Sized>(&self, store: &S) -> Result<()> {
        let mut seen = FxHashSet::default();
        self.check_node(store, &mut seen)
    }

    fn check_node<S: PointStore + ?Sized>(
        &self,
        store: &S,
        seen: &mut FxHashSet<PointId>,
    ) -> Result<()> {
        if self.is_leaf() && self.point_ids.len() > self.capacity {
            return Err(QuadTreeError::InvalidInput(format!(
                "leaf holds {} ids, capacity is {}",
                self.point_ids.len(),
                self.capacity
            )));
        }

        for &id in &self.point_ids {
            if !seen.insert(id) {
                return Err(QuadTreeError::InvalidInput(format!(
                    "point {} is stored more than once",
                    id
                )));
            }
            let location = store
                .resolve(id)?
                .ok_or(QuadTreeError::UnresolvedPoint(id))?;
            if !self.boundary.contains(&location) {
                return Err(QuadTreeError::InvalidInput(format!(
                    "point {} lies outside its node boundary {:?}",
                    id, self.boundary
                )));
            }
        }

        if let Some(children) = &self.children {
            let expected = self.boundary.quadrants();
            for (child, quarter) in children.iter().zip(expected.iter()) {
                if child.boundary != *quarter || child.capacity != self.capacity {
                    return Err(QuadTreeError::InvalidInput(format!(
                        "child {:?} does not quarter parent {:?}",
                        child.boundary, self.boundary
                    )));
                }
                child.check_node(store, seen)?;
            }
        }

        Ok(())
    }
}
