use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatio_quadtree::{
    Config, Location, MemoryStore, PointId, PointIndex, PointStore, QuadTree, Quadrant, Rectangle,
};

fn random_locations(seed: u64, count: u64) -> Vec<Location> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|id| {
            let lat = rng.random_range(-90.0..90.0);
            let lon = rng.random_range(-180.0..180.0);
            Location::with_data(id, lat, lon, format!("user{}", id))
        })
        .collect()
}

fn sorted_ids(found: &[Location]) -> Vec<PointId> {
    let mut ids: Vec<_> = found.iter().map(|l| l.id).collect();
    ids.sort();
    ids
}

#[test]
fn test_three_point_scenario() {
    let mut tree = QuadTree::new(Rectangle::WORLD, 2).unwrap();
    let mut store = MemoryStore::new();

    for loc in [
        Location::new(1u64, 0.0, 0.0),
        Location::new(2u64, 1.0, 1.0),
        Location::new(3u64, 2.0, 2.0),
    ] {
        assert!(tree.insert(&loc));
        store.insert(loc).unwrap();
    }

    assert_eq!(tree.point_ids(), &[PointId(1), PointId(2)]);
    let ne = tree.child(Quadrant::NorthEast).unwrap();
    assert_eq!(*ne.boundary(), Rectangle::new(0.0, 0.0, 180.0, 90.0).unwrap());
    assert_eq!(ne.point_ids(), &[PointId(3)]);

    let found = tree
        .query(&store, &Rectangle::new(-1.0, -1.0, 10.0, 10.0).unwrap())
        .unwrap();
    assert_eq!(sorted_ids(&found), vec![PointId(1), PointId(2), PointId(3)]);

    let found = tree
        .query(&store, &Rectangle::new(-180.0, -90.0, 1.0, 1.0).unwrap())
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_query_agrees_with_linear_scan() {
    let locations = random_locations(7, 2_000);
    let store: MemoryStore = locations.iter().cloned().collect();

    for capacity in [1, 4, 16] {
        let mut tree = QuadTree::new(Rectangle::WORLD, capacity).unwrap();
        let report = tree.extend_from_store(&store);
        assert_eq!(report.inserted, 2_000);
        tree.check_invariants(&store).unwrap();

        let mut rng = StdRng::seed_from_u64(capacity as u64);
        for _ in 0..50 {
            let w = rng.random_range(0.5..90.0);
            let h = rng.random_range(0.5..45.0);
            let x = rng.random_range(-200.0..180.0);
            let y = rng.random_range(-100.0..90.0);
            let range = Rectangle::new(x, y, w, h).unwrap();

            let via_tree = tree.query(&store, &range).unwrap();
            let via_scan = store.scan_within(&range).unwrap();
            assert_eq!(sorted_ids(&via_tree), sorted_ids(&via_scan), "range {:?}", range);
        }
    }
}

#[test]
fn test_query_agrees_with_linear_scan_at_split_lines() {
    // Split lines of the first few levels over the world domain.
    let xs: Vec<f64> = (0..=16).map(|k| -180.0 + k as f64 * 22.5).collect();
    let ys: Vec<f64> = (0..=16).map(|k| -90.0 + k as f64 * 11.25).collect();

    let mut rng = StdRng::seed_from_u64(99);
    let mut locations = random_locations(21, 1_500);
    // points sitting exactly on split lines
    for (i, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        if x < 180.0 && y < 90.0 {
            let lat = rng.random_range(-90.0..90.0);
            let lon = rng.random_range(-180.0..180.0);
            let base = 10_000 + 3 * i as u64;
            locations.push(Location::new(base, y, lon));
            locations.push(Location::new(base + 1, lat, x));
            locations.push(Location::new(base + 2, y, x));
        }
    }
    let store: MemoryStore = locations.iter().cloned().collect();

    let mut tree = QuadTree::new(Rectangle::WORLD, 2).unwrap();
    assert_eq!(tree.extend_from_store(&store).inserted, store.len());

    // Right/top edge placed on, just before, or a few ulps past a split line.
    let edge_near = |line: f64, start: f64, nudge: i32| {
        let mut end = line;
        for _ in 0..nudge.abs() {
            end = if nudge > 0 { end.next_up() } else { end.next_down() };
        }
        end - start
    };

    for _ in 0..400 {
        let line_x = xs[rng.random_range(1..xs.len())];
        let line_y = ys[rng.random_range(1..ys.len())];
        let x = line_x - rng.random_range(0.01..120.0);
        let y = line_y - rng.random_range(0.01..60.0);
        let nudge_x = rng.random_range(-3..=3);
        let nudge_y = rng.random_range(-3..=3);

        let ranges = [
            // right and top edges near split lines
            Rectangle::new(x, y, edge_near(line_x, x, nudge_x), edge_near(line_y, y, nudge_y)),
            // left and bottom edges exactly on split lines
            Rectangle::new(line_x, line_y, rng.random_range(0.01..60.0), rng.random_range(0.01..30.0)),
            // left edge a few ulps before a split line
            Rectangle::new(line_x.next_down(), y, rng.random_range(1e-12..10.0), 40.0),
        ];

        for range in ranges.into_iter().flatten() {
            let via_tree = tree.query(&store, &range).unwrap();
            let via_scan = store.scan_within(&range).unwrap();
            assert_eq!(sorted_ids(&via_tree), sorted_ids(&via_scan), "range {:?}", range);
        }
    }
}

#[test]
fn test_every_point_reachable_exactly_once() {
    let locations = random_locations(42, 500);
    let store: MemoryStore = locations.iter().cloned().collect();
    let mut tree = QuadTree::new(Rectangle::WORLD, 3).unwrap();
    tree.extend_from_store(&store);

    let everything = Rectangle::new(-200.0, -100.0, 400.0, 200.0).unwrap();
    let found = tree.query(&store, &everything).unwrap();
    assert_eq!(found.len(), 500);

    let ids = sorted_ids(&found);
    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(ids, deduped);
}

#[test]
fn test_children_tile_parent() {
    let locations = random_locations(3, 300);
    let mut tree = QuadTree::new(Rectangle::WORLD, 2).unwrap();
    for loc in &locations {
        tree.insert(loc);
    }

    fn check(node: &QuadTree) {
        if let Some(children) = node.children() {
            let parent = node.boundary();
            let area: f64 = children.iter().map(|c| c.boundary().area()).sum();
            assert_eq!(area, parent.area());
            for (i, a) in children.iter().enumerate() {
                assert_eq!(a.boundary().w(), parent.w() / 2.0);
                assert_eq!(a.boundary().h(), parent.h() / 2.0);
                assert!(parent.contains_rectangle(a.boundary()));
                for b in children.iter().skip(i + 1) {
                    assert!(!a.boundary().intersects(b.boundary()));
                }
                check(a);
            }
        } else {
            assert!(node.point_ids().len() <= node.capacity());
        }
    }

    check(&tree);
}

#[test]
fn test_query_results_are_deterministic() {
    let locations = random_locations(11, 200);
    let store: MemoryStore = locations.iter().cloned().collect();

    let mut first = QuadTree::new(Rectangle::WORLD, 4).unwrap();
    let mut second = QuadTree::new(Rectangle::WORLD, 4).unwrap();
    first.extend_from_store(&store);
    second.extend_from_store(&store);

    let range = Rectangle::new(-60.0, -30.0, 120.0, 60.0).unwrap();
    let a: Vec<_> = first.query(&store, &range).unwrap().into_iter().map(|l| l.id).collect();
    let b: Vec<_> = second.query(&store, &range).unwrap().into_iter().map(|l| l.id).collect();
    assert_eq!(a, b);
}

#[test]
fn test_point_index_end_to_end() {
    let config = Config::default().with_capacity(8);
    let mut index = PointIndex::with_config(config).unwrap();

    for loc in random_locations(5, 1_000) {
        index.insert(loc).unwrap();
    }
    assert_eq!(index.len(), index.tree().len());

    let report = index.nearby_with_stats(10.0, 10.0, true).unwrap();
    let baseline = index.nearby_with_stats(10.0, 10.0, false).unwrap();
    assert_eq!(sorted_ids(&report.results), sorted_ids(&baseline.results));
    assert_eq!(report.total_points, index.len());

    for loc in &report.results {
        assert!((loc.latitude - 10.0).abs() <= 20.0);
        assert!((loc.longitude - 10.0).abs() <= 20.0);
        assert!(loc.data.starts_with(b"user"));
    }

    let stats = index.stats();
    assert_eq!(stats.point_count, index.len());
    assert_eq!(stats.node_count, index.boundaries().len());
}

#[test]
fn test_custom_store_implementation() {
    /// Store backed by a plain vector indexed by id.
    struct VecStore(Vec<Location>);

    impl PointStore for VecStore {
        fn resolve(&self, id: PointId) -> spatio_quadtree::Result<Option<Location>> {
            Ok(self.0.get(id.get() as usize).cloned())
        }

        fn len(&self) -> usize {
            self.0.len()
        }

        fn iter(&self) -> Box<dyn Iterator<Item = Location> + '_> {
            Box::new(self.0.iter().cloned())
        }
    }

    let store = VecStore(random_locations(9, 100));
    let mut tree = QuadTree::with_boundary(Rectangle::WORLD);
    assert_eq!(tree.extend_from_store(&store).inserted, 100);

    let range = Rectangle::new(0.0, 0.0, 180.0, 90.0).unwrap();
    assert_eq!(
        sorted_ids(&tree.query(&store, &range).unwrap()),
        sorted_ids(&store.scan_within(&range).unwrap())
    );
}
