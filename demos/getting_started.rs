use spatio_quadtree::{Config, Location, PointIndex, Rectangle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see insert/subdivide logs)
    env_logger::init();

    println!("=== Spatio Quadtree - Getting Started ===\n");

    // Small capacity so the partition is visible with a handful of points
    let config = Config::default().with_capacity(2);
    let mut index = PointIndex::with_config(config)?;
    println!("✓ Created index over {:?}\n", index.config().domain);

    // === INSERTION ===
    println!("1. Inserting locations");
    println!("----------------------");

    let cities = [
        (1u64, 40.7128, -74.0060, "New York"),
        (2, 40.6782, -73.9442, "Brooklyn"),
        (3, 51.5074, -0.1278, "London"),
        (4, 48.8566, 2.3522, "Paris"),
        (5, 35.6762, 139.6503, "Tokyo"),
        (6, -33.8688, 151.2093, "Sydney"),
    ];
    for (id, lat, lon, name) in cities {
        let inserted = index.insert(Location::with_data(id, lat, lon, name))?;
        println!("   {} -> {}", name, if inserted { "indexed" } else { "rejected" });
    }

    // Outside the half-open domain: accepted by validation, rejected by the tree
    let edge = index.insert(Location::with_data(7u64, 0.0, 180.0, "Antimeridian"))?;
    println!("   Antimeridian (lon 180) -> {}\n", if edge { "indexed" } else { "rejected" });

    // === RANGE QUERIES ===
    println!("2. Range queries");
    println!("----------------");

    let europe = Rectangle::new(-10.0, 35.0, 40.0, 30.0)?;
    for loc in index.query(&europe)? {
        println!("   in Europe: {}", String::from_utf8_lossy(&loc.data));
    }

    let report = index.nearby_with_stats(40.0, -74.0, true)?;
    println!(
        "   near (40, -74): {} of {} points in {:?}",
        report.results.len(),
        report.total_points,
        report.elapsed
    );
    let baseline = index.nearby_with_stats(40.0, -74.0, false)?;
    println!(
        "   linear scan:    {} of {} points in {:?}\n",
        baseline.results.len(),
        baseline.total_points,
        baseline.elapsed
    );

    // === TREE SHAPE ===
    println!("3. Tree shape");
    println!("-------------");

    let stats = index.stats();
    println!(
        "   nodes: {}, leaves: {}, depth: {}, points: {}",
        stats.node_count, stats.leaf_count, stats.max_depth, stats.point_count
    );
    for boundary in index.boundaries() {
        println!(
            "   [{:>8.3}, {:>8.3}) x [{:>8.3}, {:>8.3})",
            boundary.x(),
            boundary.max_x(),
            boundary.y(),
            boundary.max_y()
        );
    }

    Ok(())
}
