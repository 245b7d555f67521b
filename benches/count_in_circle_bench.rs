//! Benchmark for count_in_circle performance
//!
//! Builds a tree of 1M random points in a 100000x100000 square and runs
//! queries with radii covering roughly 10%, 1% and 0.01% of the space,
//! comparing against a linear scan for the smallest batch.

use avlbox::AugmentedTree;
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;

const EXTENT: i32 = 100_000;
const NUM_POINTS: usize = 1_000_000;

fn random_queries<R: Rng>(rng: &mut R, n: usize, radius: i32) -> Vec<(i32, i32, i32)> {
    (0..n)
        .map(|_| (rng.random_range(0..EXTENT), rng.random_range(0..EXTENT), radius))
        .collect()
}

fn bench_queries(tree: &AugmentedTree, queries: &[(i32, i32, i32)], label: &str) -> usize {
    let start = Instant::now();
    let mut total = 0;
    for &(cx, cy, r) in queries {
        total += tree.count_in_circle(cx, cy, r);
    }
    let elapsed = start.elapsed();
    println!(
        "{} counts {}: {}ms ({} hits)",
        queries.len(),
        label,
        elapsed.as_millis(),
        total
    );
    total
}

fn main() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);

    let mut tree = AugmentedTree::with_capacity(NUM_POINTS);
    for _ in 0..NUM_POINTS {
        tree.insert(rng.random_range(0..EXTENT), rng.random_range(0..EXTENT));
    }
    println!("built tree of {} points, height {}", tree.len(), tree.height());

    // Radius r covers pi*r^2 / EXTENT^2 of the square
    let q10 = random_queries(&mut rng, 1000, 17_841);
    let q1 = random_queries(&mut rng, 1000, 5_642);
    let q001 = random_queries(&mut rng, 1000, 564);

    bench_queries(&tree, &q10, "10%");
    bench_queries(&tree, &q1, "1%");
    let pruned = bench_queries(&tree, &q001, "0.01%");

    let start = Instant::now();
    let scanned: usize = q001
        .iter()
        .map(|&(cx, cy, r)| tree.brute_force_count(cx, cy, r))
        .sum();
    println!("{} linear scans 0.01%: {}ms", q001.len(), start.elapsed().as_millis());
    assert_eq!(pruned, scanned, "pruned and linear counts must agree");
}
