//! Count and list points within a circle.
//!
//! Run with `cargo run --example query_circle`.

use avlbox::prelude::*;

fn main() {
    let mut tree = AugmentedTree::with_capacity(5);
    tree.insert(0, 0);   // Point 0: distance 0 from (0, 0)
    tree.insert(3, 4);   // Point 1: distance 5
    tree.insert(0, 1);   // Point 2: distance 1
    tree.insert(10, 10); // Point 3: distance ~14.1
    tree.insert(-4, -3); // Point 4: distance 5

    println!("Tree: {} points, height {}, bounds {:?}", tree.len(), tree.height(), tree.bounds());

    let count = tree.count_in_circle(0, 0, 5);
    println!("Points within radius 5 of (0, 0): {count}");
    assert_eq!(count, 4, "Points on the circle are included");

    let mut results = Vec::new();
    tree.query_circle(0, 0, 5, &mut results);
    results.sort_unstable();
    println!("Their ids: {results:?}");
    assert_eq!(results, vec![0, 1, 2, 4]);

    println!("Points exactly at (10, 10): {}", tree.count_in_circle(10, 10, 0));
}
