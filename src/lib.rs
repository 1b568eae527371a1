pub mod monoids;

mod aggregate_tree;

pub use aggregate_tree::{AggregateNode, Nodes, RangeAggregateTree, TreeStatistics};

use ordered_float::OrderedFloat;
use rand::prelude::*;

fn bench<F: FnOnce()>(name: &str, num_tabs: usize, f: F) {
    use std::time::{Duration, Instant};
    let start = Instant::now();
    f();
    let elapsed = start.elapsed();

    print!("BENCH `{}` :", name);
    for _ in 0..num_tabs {
        print!("\t");
    }

    if elapsed < Duration::from_millis(1) {
        println!(
            "{} {:03} nanos",
            elapsed.as_micros(),
            elapsed.as_nanos() % 1000,
        );
    } else if elapsed < Duration::from_secs(1) {
        println!(
            "{} {:03} micros",
            elapsed.as_millis(),
            elapsed.as_micros() % 1000,
        );
    } else {
        println!(
            "{} {:03} millis",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
        );
    }
}

#[allow(dead_code)]
fn validate_range_queries_rangetree() {
    // Empty tree: every query yields the operator's neutral element and every
    // update is a no-op.
    let mut empty = RangeAggregateTree::<f64>::new(Vec::new());
    assert_eq!(empty.len(), 0);
    assert!(empty.validate());
    assert_eq!(empty.query_sum(0, 10), 0.0);
    assert_eq!(empty.query_min(0, 10), f64::INFINITY);
    assert_eq!(empty.query_max(0, 10), f64::NEG_INFINITY);
    assert_eq!(empty.statistics(), TreeStatistics::default());
    assert!(empty.root().is_none());
    empty.update_point(0, 1.0);
    empty.update_range(0, 3, 1.0);
    assert_eq!(empty.len(), 0);
    assert!(empty.validate());

    // Single element.
    let mut one = RangeAggregateTree::new(vec![42.0]);
    assert_eq!(
        one.statistics(),
        TreeStatistics {
            node_count: 1,
            leaf_count: 1,
            height: 1,
            array_size: 1,
        }
    );
    assert_eq!(one.query_sum(0, 0), 42.0);
    assert_eq!(one.query_min(0, 0), 42.0);
    assert_eq!(one.query_max(0, 0), 42.0);
    assert_eq!(one.query_sum(1, 5), 0.0);
    assert_eq!(one.query_min(1, 5), f64::INFINITY);
    one.update_point(0, 7.0);
    assert_eq!(one.query_sum(0, 0), 7.0);
    assert!(one.validate());

    // Sum round trip and the 2n - 1 node-count identity across sizes.
    for n in 0..16usize {
        let tree: RangeAggregateTree<f64> = (0..n).map(|i| i as f64).collect();
        assert!(tree.validate());
        let stats = tree.statistics();
        assert_eq!(stats.array_size, n);
        assert_eq!(stats.leaf_count, n);
        assert_eq!(stats.node_count, if n == 0 { 0 } else { 2 * n - 1 });
        let expected = (n * n.saturating_sub(1) / 2) as f64;
        assert_eq!(tree.query_sum(0, n.saturating_sub(1)), expected);
    }

    let mut tree = RangeAggregateTree::new(vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0]);
    assert_eq!(tree.query_sum(1, 3), 15.0);
    assert_eq!(tree.query_min(1, 3), 3.0);
    assert_eq!(tree.query_max(1, 3), 7.0);
    assert_eq!(tree.query_sum(0, 5), 36.0);
    assert_eq!(
        tree.statistics(),
        TreeStatistics {
            node_count: 11,
            leaf_count: 6,
            height: 4,
            array_size: 6,
        }
    );

    // Point read-back through all three aggregates.
    for i in 0..6 {
        let x = tree.values()[i];
        assert_eq!(tree.query_sum(i, i), x);
        assert_eq!(tree.query_min(i, i), x);
        assert_eq!(tree.query_max(i, i), x);
    }

    // Inverted ranges return neutral elements, not data.
    assert_eq!(tree.query_sum(3, 1), 0.0);
    assert_eq!(tree.query_min(3, 1), f64::INFINITY);
    assert_eq!(tree.query_max(3, 1), f64::NEG_INFINITY);

    // Queries past the end aggregate the intersection only.
    assert_eq!(tree.query_sum(4, 100), 20.0);
    assert_eq!(tree.query_max(4, 100), 11.0);

    tree.update_point(2, 10.0);
    assert_eq!(tree.query_sum(1, 3), 20.0);
    assert_eq!(tree.values(), &[1.0, 3.0, 10.0, 7.0, 9.0, 11.0]);
    assert_eq!(tree.query_sum(0, 5), 41.0);
    assert!(tree.validate());

    // Out-of-range point update is a no-op.
    tree.update_point(99, 1.0);
    assert_eq!(tree.query_sum(0, 5), 41.0);
    assert!(tree.validate());

    // Preorder walk starts at the root and visits every node once.
    let root = tree.nodes().next().unwrap();
    assert_eq!((root.start(), root.end()), (0, 5));
    assert!(!root.is_leaf());
    assert_eq!(tree.nodes().count(), 11);
    assert_eq!(tree.nodes().filter(|node| node.is_leaf()).count(), 6);
    let (left, right) = root.children().unwrap();
    assert_eq!((left.start(), left.end()), (0, 2));
    assert_eq!((right.start(), right.end()), (3, 5));
    assert_eq!(left.sum() + right.sum(), root.sum());

    // Range update rewrites the array and rebuilds.
    let mut tree = RangeAggregateTree::new(vec![1.0, 1.0, 1.0, 1.0]);
    tree.update_range(0, 1, 5.0);
    assert_eq!(tree.values(), &[6.0, 6.0, 1.0, 1.0]);
    assert_eq!(tree.query_sum(0, 3), 14.0);
    assert!(tree.validate());

    // Indices past the end are silently clamped.
    tree.update_range(2, 9, 1.0);
    assert_eq!(tree.values(), &[6.0, 6.0, 2.0, 2.0]);
    assert_eq!(tree.query_sum(0, 3), 16.0);
    assert!(tree.validate());

    // An inverted range touches nothing.
    tree.update_range(3, 1, 5.0);
    assert_eq!(tree.values(), &[6.0, 6.0, 2.0, 2.0]);
    assert!(tree.validate());
}

#[allow(dead_code)]
fn validate_aggregate_tree_rangetree() {
    let mut rng = SmallRng::from_entropy();

    const N: usize = 256;
    const OPS: usize = 512;

    let mut values: Vec<f64> = (0..N).map(|_| rng.gen_range(-1000.0..1000.0)).collect();
    let mut tree = RangeAggregateTree::new(values.clone());
    assert!(tree.validate());

    for _ in 0..OPS {
        match rng.gen_range(0..4) {
            0 => {
                let i = rng.gen_range(0..N);
                let x = rng.gen_range(-1000.0..1000.0);
                values[i] = x;
                tree.update_point(i, x);
            }
            1 => {
                let lo = rng.gen_range(0..N);
                // Occasionally past the end, to exercise the clamp.
                let hi = rng.gen_range(lo..N + 8);
                let dx = rng.gen_range(-50.0..50.0);
                for v in &mut values[lo..=hi.min(N - 1)] {
                    *v += dx;
                }
                tree.update_range(lo, hi, dx);
            }
            _ => {
                let lo = rng.gen_range(0..N);
                let hi = rng.gen_range(lo..N);
                let naive_sum: f64 = values[lo..=hi].iter().sum();
                let naive_min = values[lo..=hi]
                    .iter()
                    .copied()
                    .map(OrderedFloat)
                    .min()
                    .unwrap()
                    .0;
                let naive_max = values[lo..=hi]
                    .iter()
                    .copied()
                    .map(OrderedFloat)
                    .max()
                    .unwrap()
                    .0;
                assert!((tree.query_sum(lo, hi) - naive_sum).abs() < 1e-6);
                assert_eq!(tree.query_min(lo, hi), naive_min);
                assert_eq!(tree.query_max(lo, hi), naive_max);
            }
        }
        assert!(tree.validate());
    }

    assert_eq!(tree.values(), &values[..]);
    assert_eq!(tree.statistics().node_count, 2 * N - 1);
}

#[allow(dead_code)]
fn bench_range_queries_rangetree() {
    let mut rng = SmallRng::from_entropy();

    const N: usize = 1 << 16;

    let values: Vec<f64> = (0..N).map(|_| rng.gen_range(-1.0..1.0)).collect();

    let mut tree = RangeAggregateTree::new(Vec::new());
    bench("RangeAggregateTree::new", 2, || {
        tree = RangeAggregateTree::new(values.clone());
    });
    println!();

    bench("RangeAggregateTree::query_sum", 1, || {
        for hi in 0..N {
            tree.query_sum(0, hi);
        }
    });
    bench("naive sum rescan", 2, || {
        for hi in (0..N).step_by(64) {
            let _: f64 = values[..=hi].iter().sum();
        }
    });
    println!();

    bench("RangeAggregateTree::update_point", 1, || {
        for i in 0..N {
            tree.update_point(i, 0.5);
        }
    });
    bench("RangeAggregateTree::update_range", 1, || {
        for _ in 0..64 {
            tree.update_range(N / 4, 3 * N / 4, 0.125);
        }
    });
    println!();

    assert!(tree.validate());
}

#[test]
pub fn main() {
    validate_range_queries_rangetree();
    validate_aggregate_tree_rangetree();
    bench_range_queries_rangetree();
}
