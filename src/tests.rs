use crate::errors::FisherError;
use crate::exact_test::{pvalue, FisherExactTest, PValues};
use crate::hypergeometric::Hypergeometric;
use crate::table::ContingencyTable;
use crate::utils::precision_round;
use crate::{pvalue_batch, Alternative};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufReader;

fn read_reference_tables(path: &str) -> Vec<([i64; 4], f64)> {
    let file = File::open(path).expect("Failed to open file");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));
    reader
        .records()
        .map(|record| {
            let record = record.expect("CSV record error");
            let cell = |i: usize| record[i].parse::<i64>().expect("Invalid count");
            let expected = record[4].parse::<f64>().expect("Invalid p-value");
            ([cell(0), cell(1), cell(2), cell(3)], expected)
        })
        .collect()
}

fn random_tables(seed: u64, count: usize, max_cell: i64) -> Vec<[i64; 4]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tables = Vec::with_capacity(count);
    while tables.len() < count {
        let t = [
            rng.gen_range(0..=max_cell),
            rng.gen_range(0..=max_cell),
            rng.gen_range(0..=max_cell),
            rng.gen_range(0..=max_cell),
        ];
        if t.iter().any(|v| *v > 0) {
            tables.push(t);
        }
    }
    tables
}

/// Two-tail p-value summed term by term in log space, without the recurrence.
fn brute_force_two_tail(engine: &FisherExactTest, table: &ContingencyTable) -> f64 {
    let dist = Hypergeometric::from_table(table);
    let lf = engine.cache().snapshot(dist.n);
    let (lo, hi) = dist.support();
    let observed = dist.pmf(table.a(), &lf);
    (lo..=hi)
        .map(|k| dist.pmf(k, &lf))
        .filter(|p| *p <= observed * (1.0 + 1e-7))
        .sum::<f64>()
        .min(1.0)
}

#[test]
fn test_reference_tables() {
    let engine = FisherExactTest::default();
    for (cells, expected) in read_reference_tables("resources/reference_tables.csv") {
        let p = engine.compute(cells[0], cells[1], cells[2], cells[3]).unwrap();
        assert!(
            (p.two_tail - expected).abs() < 1e-9,
            "{:?}: expected {} got {}",
            cells,
            expected,
            p.two_tail
        );
    }
}

#[test]
fn test_reference_tables_rounded() {
    let p = pvalue(5, 16, 20, 25).unwrap();
    assert_eq!(precision_round(p.two_tail, 6), 0.172586);
    let p = pvalue(10, 5, 10, 0).unwrap();
    assert_eq!(precision_round(p.two_tail, 6), 0.061265);
}

#[test]
fn test_tail_invariants() {
    let engine = FisherExactTest::default();
    for t in random_tables(0, 2000, 40) {
        let p = engine.compute(t[0], t[1], t[2], t[3]).unwrap();
        for v in [p.left_tail, p.right_tail, p.two_tail, p.point_probability] {
            assert!((0.0..=1.0).contains(&v), "{:?}: {:?}", t, p);
        }
        assert!(p.point_probability <= p.left_tail, "{:?}: {:?}", t, p);
        assert!(p.point_probability <= p.right_tail, "{:?}: {:?}", t, p);
        assert!(p.two_tail >= p.point_probability, "{:?}: {:?}", t, p);
        assert!(p.two_tail >= p.left_tail.min(p.right_tail) - 1e-12, "{:?}: {:?}", t, p);
        assert!(p.two_tail <= p.left_tail + p.right_tail + 1e-12, "{:?}: {:?}", t, p);
        assert!(p.left_tail + p.right_tail - p.point_probability <= 1.0 + 1e-9, "{:?}: {:?}", t, p);
    }
}

#[test]
fn test_two_tail_matches_brute_force() {
    let engine = FisherExactTest::default();
    for t in random_tables(7, 500, 120) {
        let table = ContingencyTable::from_cells(t).unwrap();
        let p = engine.test(&table);
        let expected = brute_force_two_tail(&engine, &table);
        assert!(
            (p.two_tail - expected).abs() < 1e-9,
            "{}: recurrence {} brute force {}",
            table,
            p.two_tail,
            expected
        );
    }
}

#[test]
fn test_symmetry() {
    let engine = FisherExactTest::default();
    let close = |x: f64, y: f64| (x - y).abs() <= 1e-9 * x.abs().max(y.abs()).max(1e-300);
    for t in random_tables(42, 1000, 60) {
        let table = ContingencyTable::from_cells(t).unwrap();
        let p = engine.test(&table);

        let transposed = engine.test(&table.transpose());
        assert!(close(p.two_tail, transposed.two_tail), "{}", table);
        assert!(close(p.left_tail, transposed.left_tail), "{}", table);
        assert!(close(p.right_tail, transposed.right_tail), "{}", table);

        let rows = engine.test(&table.swap_rows());
        assert!(close(p.two_tail, rows.two_tail), "{}", table);
        assert!(close(p.left_tail, rows.right_tail), "{}", table);
        assert!(close(p.right_tail, rows.left_tail), "{}", table);

        let cols = engine.test(&table.swap_columns());
        assert!(close(p.two_tail, cols.two_tail), "{}", table);
        assert!(close(p.left_tail, cols.right_tail), "{}", table);
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let engine = FisherExactTest::default();
    for t in random_tables(3, 200, 500) {
        let first = engine.compute(t[0], t[1], t[2], t[3]).unwrap();
        // Grow the cache in between; published values must not move.
        let _ = engine.cache().snapshot(20_000);
        let second = engine.compute(t[0], t[1], t[2], t[3]).unwrap();
        assert_eq!(first.two_tail.to_bits(), second.two_tail.to_bits());
        assert_eq!(first.left_tail.to_bits(), second.left_tail.to_bits());
        assert_eq!(first.right_tail.to_bits(), second.right_tail.to_bits());
    }
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let tables = random_tables(11, 1000, 200);
    let parallel = pvalue_batch(&tables);
    let engine = FisherExactTest::default();
    for (t, r) in tables.iter().zip(parallel) {
        let sequential: PValues = engine.compute(t[0], t[1], t[2], t[3]).unwrap();
        let r = r.unwrap();
        assert!((r.two_tail - sequential.two_tail).abs() <= 1e-12, "{:?}", t);
    }
}

#[test]
fn test_negative_input_has_no_partial_result() {
    for cells in [[-1, 2, 3, 4], [1, -2, 3, 4], [1, 2, -3, 4], [1, 2, 3, -4], [i64::MIN, 0, 0, 1]] {
        match pvalue(cells[0], cells[1], cells[2], cells[3]) {
            Err(FisherError::InvalidInput(msg)) => assert!(msg.contains("negative")),
            other => panic!("{:?} returned {:?}", cells, other),
        }
    }
}

#[test]
fn test_thousands_scale() {
    let p = pvalue(1982, 3018, 2043, 2957).unwrap();
    assert!(p.two_tail.is_finite());
    assert!(p.two_tail > 0.0 && p.two_tail <= 1.0);
    assert!(p.point_probability > 0.0);
    let p = pvalue(15_000, 10_000, 8_000, 17_000).unwrap();
    assert!(p.pvalue(Alternative::Greater) < 1e-9);
    assert!(p.pvalue(Alternative::TwoSided) < 1e-9);
}
