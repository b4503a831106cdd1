use nearfind::compute::pivot::{FixedPivot, PivotSource, RandomPivot};
use nearfind::compute::record::DistanceRecord;
use nearfind::compute::selection::{partition, select, sort, sort_by_distance, top_k};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TRIALS: u64 = 200;

fn random_distances(rng: &mut StdRng) -> Vec<f64> {
    let n: usize = rng.random_range(1..=40);
    // Small integer range so duplicates are common
    (0..n).map(|_| f64::from(rng.random_range(-5i32..=20))).collect()
}

fn records<'a>(ids: &'a [usize], distances: &[f64]) -> Vec<DistanceRecord<'a, usize>> {
    ids.iter()
        .zip(distances)
        .map(|(id, &d)| DistanceRecord::new(id, d))
        .collect()
}

fn distances(records: &[DistanceRecord<'_, usize>]) -> Vec<f64> {
    records.iter().map(|r| r.distance).collect()
}

fn ascending(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

fn ids_of(records: &[DistanceRecord<'_, usize>]) -> Vec<usize> {
    let mut ids: Vec<usize> = records.iter().map(|r| *r.location).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn select_returns_order_statistic() {
    let mut rng = StdRng::seed_from_u64(1);
    for trial in 0..TRIALS {
        let input = random_distances(&mut rng);
        let n = input.len();
        let ids: Vec<usize> = (0..n).collect();
        let i = rng.random_range(0..n);
        let expected = ascending(input.clone());

        let mut recs = records(&ids, &input);
        let chosen = select(&mut recs, 0, n - 1, i, &mut RandomPivot::seeded(trial)).distance;

        assert_eq!(chosen, expected[i]);
        assert_eq!(recs[i].distance, expected[i]);
        assert!(recs[..i].iter().all(|r| r.distance <= expected[i]));
        assert!(recs[i + 1..].iter().all(|r| r.distance >= expected[i]));
        assert_eq!(ids_of(&recs), ids, "records lost or duplicated");
    }
}

#[test]
fn sort_orders_range_and_leaves_rest() {
    let mut rng = StdRng::seed_from_u64(2);
    for trial in 0..TRIALS {
        let input = random_distances(&mut rng);
        let n = input.len();
        let ids: Vec<usize> = (0..n).collect();
        let lo = rng.random_range(0..n);
        let hi = rng.random_range(lo..n);

        let mut recs = records(&ids, &input);
        sort(&mut recs, lo, hi, &mut RandomPivot::seeded(trial));
        let after = distances(&recs);

        assert_eq!(&after[..lo], &input[..lo]);
        assert_eq!(&after[hi + 1..], &input[hi + 1..]);
        assert_eq!(after[lo..=hi].to_vec(), ascending(input[lo..=hi].to_vec()));
    }
}

#[test]
fn sorting_twice_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(3);
    for trial in 0..TRIALS {
        let input = random_distances(&mut rng);
        let ids: Vec<usize> = (0..input.len()).collect();
        let mut recs = records(&ids, &input);
        let mut pivots = RandomPivot::seeded(trial);

        sort_by_distance(&mut recs, &mut pivots);
        let once = distances(&recs);
        sort_by_distance(&mut recs, &mut pivots);
        assert_eq!(distances(&recs), once);
    }
}

#[test]
fn partition_splits_around_pivot() {
    let mut rng = StdRng::seed_from_u64(4);
    for trial in 0..TRIALS {
        let input = random_distances(&mut rng);
        let n = input.len();
        let ids: Vec<usize> = (0..n).collect();
        let lo = rng.random_range(0..n);
        let hi = rng.random_range(lo..n);

        let mut recs = records(&ids, &input);
        let p = partition(&mut recs, lo, hi, &mut RandomPivot::seeded(trial));
        assert!((lo..=hi).contains(&p));

        let pivot = recs[p].distance;
        assert!(recs[lo..p].iter().all(|r| r.distance <= pivot));
        assert!(recs[p + 1..=hi].iter().all(|r| r.distance > pivot));
        assert_eq!(ids_of(&recs), ids);
    }
}

#[test]
fn top_k_matches_full_sort_prefix() {
    let mut rng = StdRng::seed_from_u64(5);
    for trial in 0..TRIALS {
        let input = random_distances(&mut rng);
        let n = input.len();
        let ids: Vec<usize> = (0..n).collect();
        let k = rng.random_range(1..=n);

        let mut recs = records(&ids, &input);
        let nearest = top_k(&mut recs, k, &mut RandomPivot::seeded(trial)).unwrap();
        assert_eq!(distances(nearest), ascending(input.clone())[..k].to_vec());
    }
}

#[test]
fn top_k_with_every_fixed_rule() {
    let input = [8.0, 3.0, 3.0, 10.0, 1.0, 6.0, 0.5, 3.0];
    let ids: Vec<usize> = (0..input.len()).collect();
    let expected = ascending(input.to_vec());
    for rule in [FixedPivot::First, FixedPivot::Last, FixedPivot::Middle] {
        for k in 1..=input.len() {
            let mut recs = records(&ids, &input);
            let mut pivots = rule;
            let nearest = top_k(&mut recs, k, &mut pivots).unwrap();
            assert_eq!(distances(nearest), expected[..k].to_vec(), "{rule:?} k={k}");
        }
    }
}

#[test]
fn top_three_of_five() {
    let ids = [10, 11, 12, 13, 14];
    let mut recs = records(&ids, &[5.0, 1.0, 9.0, 3.0, 7.0]);
    let nearest = top_k(&mut recs, 3, &mut RandomPivot::seeded(99)).unwrap();
    let order: Vec<usize> = nearest.iter().map(|r| *r.location).collect();
    assert_eq!(order, [11, 13, 10]);
}

#[test]
fn single_record_selection() {
    let ids = [0];
    let mut recs = records(&ids, &[4.2]);
    assert_eq!(select(&mut recs, 0, 0, 0, &mut RandomPivot::seeded(0)).distance, 4.2);
    assert!(top_k(&mut recs, 1, &mut RandomPivot::seeded(0)).is_some());
}

#[test]
fn all_equal_distances() {
    let ids: Vec<usize> = (0..6).collect();
    let mut recs = records(&ids, &[2.0; 6]);
    let nearest = top_k(&mut recs, 4, &mut RandomPivot::seeded(8)).unwrap();
    assert_eq!(distances(nearest), vec![2.0; 4]);
    assert_eq!(ids_of(&recs), ids);
}

#[test]
fn too_few_candidates_are_skipped() {
    struct Refuse;
    impl PivotSource for Refuse {
        fn pick(&mut self, _lo: usize, _hi: usize) -> usize {
            panic!("no pivot expected");
        }
    }

    let ids: Vec<usize> = (0..3).collect();
    let mut recs = records(&ids, &[3.0, 1.0, 2.0]);
    assert!(top_k(&mut recs, 4, &mut Refuse).is_none());
    assert!(top_k(&mut recs, 0, &mut Refuse).is_none());
    assert_eq!(distances(&recs), vec![3.0, 1.0, 2.0]);
}

#[test]
fn same_seed_same_arrangement() {
    let input: Vec<f64> = (0..50i32).map(|i| f64::from((i * 37) % 23)).collect();
    let ids: Vec<usize> = (0..50).collect();

    let mut first = records(&ids, &input);
    let mut second = records(&ids, &input);
    top_k(&mut first, 10, &mut RandomPivot::seeded(1234));
    top_k(&mut second, 10, &mut RandomPivot::seeded(1234));

    let a: Vec<usize> = first.iter().map(|r| *r.location).collect();
    let b: Vec<usize> = second.iter().map(|r| *r.location).collect();
    assert_eq!(a, b);
}
