//! Randomized top-k selection over distance records.
//!
//! Three in-place primitives share one Lomuto [`partition`]:
//!
//! ```text
//! candidates (unordered)
//!   └─ select(A, 0, n-1, k-1)   k smallest at the front, unordered
//!        └─ sort(A, 0, k-1)     front k ascending
//!             └─ A[..k]         ordered top-k
//! ```
//!
//! Selection is expected `O(n)` and the prefix sort expected `O(k log k)`,
//! versus `O(n log n)` for sorting every candidate. Ranges are inclusive
//! `lo..=hi` index pairs into the working slice. Precondition violations
//! panic; they are programmer errors, never corrected silently.

mod partition;
mod select;
mod sort;

pub use partition::partition;
pub use select::select;
pub use sort::sort;

use crate::compute::pivot::PivotSource;
use crate::compute::record::DistanceRecord;

/// Places the `i`-th order statistic (0-based) of the whole slice at index `i`.
///
/// # Panics
///
/// Panics if `records` is empty or `i >= records.len()`.
pub fn select_nth<'r, 'a, L, P>(
    records: &'r mut [DistanceRecord<'a, L>],
    i: usize,
    pivots: &mut P,
) -> &'r DistanceRecord<'a, L>
where
    P: PivotSource + ?Sized,
{
    assert!(!records.is_empty(), "cannot select from an empty sequence");
    let hi = records.len() - 1;
    select(records, 0, hi, i, pivots)
}

/// Sorts the whole slice by ascending distance.
pub fn sort_by_distance<L, P>(records: &mut [DistanceRecord<'_, L>], pivots: &mut P)
where
    P: PivotSource + ?Sized,
{
    if records.len() > 1 {
        let hi = records.len() - 1;
        sort(records, 0, hi, pivots);
    }
}

/// Moves the `count` nearest records to the front in ascending order and
/// returns them.
///
/// Returns `None` without touching the slice when `count` is zero or there
/// are fewer than `count` candidates.
///
/// # Examples
///
/// ```
/// use nearfind::compute::pivot::RandomPivot;
/// use nearfind::compute::record::DistanceRecord;
/// use nearfind::compute::selection::top_k;
///
/// let names = ["a", "b", "c", "d", "e"];
/// let mut records: Vec<_> = names
///     .iter()
///     .zip([5.0, 1.0, 9.0, 3.0, 7.0])
///     .map(|(name, d)| DistanceRecord::new(name, d))
///     .collect();
///
/// let nearest = top_k(&mut records, 3, &mut RandomPivot::seeded(42)).unwrap();
/// let order: Vec<&str> = nearest.iter().map(|r| *r.location).collect();
/// assert_eq!(order, ["b", "d", "a"]);
///
/// assert!(top_k(&mut records, 6, &mut RandomPivot::seeded(42)).is_none());
/// ```
pub fn top_k<'r, 'a, L, P>(
    records: &'r mut [DistanceRecord<'a, L>],
    count: usize,
    pivots: &mut P,
) -> Option<&'r [DistanceRecord<'a, L>]>
where
    P: PivotSource + ?Sized,
{
    if count == 0 || records.len() < count {
        return None;
    }

    let last = count - 1;
    let hi = records.len() - 1;
    select(records, 0, hi, last, pivots);
    sort(records, 0, last, pivots);
    Some(&records[..count])
}
