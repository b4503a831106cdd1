use super::partition::partition;
use crate::compute::pivot::PivotSource;
use crate::compute::record::DistanceRecord;

/// In-place randomized quicksort of `records[lo..=hi]` by ascending distance.
///
/// Meant for the prefix left behind by [`select`](super::select()): sorting only
/// those `k` records costs `O(k log k)` expected instead of sorting every
/// candidate. Not stable. A range with `lo >= hi` is a no-op.
///
/// The smaller side of each partition is handled recursively and the larger
/// side by looping, so stack depth stays logarithmic.
///
/// # Panics
///
/// Panics if `lo < hi` and `hi` is out of bounds.
pub fn sort<L, P>(records: &mut [DistanceRecord<'_, L>], lo: usize, hi: usize, pivots: &mut P)
where
    P: PivotSource + ?Sized,
{
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let p = partition(records, lo, hi, pivots);
        if p - lo < hi - p {
            if p > lo {
                sort(records, lo, p - 1, pivots);
            }
            lo = p + 1;
        } else {
            sort(records, p + 1, hi, pivots);
            if p == lo {
                break;
            }
            hi = p - 1;
        }
    }
}
