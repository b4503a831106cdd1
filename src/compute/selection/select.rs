use super::partition::partition;
use crate::compute::pivot::PivotSource;
use crate::compute::record::DistanceRecord;
use std::cmp::Ordering;

/// Randomized quickselect over `records[lo..=hi]`.
///
/// Rearranges the range so that `records[lo + i]` holds the `(i + 1)`-th
/// smallest distance of the original range, every record in front of it is
/// `<=` it and every record after it (up to `hi`) is `>=` it. Records in front
/// are not ordered among themselves. Returns the record at `lo + i`.
///
/// Expected linear time thanks to the random pivot. The worst case is
/// quadratic; no median-of-medians fallback is used.
///
/// # Panics
///
/// Panics if `lo > hi`, if `hi` is out of bounds, or if `i > hi - lo`.
pub fn select<'r, 'a, L, P>(
    records: &'r mut [DistanceRecord<'a, L>],
    lo: usize,
    hi: usize,
    i: usize,
    pivots: &mut P,
) -> &'r DistanceRecord<'a, L>
where
    P: PivotSource + ?Sized,
{
    assert!(lo <= hi, "selection range is empty: lo={lo} hi={hi}");
    assert!(
        hi < records.len(),
        "selection range out of bounds: hi={hi} len={}",
        records.len()
    );
    assert!(
        i <= hi - lo,
        "order statistic {i} outside range of {} records",
        hi - lo + 1
    );

    let (mut lo, mut hi, mut i) = (lo, hi, i);
    loop {
        if lo == hi {
            return &records[lo];
        }

        let p = partition(records, lo, hi, pivots);
        let k = p - lo;
        match i.cmp(&k) {
            Ordering::Equal => return &records[p],
            // i < k implies p > lo
            Ordering::Less => hi = p - 1,
            // i > k implies p < hi
            Ordering::Greater => {
                i -= k + 1;
                lo = p + 1;
            }
        }
    }
}
