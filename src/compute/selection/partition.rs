use crate::compute::pivot::PivotSource;
use crate::compute::record::DistanceRecord;

/// Lomuto partition of `records[lo..=hi]` around a pivot chosen by `pivots`.
///
/// The chosen pivot is swapped to `hi`, then a single scan moves every record
/// whose distance is `<=` the pivot's in front of a boundary. The pivot is
/// finally swapped just past that boundary and its index returned.
///
/// On return with index `p`, every record in `lo..p` has a distance `<=`
/// `records[p].distance`, and every record in `p+1..=hi` has a distance `>=`
/// it. Equal distances may land on either side. Only swaps are performed and
/// exactly one index is drawn from `pivots`.
///
/// # Panics
///
/// Panics if `lo > hi`, if `hi` is out of bounds, or if `pivots` returns an
/// index outside `lo..=hi`.
pub fn partition<L, P>(
    records: &mut [DistanceRecord<'_, L>],
    lo: usize,
    hi: usize,
    pivots: &mut P,
) -> usize
where
    P: PivotSource + ?Sized,
{
    assert!(lo <= hi, "partition range is empty: lo={lo} hi={hi}");
    assert!(
        hi < records.len(),
        "partition range out of bounds: hi={hi} len={}",
        records.len()
    );

    let chosen = pivots.pick(lo, hi);
    assert!(
        (lo..=hi).contains(&chosen),
        "pivot source returned {chosen} outside {lo}..={hi}"
    );
    records.swap(chosen, hi);
    let pivot = records[hi].distance;

    // `store` is the first slot after the `<= pivot` run
    let mut store = lo;
    for j in lo..hi {
        if records[j].distance <= pivot {
            records.swap(store, j);
            store += 1;
        }
    }
    records.swap(store, hi);
    store
}
