//! The unit the selection core reorders.

use nearfind_types::Location;

/// A location reference paired with its distance from the current query.
///
/// Records are created once per (query, location) pair and are only ever
/// swapped around inside a working sequence; the pair itself never changes.
/// `L` defaults to [`Location`], but any referenced payload works.
#[derive(Debug)]
pub struct DistanceRecord<'a, L = Location> {
    pub location: &'a L,
    pub distance: f64,
}

impl<'a, L> DistanceRecord<'a, L> {
    pub fn new(location: &'a L, distance: f64) -> Self {
        Self { location, distance }
    }
}

// Manual impls: derived ones would demand `L: Clone`, but only the reference is copied.
impl<L> Clone for DistanceRecord<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for DistanceRecord<'_, L> {}

impl<L> PartialEq for DistanceRecord<'_, L> {
    /// Two records are equal when they point at the same location with the same distance.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.location, other.location) && self.distance == other.distance
    }
}
