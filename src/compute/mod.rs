//! Compute layer for nearest-location queries.
//!
//! - [`distance`]: great-circle distance between query points and locations
//! - [`record`]: the `(location, distance)` pair the core reorders
//! - [`pivot`]: pluggable pivot index providers
//! - [`selection`]: randomized partition, quickselect and prefix quicksort
//!
//! Nothing here performs I/O; loaders and reports live at the crate root.

pub mod distance;
pub mod pivot;
pub mod record;
pub mod selection;

pub use distance::{DistanceMetric, DistanceUnit, distance_between};
pub use pivot::{FixedPivot, PivotSource, RandomPivot};
pub use record::DistanceRecord;
pub use selection::{partition, select, select_nth, sort, sort_by_distance, top_k};
