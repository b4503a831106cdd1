//! Nearest-facility queries over categorized location registries.
//!
//! For each query point and category, the `k` closest locations are found with
//! a randomized quickselect and only that prefix is sorted, so a query costs
//! `O(n + k log k)` expected time instead of a full sort.
//!
//! ```rust
//! use nearfind::compute::pivot::RandomPivot;
//! use nearfind::{Address, FinderBuilder, Location, Point, QueryPoint};
//!
//! let stores: Vec<Location> = (1..=5)
//!     .map(|id| {
//!         Location::new(
//!             id,
//!             Address::new(format!("{id} Main St"), "Austin", "TX", "78701"),
//!             Point::new(-97.0, 30.0 + id as f64 * 0.01),
//!         )
//!     })
//!     .collect();
//!
//! let finder = FinderBuilder::new().category("COFFEE", stores).build()?;
//! let query = QueryPoint::new(Point::new(-97.0, 30.0), 2);
//! let outcome = finder.nearest(&query, "COFFEE", &mut RandomPivot::seeded(1))?;
//!
//! let ids: Vec<u64> = outcome.neighbors().iter().map(|n| n.location.id()).collect();
//! assert_eq!(ids, [1, 2]);
//! # Ok::<(), nearfind::NearfindError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod finder;
pub mod loader;
pub mod report;

pub use builder::FinderBuilder;
pub use config::{CategorySource, Config};
pub use error::{NearfindError, Result};
pub use finder::{Category, CategoryAnswer, Finder, Neighbor, Outcome, QueryAnswer};
pub use report::{OutputFormat, Report};

pub use compute::{
    DistanceMetric, DistanceRecord, DistanceUnit, FixedPivot, PivotSource, RandomPivot,
    distance_between, partition, select, select_nth, sort, sort_by_distance, top_k,
};

pub use geo::Point;
pub use nearfind_types::{Address, Location, QueryPoint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Finder, FinderBuilder, NearfindError, Result};

    pub use geo::Point;

    pub use crate::{Address, Location, QueryPoint};

    pub use crate::{DistanceMetric, DistanceUnit, distance_between};

    pub use crate::{FixedPivot, PivotSource, RandomPivot, top_k};

    pub use crate::{Config, OutputFormat, Report};
}
