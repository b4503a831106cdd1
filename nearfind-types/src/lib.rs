//! # nearfind-types
//!
//! Core data types for the nearfind nearest-facility engine.
//!
//! - **Location types**: `Location`, `Address`
//! - **Query types**: `QueryPoint`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! `Point`, with `x` as longitude and `y` as latitude in degrees.
//!
//! ## Examples
//!
//! ```rust
//! use nearfind_types::location::{Address, Location};
//! use nearfind_types::query::QueryPoint;
//! use geo::Point;
//!
//! let store = Location::new(
//!     1012,
//!     Address::new("600 Congress Ave", "Austin", "TX", "78701"),
//!     Point::new(-97.7425, 30.2686),
//! );
//! let query = QueryPoint::new(Point::new(-97.7431, 30.2672), 3);
//! assert_eq!(query.count(), 3);
//! assert_eq!(store.latitude(), 30.2686);
//! ```

pub mod location;
pub mod query;

pub use location::{Address, Location};
pub use query::QueryPoint;
