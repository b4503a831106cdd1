//! Great-circle distances between query points and locations.
//!
//! Distances come from the `geo` crate in meters and are converted to the
//! configured [`DistanceUnit`] before they are attached to records, so the
//! selection core only ever sees one consistent unit.

use crate::error::NearfindError;
use geo::{Distance, Geodesic, Haversine, Point, Rhumb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const METERS_PER_MILE: f64 = 1_609.344;
const METERS_PER_KILOMETER: f64 = 1_000.0;

/// Distance metrics for lon/lat coordinates.
///
/// - **Haversine**: spherical Earth of mean radius, the default
/// - **Geodesic**: ellipsoidal distance (Karney 2013), slower
/// - **Rhumb**: constant-bearing line length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

impl DistanceMetric {
    /// Distance in meters between two lon/lat points.
    pub fn meters(self, from: &Point, to: &Point) -> f64 {
        match self {
            DistanceMetric::Haversine => Haversine.distance(*from, *to),
            DistanceMetric::Geodesic => Geodesic.distance(*from, *to),
            DistanceMetric::Rhumb => Rhumb.distance(*from, *to),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceMetric::Haversine => "haversine",
            DistanceMetric::Geodesic => "geodesic",
            DistanceMetric::Rhumb => "rhumb",
        };
        f.write_str(name)
    }
}

impl FromStr for DistanceMetric {
    type Err = NearfindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "haversine" => Ok(DistanceMetric::Haversine),
            "geodesic" => Ok(DistanceMetric::Geodesic),
            "rhumb" => Ok(DistanceMetric::Rhumb),
            other => Err(NearfindError::InvalidInput(format!(
                "unknown distance metric '{}', expected haversine, geodesic or rhumb",
                other
            ))),
        }
    }
}

/// Unit every distance in a run is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Statute miles
    #[default]
    Miles,
    Kilometers,
    Meters,
}

impl DistanceUnit {
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Miles => meters / METERS_PER_MILE,
            DistanceUnit::Kilometers => meters / METERS_PER_KILOMETER,
            DistanceUnit::Meters => meters,
        }
    }

    /// Label used in text reports.
    pub fn label(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DistanceUnit {
    type Err = NearfindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Kilometers),
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meters),
            other => Err(NearfindError::InvalidInput(format!(
                "unknown distance unit '{}', expected miles, km or m",
                other
            ))),
        }
    }
}

/// Distance between two lon/lat points in `unit`, measured with `metric`.
///
/// # Examples
///
/// ```rust
/// use nearfind::compute::distance::{distance_between, DistanceMetric, DistanceUnit};
/// use geo::Point;
///
/// let austin = Point::new(-97.7431, 30.2672);
/// let dallas = Point::new(-96.7970, 32.7767);
///
/// let miles = distance_between(&austin, &dallas, DistanceMetric::Haversine, DistanceUnit::Miles);
/// assert!(miles > 180.0 && miles < 190.0);
/// ```
pub fn distance_between(
    from: &Point,
    to: &Point,
    metric: DistanceMetric,
    unit: DistanceUnit,
) -> f64 {
    unit.from_meters(metric.meters(from, to))
}
