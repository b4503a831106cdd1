use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Postal address of a location. Zip codes are kept as text so leading
/// zeros and ZIP+4 suffixes survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

/// An identified point of interest.
///
/// Locations are immutable once loaded. They are owned by the category
/// that loaded them and only ever referenced by distance records.
///
/// # Examples
///
/// ```
/// use nearfind_types::location::{Address, Location};
/// use geo::Point;
///
/// let store = Location::new(
///     7,
///     Address::new("1 Main St", "Dallas", "TX", "75201"),
///     Point::new(-96.7970, 32.7767),
/// );
/// assert_eq!(store.id(), 7);
/// assert_eq!(store.longitude(), -96.7970);
/// assert_eq!(store.address().to_string(), "1 Main St, Dallas, TX, 75201");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier within its category
    pub id: u64,
    pub address: Address,
    /// Longitude (x) and latitude (y) in degrees
    pub point: Point<f64>,
}

impl Location {
    pub fn new(id: u64, address: Address, point: Point<f64>) -> Self {
        Self { id, address, point }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    /// Get the latitude (y coordinate).
    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    /// Get the longitude (x coordinate).
    pub fn longitude(&self) -> f64 {
        self.point.x()
    }
}
