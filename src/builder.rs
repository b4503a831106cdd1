//! Finder builder
//!
//! Collects categories and measurement settings, either by hand or from a
//! [`Config`] whose category files are loaded from disk.

use crate::compute::distance::{DistanceMetric, DistanceUnit};
use crate::config::Config;
use crate::error::Result;
use crate::finder::{Category, Finder};
use crate::loader;
use nearfind_types::Location;

/// Builder for a [`Finder`].
#[derive(Debug, Default)]
pub struct FinderBuilder {
    categories: Vec<Category>,
    metric: DistanceMetric,
    unit: DistanceUnit,
}

impl FinderBuilder {
    /// Empty builder measuring haversine miles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every category file named by `config` and adopts its metric and unit.
    ///
    /// The configuration is validated first. Categories keep config order.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::new().metric(config.metric).unit(config.unit);
        for source in &config.categories {
            let locations = loader::load_locations(&source.path)?;
            log::debug!(
                "category {} has {} locations",
                source.name,
                locations.len()
            );
            builder = builder.category(source.name.clone(), locations);
        }
        Ok(builder)
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Adds a category. Answers list categories in the order they were added.
    pub fn category(mut self, name: impl Into<String>, locations: Vec<Location>) -> Self {
        self.categories.push(Category::new(name, locations));
        self
    }

    /// Build the finder. Fails if two categories share a name.
    pub fn build(self) -> Result<Finder> {
        Finder::with_measure(self.categories, self.metric, self.unit)
    }
}
