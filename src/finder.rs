//! Nearest-location query processing.
//!
//! A [`Finder`] owns one location registry per [`Category`]. For every query
//! and category it builds a fresh working sequence of distance records, runs
//! randomized selection for the requested count, sorts only that prefix and
//! reads the ordered answer off the front.
//!
//! ```text
//! Finder::run()
//!   └─ for each query, each category
//!        ├─ candidates()         one DistanceRecord per location
//!        ├─ select(0, n-1, k-1)  compute/selection
//!        ├─ sort(0, k-1)         compute/selection
//!        └─ Outcome::Found / Outcome::Insufficient
//! ```

use crate::compute::distance::{DistanceMetric, DistanceUnit};
use crate::compute::pivot::{PivotSource, RandomPivot};
use crate::compute::record::DistanceRecord;
use crate::compute::selection::top_k;
use crate::error::{NearfindError, Result};
use nearfind_types::{Location, QueryPoint};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A named registry of locations, such as one brand's store network.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    name: String,
    locations: Vec<Location>,
}

impl Category {
    pub fn new(name: impl Into<String>, locations: Vec<Location>) -> Self {
        Self {
            name: name.into(),
            locations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// One entry of an ordered answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor<'a> {
    /// 1-based position in the answer
    pub rank: usize,
    pub location: &'a Location,
    pub distance: f64,
}

/// Result of one query against one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<'a> {
    /// The requested number of nearest locations, nearest first.
    Found { neighbors: Vec<Neighbor<'a>> },
    /// The category has fewer locations than requested; nothing was selected.
    Insufficient { requested: usize, available: usize },
}

impl<'a> Outcome<'a> {
    pub fn neighbors(&self) -> &[Neighbor<'a>] {
        match self {
            Outcome::Found { neighbors } => neighbors,
            Outcome::Insufficient { .. } => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAnswer<'a> {
    pub category: &'a str,
    #[serde(flatten)]
    pub outcome: Outcome<'a>,
}

/// Every category's answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnswer<'a> {
    /// Position of the query in its input batch
    pub index: usize,
    pub query: &'a QueryPoint,
    /// Unit every distance in `categories` is expressed in
    pub unit: DistanceUnit,
    pub categories: Vec<CategoryAnswer<'a>>,
}

impl<'a> QueryAnswer<'a> {
    /// Outcome for a category by name.
    pub fn outcome(&self, category: &str) -> Option<&Outcome<'a>> {
        self.categories
            .iter()
            .find(|answer| answer.category == category)
            .map(|answer| &answer.outcome)
    }
}

/// Answers nearest-location queries over a fixed set of categories.
///
/// The finder is read-only once built; all mutation happens on per-query
/// working sequences, so it can be shared across threads.
///
/// # Examples
///
/// ```
/// use geo::Point;
/// use nearfind::compute::pivot::RandomPivot;
/// use nearfind::finder::{Category, Finder};
/// use nearfind::{Address, Location, QueryPoint};
///
/// let stores = vec![
///     Location::new(1, Address::default(), Point::new(-97.74, 30.27)),
///     Location::new(2, Address::default(), Point::new(-96.80, 32.78)),
///     Location::new(3, Address::default(), Point::new(-95.37, 29.76)),
/// ];
/// let finder = Finder::new(vec![Category::new("COFFEE", stores)])?;
///
/// let query = QueryPoint::new(Point::new(-97.0, 30.0), 2);
/// let outcome = finder.nearest(&query, "COFFEE", &mut RandomPivot::seeded(1))?;
/// let ids: Vec<u64> = outcome.neighbors().iter().map(|n| n.location.id()).collect();
/// assert_eq!(ids, vec![1, 3]);
/// # Ok::<(), nearfind::NearfindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Finder {
    categories: Vec<Category>,
    index: FxHashMap<String, usize>,
    metric: DistanceMetric,
    unit: DistanceUnit,
}

impl Finder {
    /// Builds a finder with the default metric (haversine) and unit (miles).
    ///
    /// Returns an error if two categories share a name.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        Self::with_measure(categories, DistanceMetric::default(), DistanceUnit::default())
    }

    pub fn with_measure(
        categories: Vec<Category>,
        metric: DistanceMetric,
        unit: DistanceUnit,
    ) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (pos, category) in categories.iter().enumerate() {
            if index.insert(category.name.clone(), pos).is_some() {
                return Err(NearfindError::InvalidInput(format!(
                    "duplicate category name: {}",
                    category.name
                )));
            }
        }

        Ok(Self {
            categories,
            index,
            metric,
            unit,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&pos| &self.categories[pos])
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// One distance record per location of `category`, in registry order.
    pub fn candidates<'a>(
        &'a self,
        query: &QueryPoint,
        category: &'a Category,
    ) -> Vec<DistanceRecord<'a>> {
        category
            .locations
            .iter()
            .map(|location| {
                let meters = self.metric.meters(query.point(), location.point());
                DistanceRecord::new(location, self.unit.from_meters(meters))
            })
            .collect()
    }

    /// Nearest locations of one category for one query.
    pub fn nearest<P>(
        &self,
        query: &QueryPoint,
        category: &str,
        pivots: &mut P,
    ) -> Result<Outcome<'_>>
    where
        P: PivotSource + ?Sized,
    {
        let category = self
            .category(category)
            .ok_or_else(|| NearfindError::UnknownCategory(category.to_string()))?;
        Ok(self.nearest_in(query, category, pivots))
    }

    fn nearest_in<'a, P>(
        &'a self,
        query: &QueryPoint,
        category: &'a Category,
        pivots: &mut P,
    ) -> Outcome<'a>
    where
        P: PivotSource + ?Sized,
    {
        let requested = query.count();
        let mut records = self.candidates(query, category);
        let available = records.len();

        match top_k(&mut records, requested, pivots) {
            Some(nearest) => {
                log::trace!(
                    "selected {} of {} {} locations",
                    requested,
                    available,
                    category.name
                );
                let neighbors = nearest
                    .iter()
                    .enumerate()
                    .map(|(pos, record)| Neighbor {
                        rank: pos + 1,
                        location: record.location,
                        distance: record.distance,
                    })
                    .collect();
                Outcome::Found { neighbors }
            }
            None => {
                log::warn!(
                    "{} has {} locations, query at ({}, {}) requested {}",
                    category.name,
                    available,
                    query.latitude(),
                    query.longitude(),
                    requested
                );
                Outcome::Insufficient {
                    requested,
                    available,
                }
            }
        }
    }

    /// Answers one query against every category, in category order.
    pub fn answer<'a, P>(
        &'a self,
        index: usize,
        query: &'a QueryPoint,
        pivots: &mut P,
    ) -> QueryAnswer<'a>
    where
        P: PivotSource + ?Sized,
    {
        log::debug!(
            "query {} at ({}, {}) wants {} per category",
            index,
            query.latitude(),
            query.longitude(),
            query.count()
        );
        let categories = self
            .categories
            .iter()
            .map(|category| CategoryAnswer {
                category: &category.name,
                outcome: self.nearest_in(query, category, pivots),
            })
            .collect();

        QueryAnswer {
            index,
            query,
            unit: self.unit,
            categories,
        }
    }

    /// Answers a batch of queries sequentially with one pivot stream.
    pub fn run<'a, P>(&'a self, queries: &'a [QueryPoint], pivots: &mut P) -> Vec<QueryAnswer<'a>>
    where
        P: PivotSource + ?Sized,
    {
        queries
            .iter()
            .enumerate()
            .map(|(index, query)| self.answer(index, query, pivots))
            .collect()
    }

    /// Answers a batch of queries on `workers` scoped threads.
    ///
    /// Queries are split into contiguous chunks. Worker `w` draws pivots from
    /// its own generator seeded with `seed + w`, and every working sequence is
    /// private to the worker processing that query. Answers come back in input
    /// order.
    pub fn run_parallel<'a>(
        &'a self,
        queries: &'a [QueryPoint],
        workers: usize,
        seed: u64,
    ) -> Vec<QueryAnswer<'a>> {
        let workers = workers.max(1);
        if workers == 1 || queries.len() <= 1 {
            return self.run(queries, &mut RandomPivot::seeded(seed));
        }

        let chunk_size = queries.len().div_ceil(workers);
        log::debug!(
            "answering {} queries on {} workers",
            queries.len(),
            queries.len().div_ceil(chunk_size)
        );

        std::thread::scope(|scope| {
            let handles: Vec<_> = queries
                .chunks(chunk_size)
                .enumerate()
                .map(|(worker, chunk)| {
                    scope.spawn(move || {
                        let mut pivots = RandomPivot::seeded(seed.wrapping_add(worker as u64));
                        let offset = worker * chunk_size;
                        chunk
                            .iter()
                            .enumerate()
                            .map(|(pos, query)| self.answer(offset + pos, query, &mut pivots))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::pivot::FixedPivot;
    use approx::assert_abs_diff_eq;
    use geo::Point;
    use nearfind_types::Address;

    fn store(id: u64, lon: f64, lat: f64) -> Location {
        Location::new(
            id,
            Address::new(format!("{id} Main St"), "Austin", "TX", "78701"),
            Point::new(lon, lat),
        )
    }

    /// Stores due north of the origin, one tenth of a degree apart.
    fn line_of_stores(ids: &[u64]) -> Vec<Location> {
        ids.iter()
            .map(|&id| store(id, 0.0, id as f64 * 0.1))
            .collect()
    }

    fn finder() -> Finder {
        Finder::new(vec![
            Category::new("ALPHA", line_of_stores(&[5, 1, 9, 3, 7])),
            Category::new("BETA", line_of_stores(&[2, 4])),
        ])
        .unwrap()
    }

    fn origin(count: usize) -> QueryPoint {
        QueryPoint::new(Point::new(0.0, 0.0), count)
    }

    fn ids(outcome: &Outcome<'_>) -> Vec<u64> {
        outcome.neighbors().iter().map(|n| n.location.id()).collect()
    }

    #[test]
    fn test_nearest_orders_by_distance() {
        let finder = finder();
        let outcome = finder
            .nearest(&origin(3), "ALPHA", &mut RandomPivot::seeded(4))
            .unwrap();
        assert_eq!(ids(&outcome), vec![1, 3, 5]);
        let ranks: Vec<usize> = outcome.neighbors().iter().map(|n| n.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        for pair in outcome.neighbors().windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_distances_in_configured_unit() {
        let finder = finder();
        let outcome = finder
            .nearest(&origin(1), "ALPHA", &mut FixedPivot::Last)
            .unwrap();
        // 0.1 degree of latitude on the mean-radius sphere
        assert_abs_diff_eq!(outcome.neighbors()[0].distance, 6.9093, epsilon = 1e-3);

        let km = Finder::with_measure(
            vec![Category::new("ALPHA", line_of_stores(&[1]))],
            DistanceMetric::Haversine,
            DistanceUnit::Kilometers,
        )
        .unwrap();
        let outcome = km.nearest(&origin(1), "ALPHA", &mut FixedPivot::Last).unwrap();
        assert_abs_diff_eq!(outcome.neighbors()[0].distance, 11.1195, epsilon = 1e-3);
    }

    #[test]
    fn test_insufficient_candidates() {
        let finder = finder();
        let outcome = finder
            .nearest(&origin(5), "BETA", &mut RandomPivot::seeded(0))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Insufficient {
                requested: 5,
                available: 2
            }
        );
        assert!(outcome.neighbors().is_empty());
    }

    #[test]
    fn test_exactly_all_candidates() {
        let finder = finder();
        let outcome = finder
            .nearest(&origin(2), "BETA", &mut RandomPivot::seeded(0))
            .unwrap();
        assert_eq!(ids(&outcome), vec![2, 4]);
    }

    #[test]
    fn test_unknown_category() {
        let finder = finder();
        let err = finder
            .nearest(&origin(1), "GAMMA", &mut RandomPivot::seeded(0))
            .unwrap_err();
        assert!(matches!(err, NearfindError::UnknownCategory(name) if name == "GAMMA"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let result = Finder::new(vec![
            Category::new("ALPHA", Vec::new()),
            Category::new("ALPHA", Vec::new()),
        ]);
        assert!(matches!(result, Err(NearfindError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_category_is_insufficient() {
        let finder = Finder::new(vec![Category::new("EMPTY", Vec::new())]).unwrap();
        let outcome = finder
            .nearest(&origin(1), "EMPTY", &mut RandomPivot::seeded(0))
            .unwrap();
        assert!(!outcome.is_found());
    }

    #[test]
    fn test_answer_covers_every_category() {
        let finder = finder();
        let query = origin(2);
        let answer = finder.answer(7, &query, &mut RandomPivot::seeded(3));
        assert_eq!(answer.index, 7);
        let names: Vec<&str> = answer.categories.iter().map(|c| c.category).collect();
        assert_eq!(names, vec!["ALPHA", "BETA"]);
        assert_eq!(ids(answer.outcome("ALPHA").unwrap()), vec![1, 3]);
        assert_eq!(ids(answer.outcome("BETA").unwrap()), vec![2, 4]);
        assert!(answer.outcome("GAMMA").is_none());
    }

    #[test]
    fn test_candidates_keep_registry_order() {
        let finder = finder();
        let category = finder.category("ALPHA").unwrap();
        let records = finder.candidates(&origin(1), category);
        let order: Vec<u64> = records.iter().map(|r| r.location.id()).collect();
        assert_eq!(order, vec![5, 1, 9, 3, 7]);
    }

    #[test]
    fn test_locations_untouched_by_queries() {
        let finder = finder();
        let before = finder.category("ALPHA").unwrap().clone();
        let queries = vec![origin(3), origin(1), origin(5)];
        finder.run(&queries, &mut RandomPivot::seeded(10));
        assert_eq!(finder.category("ALPHA").unwrap(), &before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let finder = finder();
        let queries: Vec<QueryPoint> = (0..13)
            .map(|i| QueryPoint::new(Point::new(0.0, 0.013 + i as f64 * 0.05), 1 + i % 3))
            .collect();

        let sequential = finder.run(&queries, &mut RandomPivot::seeded(1));
        let parallel = finder.run_parallel(&queries, 4, 99);

        assert_eq!(parallel.len(), queries.len());
        for (seq, par) in sequential.iter().zip(&parallel) {
            assert_eq!(seq.index, par.index);
            // Distinct distances, so the ordering does not depend on pivots
            assert_eq!(seq.categories, par.categories);
        }
    }

    #[test]
    fn test_parallel_more_workers_than_queries() {
        let finder = finder();
        let queries = vec![origin(1), origin(2)];
        let answers = finder.run_parallel(&queries, 16, 5);
        let indices: Vec<usize> = answers.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_parallel_empty_batch() {
        let finder = finder();
        assert!(finder.run_parallel(&[], 4, 0).is_empty());
    }

    #[test]
    fn test_finder_is_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Finder>();
    }
}
