//! Rendering query answers.
//!
//! Three formats are supported:
//!
//! | Format | Content | Insufficient pairs |
//! |--------|---------|--------------------|
//! | Text | one block per (category, query), category-major | omitted |
//! | Json | every answer, serde representation | `"status": "insufficient"` |
//! | GeoJson | `FeatureCollection` of found neighbors | omitted |

use crate::error::{NearfindError, Result};
use crate::finder::{Outcome, QueryAnswer};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Largest number of decimal places a report will print.
pub const MAX_PRECISION: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[serde(rename = "geojson")]
    GeoJson,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::GeoJson => "geojson",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = NearfindError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "geojson" => Ok(OutputFormat::GeoJson),
            other => Err(NearfindError::InvalidInput(format!(
                "unknown output format '{}', expected text, json or geojson",
                other
            ))),
        }
    }
}

/// Writes answers in one format.
///
/// Distance labels come from each [`QueryAnswer::unit`], the unit the finder
/// measured in.
///
/// Coordinates in text headers use Rust's shortest round-trip `{:?}` form, so
/// `30` prints as `30.0` and `0.00001` as `1e-5`.
///
/// # Examples
///
/// ```
/// use geo::Point;
/// use nearfind::compute::pivot::RandomPivot;
/// use nearfind::finder::{Category, Finder};
/// use nearfind::report::{OutputFormat, Report};
/// use nearfind::{Address, Location, QueryPoint};
///
/// let stores = vec![Location::new(
///     12,
///     Address::new("100 Main St", "Austin", "TX", "78701"),
///     Point::new(-97.0, 30.0),
/// )];
/// let finder = Finder::new(vec![Category::new("COFFEE", stores)])?;
/// let queries = vec![QueryPoint::new(Point::new(-97.0, 30.0), 1)];
/// let answers = finder.run(&queries, &mut RandomPivot::seeded(0));
///
/// let mut out = Vec::new();
/// Report::new(OutputFormat::Text, 2).write(&answers, &mut out)?;
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "The 1 closest COFFEE stores to (30.0, -97.0):\n\
///      Store #12. 100 Main St, Austin, TX, 78701. - 0.00 miles.\n\n"
/// );
/// # Ok::<(), nearfind::NearfindError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    format: OutputFormat,
    precision: usize,
}

impl Report {
    /// `precision` is clamped to [`MAX_PRECISION`].
    pub fn new(format: OutputFormat, precision: usize) -> Self {
        Self {
            format,
            precision: precision.min(MAX_PRECISION),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write<W: Write>(&self, answers: &[QueryAnswer<'_>], mut out: W) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(answers, &mut out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, answers)?;
                writeln!(out)?;
            }
            OutputFormat::GeoJson => {
                serde_json::to_writer_pretty(&mut out, &self.feature_collection(answers))?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Renders to a string; convenient for tests and small batches.
    pub fn render(&self, answers: &[QueryAnswer<'_>]) -> Result<String> {
        let mut buf = Vec::new();
        self.write(answers, &mut buf)?;
        String::from_utf8(buf).map_err(|e| NearfindError::InvalidInput(e.to_string()))
    }

    // All queries for the first category, then all for the second, and so on.
    fn write_text<W: Write>(&self, answers: &[QueryAnswer<'_>], out: &mut W) -> Result<()> {
        let category_count = answers.first().map_or(0, |a| a.categories.len());
        for slot in 0..category_count {
            for answer in answers {
                let Some(entry) = answer.categories.get(slot) else {
                    continue;
                };
                let Outcome::Found { neighbors } = &entry.outcome else {
                    continue;
                };

                writeln!(
                    out,
                    "The {} closest {} stores to ({:?}, {:?}):",
                    neighbors.len(),
                    entry.category,
                    answer.query.latitude(),
                    answer.query.longitude()
                )?;
                for neighbor in neighbors {
                    writeln!(
                        out,
                        "Store #{}. {}. - {:.prec$} {}.",
                        neighbor.location.id(),
                        neighbor.location.address(),
                        neighbor.distance,
                        answer.unit.label(),
                        prec = self.precision
                    )?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn feature_collection(&self, answers: &[QueryAnswer<'_>]) -> FeatureCollection {
        let mut features = Vec::new();
        for answer in answers {
            for entry in &answer.categories {
                for neighbor in entry.outcome.neighbors() {
                    let location = neighbor.location;
                    let address = location.address();

                    let mut properties = JsonObject::new();
                    properties.insert("category".into(), entry.category.into());
                    properties.insert("query".into(), answer.index.into());
                    properties.insert("rank".into(), neighbor.rank.into());
                    properties.insert("store_id".into(), location.id().into());
                    properties.insert("address".into(), address.street.as_str().into());
                    properties.insert("city".into(), address.city.as_str().into());
                    properties.insert("state".into(), address.state.as_str().into());
                    properties.insert("zip_code".into(), address.zip_code.as_str().into());
                    properties.insert("distance".into(), self.rounded(neighbor.distance).into());
                    properties.insert("unit".into(), answer.unit.label().into());

                    features.push(Feature {
                        bbox: None,
                        geometry: Some(Geometry::new(Value::Point(vec![
                            location.longitude(),
                            location.latitude(),
                        ]))),
                        id: None,
                        properties: Some(properties),
                        foreign_members: None,
                    });
                }
            }
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn rounded(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision as i32);
        (value * scale).round() / scale
    }
}
