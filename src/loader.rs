//! CSV loaders for location registries and query batches.
//!
//! Location files carry the columns
//! `Store ID, Address, City, State, Zip Code, Latitude, Longitude`;
//! query files carry `Latitude, Longitude, Number of stores desired`.
//! A leading UTF-8 byte order mark is tolerated. Columns are matched by
//! header name, so their order does not matter.

use crate::error::{NearfindError, Result};
use geo::Point;
use nearfind_types::{Address, Location, QueryPoint};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "Store ID")]
    id: u64,
    #[serde(rename = "Address")]
    street: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Zip Code")]
    zip_code: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location::new(
            row.id,
            Address::new(row.street, row.city, row.state, row.zip_code),
            Point::new(row.longitude, row.latitude),
        )
    }
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Number of stores desired")]
    count: usize,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Reads locations from CSV content.
pub fn read_locations<R: Read>(reader: R) -> Result<Vec<Location>> {
    let mut rdr = csv_reader(reader);
    let mut locations = Vec::new();
    for row in rdr.deserialize::<LocationRow>() {
        locations.push(row?.into());
    }
    Ok(locations)
}

/// Reads queries from CSV content.
///
/// A row requesting zero locations is rejected with
/// [`NearfindError::InvalidInput`] naming its line.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<QueryPoint>> {
    let mut rdr = csv_reader(reader);
    let mut queries = Vec::new();
    for (idx, row) in rdr.deserialize::<QueryRow>().enumerate() {
        let row = row?;
        if row.count == 0 {
            // Header is line 1
            return Err(NearfindError::InvalidInput(format!(
                "query on line {} requests 0 locations",
                idx + 2
            )));
        }
        queries.push(QueryPoint::new(
            Point::new(row.longitude, row.latitude),
            row.count,
        ));
    }
    Ok(queries)
}

/// Loads a location CSV file.
pub fn load_locations<P: AsRef<Path>>(path: P) -> Result<Vec<Location>> {
    let path = path.as_ref();
    let locations = read_locations(open(path)?).map_err(|e| with_path(e, path))?;
    log::debug!("loaded {} locations from {}", locations.len(), path.display());
    Ok(locations)
}

/// Loads a query CSV file.
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<QueryPoint>> {
    let path = path.as_ref();
    let queries = read_queries(open(path)?).map_err(|e| with_path(e, path))?;
    log::debug!("loaded {} queries from {}", queries.len(), path.display());
    Ok(queries)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| NearfindError::File {
            path: path.to_path_buf(),
            source,
        })
}

fn with_path(err: NearfindError, path: &Path) -> NearfindError {
    match err {
        NearfindError::Csv(source) => NearfindError::Parse {
            path: path.to_path_buf(),
            source,
        },
        NearfindError::InvalidInput(msg) => {
            NearfindError::InvalidInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    }
}
