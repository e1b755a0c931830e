//! Station partitioning of a dataset

use crate::types::{Dataset, WeatherRecord};
use std::collections::HashMap;

/// Precomputed mapping from station id to its row indices.
///
/// Built in one pass over the dataset. Row indices per station keep
/// dataset order, which is the station's chronological order.
#[derive(Debug, Clone)]
pub struct StationIndex<'a> {
    dataset: &'a Dataset,
    rows: HashMap<&'a str, Vec<usize>>,
}

impl<'a> StationIndex<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        let mut rows: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (i, record) in dataset.records().iter().enumerate() {
            rows.entry(record.station_id.as_str()).or_default().push(i);
        }

        Self { dataset, rows }
    }

    /// Number of distinct stations
    pub fn station_count(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.rows.contains_key(station_id)
    }

    /// Row indices of one station; empty when unknown
    fn rows(&self, station_id: &str) -> &[usize] {
        self.rows.get(station_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Records for one station in dataset order; empty when unknown
    pub fn records(&self, station_id: &str) -> impl Iterator<Item = &'a WeatherRecord> + '_ {
        let records = self.dataset.records();
        self.rows(station_id).iter().map(move |&i| &records[i])
    }

    /// Temperature series for one station
    pub fn series(&self, station_id: &str) -> impl Iterator<Item = f64> + '_ {
        let records = self.dataset.records();
        self.rows(station_id).iter().map(move |&i| records[i].temperature)
    }
}
