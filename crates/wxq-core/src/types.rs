//! Core data types for station readings and nested documents

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Station identifier, opaque and repeated across rows
pub type StationId = String;

/// A single station reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    /// Station identifier
    pub station_id: StationId,

    /// Observation date
    pub date: NaiveDate,

    /// Temperature reading (may be negative)
    pub temperature: f64,
}

impl WeatherRecord {
    pub fn new(station_id: impl Into<StationId>, date: NaiveDate, temperature: f64) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            temperature,
        }
    }
}

/// Ordered, read-only collection of readings.
///
/// Rows for one station are expected in chronological order already;
/// nothing here re-sorts them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<WeatherRecord>,
}

impl Dataset {
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct station ids in order of first appearance
    pub fn stations(&self) -> Vec<StationId> {
        let mut seen = HashSet::new();
        let mut stations = Vec::new();
        for record in &self.records {
            if seen.insert(record.station_id.as_str()) {
                stations.push(record.station_id.clone());
            }
        }
        stations
    }

    /// Rows belonging to one station, in dataset order.
    ///
    /// This scans the whole dataset; use [`crate::StationIndex`] when
    /// querying many stations.
    pub fn station_rows<'a>(
        &'a self,
        station_id: &'a str,
    ) -> impl Iterator<Item = &'a WeatherRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.station_id == station_id)
    }
}

impl FromIterator<WeatherRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = WeatherRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A value inside an arbitrarily nested document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NestedValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<NestedValue>),
}

impl NestedValue {
    /// Truthiness: null, false, zero, empty text and empty lists are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            NestedValue::Null => false,
            NestedValue::Bool(v) => *v,
            NestedValue::Integer(v) => *v != 0,
            NestedValue::Float(v) => *v != 0.0,
            NestedValue::Text(v) => !v.is_empty(),
            NestedValue::List(v) => !v.is_empty(),
        }
    }
}

impl From<bool> for NestedValue {
    fn from(value: bool) -> Self {
        NestedValue::Bool(value)
    }
}

impl From<i64> for NestedValue {
    fn from(value: i64) -> Self {
        NestedValue::Integer(value)
    }
}

impl From<f64> for NestedValue {
    fn from(value: f64) -> Self {
        NestedValue::Float(value)
    }
}

impl From<&str> for NestedValue {
    fn from(value: &str) -> Self {
        NestedValue::Text(value.to_string())
    }
}

impl From<String> for NestedValue {
    fn from(value: String) -> Self {
        NestedValue::Text(value)
    }
}

impl<T: Into<NestedValue>> From<Vec<T>> for NestedValue {
    fn from(values: Vec<T>) -> Self {
        NestedValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for NestedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NestedValue::Null => write!(f, "null"),
            NestedValue::Bool(v) => write!(f, "{v}"),
            NestedValue::Integer(v) => write!(f, "{v}"),
            NestedValue::Float(v) => write!(f, "{v}"),
            NestedValue::Text(v) => write!(f, "{v}"),
            NestedValue::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, d).unwrap()
    }

    #[test]
    fn test_stations_first_appearance_order() {
        let dataset: Dataset = vec![
            WeatherRecord::new("b", day(1), 1.0),
            WeatherRecord::new("a", day(1), 2.0),
            WeatherRecord::new("b", day(2), 3.0),
            WeatherRecord::new("c", day(1), 4.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(dataset.stations(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_station_rows_preserve_order() {
        let dataset = Dataset::new(vec![
            WeatherRecord::new("a", day(1), 1.0),
            WeatherRecord::new("b", day(1), 9.0),
            WeatherRecord::new("a", day(2), 2.0),
        ]);

        let temps: Vec<f64> = dataset.station_rows("a").map(|r| r.temperature).collect();
        assert_eq!(temps, vec![1.0, 2.0]);
        assert_eq!(dataset.station_rows("missing").count(), 0);
    }

    #[test]
    fn test_nested_value_truthiness() {
        assert!(!NestedValue::Null.is_truthy());
        assert!(!NestedValue::from(false).is_truthy());
        assert!(!NestedValue::from(0_i64).is_truthy());
        assert!(!NestedValue::from(0.0).is_truthy());
        assert!(!NestedValue::from("").is_truthy());
        assert!(!NestedValue::List(vec![]).is_truthy());

        assert!(NestedValue::from(-1_i64).is_truthy());
        assert!(NestedValue::from("apple").is_truthy());
        assert!(NestedValue::from(f64::NAN).is_truthy());
    }

    #[test]
    fn test_nested_value_serde() {
        let json = r#"[1, [2.5, "x"], null, true, []]"#;
        let value: NestedValue = serde_json::from_str(json).unwrap();

        assert_eq!(
            value,
            NestedValue::List(vec![
                NestedValue::Integer(1),
                NestedValue::List(vec![NestedValue::Float(2.5), NestedValue::from("x")]),
                NestedValue::Null,
                NestedValue::Bool(true),
                NestedValue::List(vec![]),
            ])
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,[2.5,"x"],null,true,[]]"#);
    }

    #[test]
    fn test_nested_value_rejects_objects() {
        let result = serde_json::from_str::<NestedValue>(r#"[{"a": 1}]"#);
        assert!(result.is_err());
    }
}
