//! Extreme-value lookups over a whole dataset

use crate::types::{Dataset, StationId, WeatherRecord};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where and when the lowest temperature was observed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowestReading {
    pub station_id: StationId,
    pub date: NaiveDate,
    pub temperature: f64,
}

impl From<&WeatherRecord> for LowestReading {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            station_id: record.station_id.clone(),
            date: record.date,
            temperature: record.temperature,
        }
    }
}

/// Row holding the minimum temperature; the first one wins on ties
pub fn lowest_temperature(dataset: &Dataset) -> CoreResult<LowestReading> {
    let mut records = dataset.records().iter();
    let mut lowest = records.next().ok_or(CoreError::EmptyDataset)?;

    for record in records {
        if record.temperature < lowest.temperature {
            lowest = record;
        }
    }

    Ok(lowest.into())
}
