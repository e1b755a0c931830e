//! CSV loading of station readings

use crate::{IngestError, IngestResult};
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use wxq_core::{CoreError, Dataset, WeatherRecord};

/// Column names and date format of a readings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    pub station_column: String,
    pub date_column: String,
    pub temperature_column: String,
    pub date_format: String,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            station_column: "station_id".to_string(),
            date_column: "date".to_string(),
            temperature_column: "temperature_c".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Resolved header positions
struct Columns {
    station: usize,
    date: usize,
    temperature: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord, layout: &CsvLayout) -> IngestResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            station: find(&layout.station_column)?,
            date: find(&layout.date_column)?,
            temperature: find(&layout.temperature_column)?,
        })
    }
}

/// Load a readings CSV from disk
pub fn load_dataset(path: impl AsRef<Path>, layout: &CsvLayout) -> IngestResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = read_dataset(file, layout)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        "Loaded readings"
    );
    Ok(dataset)
}

/// Read readings from any CSV source.
///
/// Fails on the first row with a missing field, an unparseable date, or a
/// temperature that is not a finite number.
pub fn read_dataset<R: Read>(reader: R, layout: &CsvLayout) -> IngestResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::resolve(reader.headers()?, layout)?;
    debug!(
        station = columns.station,
        date = columns.date,
        temperature = columns.temperature,
        "Resolved CSV columns"
    );

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1
        let line = row
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(i + 2);
        records.push(parse_row(&row, &columns, layout, line)?);
    }

    Ok(Dataset::new(records))
}

fn parse_row(
    row: &StringRecord,
    columns: &Columns,
    layout: &CsvLayout,
    line: usize,
) -> IngestResult<WeatherRecord> {
    let invalid = |reason: String| CoreError::InvalidRecord { line, reason };

    let field = |index: usize, name: &str| {
        row.get(index)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| invalid(format!("missing {name}")))
    };

    let station_id = field(columns.station, &layout.station_column)?;

    let raw_date = field(columns.date, &layout.date_column)?;
    let date = NaiveDate::parse_from_str(raw_date, &layout.date_format)
        .map_err(|e| invalid(format!("bad date '{raw_date}': {e}")))?;

    let raw_temperature = field(columns.temperature, &layout.temperature_column)?;
    let temperature: f64 = raw_temperature
        .parse()
        .map_err(|_| invalid(format!("non-numeric temperature '{raw_temperature}'")))?;
    if !temperature.is_finite() {
        return Err(invalid(format!("non-finite temperature '{raw_temperature}'")).into());
    }

    Ok(WeatherRecord::new(station_id, date, temperature))
}
