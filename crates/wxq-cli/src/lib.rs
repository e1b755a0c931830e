use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};
use wxq_core::{
    lowest_temperature, most_fluctuating_in, Dataset, FluctuationRule, LowestReading,
    NestedValue, StationIndex, StationScore,
};

/// Answers to the three station questions for one dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherReport {
    pub rows: usize,
    pub stations: usize,
    /// Stations actually scored for fluctuation (after any limit)
    pub scored_stations: usize,
    pub lowest: Option<LowestReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_error: Option<String>,
    pub most_fluctuation: Option<StationScore>,
    pub highest_fluctuation_range: Option<StationScore>,
}

/// Run every query over `dataset`.
///
/// `station_limit` keeps only the first N distinct stations for the
/// fluctuation queries, which is handy for sampling very large files.
pub fn build_report(dataset: &Dataset, station_limit: Option<usize>) -> WeatherReport {
    let mut stations = dataset.stations();
    let total_stations = stations.len();
    if let Some(limit) = station_limit {
        stations.truncate(limit);
    }

    let (lowest, lowest_error) = match lowest_temperature(dataset) {
        Ok(reading) => (Some(reading), None),
        Err(e) => {
            warn!(error = %e, "lowest temperature unavailable");
            (None, Some(e.to_string()))
        }
    };

    let index = StationIndex::new(dataset);
    let report = WeatherReport {
        rows: dataset.len(),
        stations: total_stations,
        scored_stations: stations.len(),
        lowest,
        lowest_error,
        most_fluctuation: most_fluctuating_in(&index, &stations, FluctuationRule::Total),
        highest_fluctuation_range: most_fluctuating_in(&index, &stations, FluctuationRule::TopTwo),
    };

    info!(
        rows = report.rows,
        stations = report.stations,
        scored = report.scored_stations,
        "Report built"
    );
    report
}

fn describe_winner(winner: Option<&StationScore>) -> String {
    match winner {
        Some(score) => format!("station {} ({})", score.station_id, score.score),
        None => "none".to_string(),
    }
}

/// Plain-text report, one answer per line
pub fn render_report(report: &WeatherReport) -> String {
    let lowest = match (&report.lowest, &report.lowest_error) {
        (Some(reading), _) => format!(
            "station {} on {} ({})",
            reading.station_id, reading.date, reading.temperature
        ),
        (None, Some(error)) => format!("unavailable ({error})"),
        (None, None) => "unavailable".to_string(),
    };

    [
        format!(
            "Rows: {} across {} stations ({} scored)",
            report.rows, report.stations, report.scored_stations
        ),
        format!("Lowest temperature: {lowest}"),
        format!(
            "Most total fluctuation: {}",
            describe_winner(report.most_fluctuation.as_ref())
        ),
        format!(
            "Highest fluctuation range: {}",
            describe_winner(report.highest_fluctuation_range.as_ref())
        ),
    ]
    .join("\n")
}

pub fn render_report_json(report: &WeatherReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Flatten `document` and render its leaves, one per line or as a JSON array
pub fn render_leaves(document: &NestedValue, json: bool) -> Result<String> {
    let leaves = document.flatten();
    if json {
        return Ok(serde_json::to_string(&leaves.collect::<Vec<_>>())?);
    }

    Ok(leaves
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
