//! Per-station temperature fluctuation scoring
//!
//! Every station's series is turned into day-over-day absolute
//! differences, then reduced by a [`FluctuationRule`]. The winner is the
//! first station, in the order the caller lists them, whose score is
//! strictly greater than every earlier score and than zero.

use crate::index::StationIndex;
use crate::types::{Dataset, StationId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Terminal reduction over a station's day-over-day differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluctuationRule {
    /// Sum of every difference
    Total,
    /// Sum of the two largest differences
    TopTwo,
}

impl FluctuationRule {
    pub fn reduce<I>(self, diffs: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        match self {
            FluctuationRule::Total => diffs.into_iter().sum(),
            FluctuationRule::TopTwo => {
                // Differences are non-negative, so a zero seed equals "sum of what exists"
                let (first, second) =
                    diffs
                        .into_iter()
                        .fold((0.0_f64, 0.0_f64), |(first, second), diff| {
                            if diff > first {
                                (diff, first)
                            } else if diff > second {
                                (first, diff)
                            } else {
                                (first, second)
                            }
                        });
                first + second
            }
        }
    }
}

/// Iterator of absolute differences between consecutive readings
#[derive(Debug, Clone)]
pub struct DayOverDay<I> {
    readings: I,
    previous: Option<f64>,
}

impl<I: Iterator<Item = f64>> Iterator for DayOverDay<I> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.previous.is_none() {
            self.previous = Some(self.readings.next()?);
        }

        let current = self.readings.next()?;
        let previous = self.previous.replace(current)?;
        Some((current - previous).abs())
    }
}

/// `|t[i] - t[i-1]|` for every consecutive pair; k readings give k-1 values
pub fn day_over_day<I>(readings: I) -> DayOverDay<I::IntoIter>
where
    I: IntoIterator<Item = f64>,
{
    DayOverDay {
        readings: readings.into_iter(),
        previous: None,
    }
}

/// A station paired with its fluctuation score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationScore {
    pub station_id: StationId,
    pub score: f64,
}

/// Score every listed station, in the order given
pub fn station_scores(
    index: &StationIndex<'_>,
    stations: &[StationId],
    rule: FluctuationRule,
) -> Vec<StationScore> {
    stations
        .iter()
        .map(|station_id| StationScore {
            station_id: station_id.clone(),
            score: rule.reduce(day_over_day(index.series(station_id))),
        })
        .collect()
}

/// Pick the first station whose score strictly beats the running maximum.
///
/// The running maximum starts at zero, so `None` means no station
/// fluctuated at all. Later stations with an equal score never displace
/// an earlier one.
pub fn select_winner<I>(scores: I) -> Option<StationScore>
where
    I: IntoIterator<Item = StationScore>,
{
    let mut best: Option<StationScore> = None;
    let mut max_score = 0.0;

    for candidate in scores {
        if candidate.score > max_score {
            debug!(
                station = %candidate.station_id,
                score = candidate.score,
                previous = max_score,
                "new fluctuation leader"
            );
            max_score = candidate.score;
            best = Some(candidate);
        }
    }

    best
}

/// Most fluctuating station under `rule`, with its score
pub fn most_fluctuating(
    dataset: &Dataset,
    stations: &[StationId],
    rule: FluctuationRule,
) -> Option<StationScore> {
    most_fluctuating_in(&StationIndex::new(dataset), stations, rule)
}

/// Same as [`most_fluctuating`], over an index built once by the caller
pub fn most_fluctuating_in(
    index: &StationIndex<'_>,
    stations: &[StationId],
    rule: FluctuationRule,
) -> Option<StationScore> {
    let winner = select_winner(station_scores(index, stations, rule));

    match &winner {
        Some(score) => info!(
            ?rule,
            station = %score.station_id,
            score = score.score,
            stations = stations.len(),
            "fluctuation winner selected"
        ),
        None => info!(?rule, stations = stations.len(), "no station fluctuated"),
    }

    winner
}

/// Station with the largest summed day-over-day fluctuation
pub fn most_total_fluctuation(dataset: &Dataset, stations: &[StationId]) -> Option<StationId> {
    most_fluctuating(dataset, stations, FluctuationRule::Total).map(|score| score.station_id)
}

/// Station with the largest sum of its two biggest day-over-day swings
pub fn highest_fluctuation_range(dataset: &Dataset, stations: &[StationId]) -> Option<StationId> {
    most_fluctuating(dataset, stations, FluctuationRule::TopTwo).map(|score| score.station_id)
}
