// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::autogamma::solve_potts_autogamma;
use crate::potts::PottsConfig;
use stepfit_core::StepError;
use stepfit_costs::RangeMedian;

/// Outcome of a regression scan: the latest fitted level sits above the
/// best historical level by more than the error bars allow.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Regression {
    /// Level of the latest segment.
    pub last_value: f64,
    /// Error estimate of the latest segment.
    pub last_err: f64,
    /// Position (in the caller's indexing) of the last sample of the
    /// best segment.
    pub best_pos: usize,
    /// Level of the best segment.
    pub best_value: f64,
    /// Error estimate of the best segment.
    pub best_err: f64,
}

/// Suppresses isolated outliers outside the 2-sigma band.
///
/// Runs of 1-3 excursions are blanked only when the points right before
/// and after them sit inside the band; longer excursions are treated as
/// real level changes and kept.
pub fn filter_outliers(y: &mut [Option<f64>]) {
    let mut sum_y = 0.0;
    let mut sum_y2 = 0.0;
    let mut n = 0usize;
    for value in y.iter().flatten() {
        sum_y += value;
        sum_y2 += value * value;
        n += 1;
    }

    if n < 5 {
        return;
    }

    let mean = sum_y / n as f64;
    let std = (sum_y2 / n as f64 - mean * mean).abs().sqrt();
    let band = 2.0 * std;

    let len = y.len();
    for j in 0..len {
        let Some(value) = y[j] else { continue };
        if (value - mean).abs() <= band {
            continue;
        }

        let near_before = j < 3 || window_min_deviation(&y[j - 3..=j], mean) < band;
        let near_after = j > len - 3 || window_min_deviation(&y[j..(j + 4).min(len)], mean) < band;
        if near_before && near_after {
            y[j] = None;
        }
    }
}

fn window_min_deviation(window: &[Option<f64>], mean: f64) -> f64 {
    window
        .iter()
        .flatten()
        .map(|value| (value - mean).abs())
        .fold(f64::INFINITY, f64::min)
}

/// Scans a (noisy) result series for a step regression.
///
/// `None` and NaN entries mark missing data; they are compacted away
/// before fitting and reported positions refer back to the caller's
/// indexing. The series is outlier-filtered, fitted with an
/// automatically selected penalty, and the fitted levels are walked
/// oldest to newest. Segments shorter than 3 samples are disregarded.
/// When the position of the minimum is uncertain because of overlapping
/// error bars, the newer segment wins, biasing reports toward recent
/// changes.
///
/// Returns `None` when the latest level does not exceed the best level
/// by more than the larger of the two error estimates.
pub fn detect_regressions(y: &[Option<f64>]) -> Result<Option<Regression>, StepError> {
    let mut filtered_input = y.to_vec();
    filter_outliers(&mut filtered_input);

    let mut index_map = Vec::new();
    let mut values = Vec::new();
    for (j, value) in filtered_input.iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => {
                index_map.push(j);
                values.push(*v);
            }
            _ => {}
        }
    }

    if values.is_empty() {
        return Ok(None);
    }

    let mut oracle = RangeMedian::unweighted(&values)?;
    let config = PottsConfig {
        min_size: 2,
        ..PottsConfig::default()
    };
    let Some(fit) = solve_potts_autogamma(&mut oracle, None, &config)? else {
        return Ok(None);
    };

    let mut best_pos: Option<usize> = None;
    let mut best_value: Option<f64> = None;
    let mut best_err: Option<f64> = None;
    let mut last_value: Option<f64> = None;
    let mut last_err: Option<f64> = None;
    let mut prev_right = 0usize;

    let segmentation = &fit.segmentation;
    for ((&right, &value), &dist) in segmentation
        .right
        .iter()
        .zip(&segmentation.values)
        .zip(&segmentation.dists)
    {
        if right - prev_right < 3 {
            prev_right = right;
            continue;
        }

        last_value = Some(value);
        last_err = Some(dist / (right - prev_right) as f64);
        prev_right = right;

        let improves = match (best_value, best_err) {
            (Some(best_value), Some(best_err)) => value <= best_value + best_err,
            _ => true,
        };
        if improves {
            best_pos = Some(index_map[right - 1]);
            best_value = Some(value);
            best_err = last_err;
        }
    }

    match (last_value, last_err, best_pos, best_value, best_err) {
        (Some(last_value), Some(last_err), Some(best_pos), Some(best_value), Some(best_err))
            if last_value > best_value + last_err.max(best_err) =>
        {
            Ok(Some(Regression {
                last_value,
                last_err,
                best_pos,
                best_value,
                best_err,
            }))
        }
        _ => Ok(None),
    }
}
