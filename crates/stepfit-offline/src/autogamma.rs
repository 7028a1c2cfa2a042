// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::potts::{PottsConfig, solve_potts_approx};
use stepfit_core::{Segmentation, StepError};
use stepfit_costs::RangeMedian;

/// Potts fit together with the penalty that produced it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct StepFit {
    pub segmentation: Segmentation,
    pub gamma: f64,
}

/// Solves the Potts problem with an automatically determined gamma.
///
/// The penalty is chosen by minimizing the information measure
///
/// ```text
/// f(gamma) = beta * k(gamma) + ln(sum of segment deviations)
/// ```
///
/// over `gamma = dist(0, n-1) * exp(x)` with a rough golden-section
/// search on the log scale; an accurate minimum is not needed. `beta`
/// defaults to `3 * ln(n) / n`, in the spirit of a Bayesian information
/// criterion with three parameters per change point.
///
/// Returns the best fit seen during the search, or `None` for an empty
/// series.
pub fn solve_potts_autogamma(
    oracle: &mut RangeMedian,
    beta: Option<f64>,
    config: &PottsConfig,
) -> Result<Option<StepFit>, StepError> {
    let n = oracle.len();
    if n == 0 {
        return Ok(None);
    }

    let beta = beta.unwrap_or(3.0 * (n as f64).ln() / n as f64);
    let gamma_0 = oracle.dist(0, n - 1)?;

    let mut best: Option<(f64, StepFit)> = None;
    let mut failure: Option<StepError> = None;

    {
        let evaluate = |x: f64| -> f64 {
            if failure.is_some() {
                return f64::INFINITY;
            }
            let gamma = gamma_0 * x.exp();
            match solve_potts_approx(oracle, Some(gamma), config) {
                Ok(segmentation) => {
                    let objective = beta * segmentation.len() as f64
                        + (1e-300 + segmentation.total_dist()).ln();
                    let improved = best
                        .as_ref()
                        .is_none_or(|(best_objective, _)| objective < *best_objective);
                    if improved {
                        best = Some((
                            objective,
                            StepFit {
                                segmentation,
                                gamma,
                            },
                        ));
                    }
                    objective
                }
                Err(err) => {
                    failure = Some(err);
                    f64::INFINITY
                }
            }
        };

        let a = (0.1 / n as f64).ln();
        let b = 0.0;
        golden_search(evaluate, a, b, a.abs() * 0.1, 0.0, true);
    }

    if let Some(err) = failure {
        return Err(err);
    }
    Ok(best.map(|(_, fit)| fit))
}

/// Minimizes `f` on `[a, b]` by golden-section search.
///
/// With `expand_bounds` the interval is widened so that `f` is first
/// evaluated at `x = a` and `x = b` themselves. Termination is
/// controlled by the interval width (`xatol`) and the relative spread
/// of the bracketing function values (`ftol`).
pub fn golden_search<F: FnMut(f64) -> f64>(
    mut f: F,
    a: f64,
    b: f64,
    xatol: f64,
    ftol: f64,
    expand_bounds: bool,
) -> f64 {
    let ratio = 2.0 / (1.0 + 5.0_f64.sqrt());

    let (mut x0, mut x3) = if expand_bounds {
        (
            (ratio * a - (1.0 - ratio) * b) / (2.0 * ratio - 1.0),
            (ratio * b - (1.0 - ratio) * a) / (2.0 * ratio - 1.0),
        )
    } else {
        (a, b)
    };

    let mut x1 = ratio * x0 + (1.0 - ratio) * x3;
    let mut x2 = (1.0 - ratio) * x0 + ratio * x3;

    let mut f1 = f(x1);
    let mut f2 = f(x2);

    let f0 = f1.abs().max(f2.abs());

    loop {
        if (x0 - x3).abs() < xatol || (f1 - f2).abs() < ftol * f0 {
            break;
        }

        if f2 < f1 {
            x0 = x1;
            x1 = x2;
            x2 = ratio * x1 + (1.0 - ratio) * x3;
            f1 = f2;
            f2 = f(x2);
        } else {
            x3 = x2;
            x2 = x1;
            x1 = ratio * x2 + (1.0 - ratio) * x0;
            f2 = f1;
            f1 = f(x1);
        }
    }

    if f2 < f1 { x2 } else { x1 }
}
