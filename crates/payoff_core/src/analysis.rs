//! Strategy analysis.
//!
//! [`validate_legs`] turns a request's raw records into exactly
//! [`LEG_COUNT`] validated contracts; [`analyze`] reduces them to the
//! sampled curve and summary metrics.

use serde::{Deserialize, Serialize};

use crate::contract::{OptionContract, RawContract};
use crate::engine::{sample_curve, SamplePoint};
use crate::types::InputError;

/// Number of legs in a strategy.
pub const LEG_COUNT: usize = 4;

/// Payoff profile and risk metrics of a four-leg strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every leg sampled over the shared price grid, leg-major
    pub xy_values: Vec<SamplePoint>,
    /// Largest sampled profit, never below zero
    pub max_profit: f64,
    /// Smallest sampled profit (largest loss)
    pub max_loss: f64,
    /// One break-even per leg, in input order
    pub break_even_points: Vec<f64>,
}

/// Validates a request's legs.
///
/// Rejects any count other than [`LEG_COUNT`] before looking at the legs,
/// then validates them in order. The first invalid leg's error is returned
/// unchanged and the remaining legs are not inspected.
///
/// # Examples
/// ```
/// use payoff_core::analysis::validate_legs;
/// use payoff_core::types::InputError;
///
/// let result = validate_legs(&[]);
/// assert_eq!(result, Err(InputError::InvalidLegCount { expected: 4, got: 0 }));
/// ```
pub fn validate_legs(raw: &[RawContract]) -> Result<[OptionContract; LEG_COUNT], InputError> {
    let legs: &[RawContract; LEG_COUNT] =
        raw.try_into().map_err(|_| InputError::InvalidLegCount {
            expected: LEG_COUNT,
            got: raw.len(),
        })?;

    let [a, b, c, d] = legs;
    Ok([a.validate()?, b.validate()?, c.validate()?, d.validate()?])
}

/// Analyses a four-leg strategy.
///
/// Legs are trusted as validated. Maximum profit is floored at zero: a
/// strategy that never profits reports no opportunity rather than a
/// negative profit. Maximum loss is the raw minimum.
pub fn analyze(contracts: &[OptionContract; LEG_COUNT]) -> AnalysisResult {
    let xy_values = sample_curve(contracts);
    let max_profit = max_profit(&xy_values);
    let max_loss = max_loss(&xy_values);

    let break_even_points = contracts
        .iter()
        .map(OptionContract::break_even_point)
        .collect();

    AnalysisResult {
        xy_values,
        max_profit,
        max_loss,
        break_even_points,
    }
}

fn max_profit(points: &[SamplePoint]) -> f64 {
    points.iter().map(|p| p.y).fold(0.0, f64::max)
}

// Callers guarantee a non-empty curve.
fn max_loss(points: &[SamplePoint]) -> f64 {
    points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min)
}
