//! Payoff sampling.
//!
//! Each leg's payoff is piecewise linear with kinks only at its strike and
//! break-even, so a strategy's curve is captured exactly by evaluating every
//! leg at those prices plus two window bounds:
//!
//! 1. `0.0`, the lower bound
//! 2. every leg's strike
//! 3. every leg's break-even (floored at `0.0`)
//! 4. the upper bound, `max(2 × strike)` over all legs
//!
//! The grid is shared: every leg is evaluated at every price, so legs can be
//! compared point by point. Prices are not deduplicated.

use serde::{Deserialize, Serialize};

use crate::contract::OptionContract;

/// Lower bound of the sampling window.
pub const LOWER_BOUND: f64 = 0.0;

/// One leg's profit or loss at one underlying price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Underlying price at expiry
    pub x: f64,
    /// Profit or loss of the leg at `x`
    pub y: f64,
}

/// Upper bound of the sampling window: twice the largest strike.
pub fn upper_bound(contracts: &[OptionContract]) -> f64 {
    contracts
        .iter()
        .map(|c| 2.0 * c.strike())
        .fold(LOWER_BOUND, f64::max)
}

/// Builds the shared price grid, `2 + 2 × contracts.len()` entries long.
///
/// Order: lower bound, strikes in leg order, break-evens in leg order, upper
/// bound.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use payoff_core::contract::RawContract;
/// use payoff_core::engine::sample_prices;
///
/// let leg = RawContract::new("call", 100.0, 10.0, 12.0, "long", Utc::now() + Duration::days(7))
///     .validate()
///     .unwrap();
///
/// assert_eq!(sample_prices(&[leg]), vec![0.0, 100.0, 112.0, 200.0]);
/// ```
pub fn sample_prices(contracts: &[OptionContract]) -> Vec<f64> {
    let mut prices = Vec::with_capacity(2 + 2 * contracts.len());

    prices.push(LOWER_BOUND);
    prices.extend(contracts.iter().map(OptionContract::strike));
    prices.extend(
        contracts
            .iter()
            .map(|c| c.break_even_point().max(LOWER_BOUND)),
    );
    prices.push(upper_bound(contracts));

    prices
}

/// Evaluates one leg at every price of the grid.
pub fn leg_curve<'a>(
    contract: &'a OptionContract,
    prices: &'a [f64],
) -> impl Iterator<Item = SamplePoint> + 'a {
    prices.iter().map(move |&x| SamplePoint {
        x,
        y: contract.profit_or_loss(x),
    })
}

/// Samples every leg over the shared grid.
///
/// Output is leg-major: all points of the first leg in grid order, then the
/// second leg, and so on.
pub fn sample_curve(contracts: &[OptionContract]) -> Vec<SamplePoint> {
    let prices = sample_prices(contracts);

    contracts
        .iter()
        .flat_map(|contract| leg_curve(contract, &prices))
        .collect()
}
