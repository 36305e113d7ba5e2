//! Option leg definitions.
//!
//! A leg enters the system as a [`RawContract`], the structurally
//! deserialised wire record, and becomes an [`OptionContract`] only after
//! passing every validation rule. All payoff arithmetic lives on the
//! validated type.
//!
//! # Rounding policy
//!
//! Every monetary result is truncated toward zero at two decimal places
//! (see [`truncate_cents`]). Downstream consumers compare against fixtures
//! produced under this policy, so it is not standard rounding and must not
//! become it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ContractError, OptionType, Position};

/// Truncates a value toward zero at two decimal places.
///
/// Scales by 100, drops the fractional part, and scales back. Binary
/// representation error is not compensated: `0.29` is stored just below
/// 0.29 and therefore truncates to `0.28`. A result of zero is always
/// positive zero, so residues like `-0.001` serialise as `0.0`.
///
/// # Examples
/// ```
/// use payoff_core::contract::truncate_cents;
///
/// assert_eq!(truncate_cents(1.239), 1.23);
/// assert_eq!(truncate_cents(-0.015), -0.01);
/// assert_eq!(truncate_cents(97.96), 97.96);
/// assert!(truncate_cents(-0.001).is_sign_positive());
/// ```
#[inline]
pub fn truncate_cents(value: f64) -> f64 {
    // Adding +0.0 turns -0.0 into +0.0 and leaves every other value unchanged
    (value * 100.0).trunc() / 100.0 + 0.0
}

/// Unvalidated option leg as received on the wire.
///
/// Missing fields deserialise to empty or zero values so that an incomplete
/// record is reported by [`RawContract::validate`] rather than by the
/// decoder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContract {
    /// Option type, `call` or `put` in any case
    #[serde(rename = "type")]
    pub option_type: String,
    /// Strike price
    pub strike_price: f64,
    /// Bid price
    pub bid: f64,
    /// Ask price
    pub ask: f64,
    /// Expiration timestamp (RFC 3339)
    pub expiration_date: Option<DateTime<Utc>>,
    /// Position, `long` or `short` in any case
    pub long_short: String,
}

impl RawContract {
    /// Creates a raw record from its field values.
    pub fn new(
        option_type: impl Into<String>,
        strike_price: f64,
        bid: f64,
        ask: f64,
        long_short: impl Into<String>,
        expiration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            option_type: option_type.into(),
            strike_price,
            bid,
            ask,
            expiration_date: Some(expiration_date),
            long_short: long_short.into(),
        }
    }

    /// Validates the record against the current wall-clock time.
    pub fn validate(&self) -> Result<OptionContract, ContractError> {
        self.validate_at(Utc::now())
    }

    /// Validates the record against a reference instant.
    ///
    /// Rules run in a fixed order and the first failure is returned:
    /// option type, strike > 0, bid > 0, ask > 0, ask >= bid, position,
    /// expiration strictly after `now`. NaN prices fail their positivity
    /// check.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use payoff_core::contract::RawContract;
    /// use payoff_core::types::ContractError;
    ///
    /// let now = Utc::now();
    /// let raw = RawContract::new("Call", 100.0, 10.05, 12.04, "long", now);
    ///
    /// // Expiring exactly now is not in the future
    /// assert!(matches!(
    ///     raw.validate_at(now),
    ///     Err(ContractError::InvalidExpirationDate { .. })
    /// ));
    /// assert!(raw.validate_at(now - Duration::seconds(1)).is_ok());
    /// ```
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<OptionContract, ContractError> {
        let option_type: OptionType = self.option_type.parse()?;

        if !(self.strike_price > 0.0) {
            return Err(ContractError::InvalidStrikePrice {
                strike: self.strike_price,
            });
        }

        if !(self.bid > 0.0) {
            return Err(ContractError::InvalidBidPrice { bid: self.bid });
        }

        if !(self.ask > 0.0) {
            return Err(ContractError::InvalidAskPrice { ask: self.ask });
        }

        if self.ask < self.bid {
            return Err(ContractError::AskBidMismatch {
                bid: self.bid,
                ask: self.ask,
            });
        }

        let position: Position = self.long_short.parse()?;

        let expiration = match self.expiration_date {
            Some(expiration) if expiration > now => expiration,
            other => {
                return Err(ContractError::InvalidExpirationDate { expiration: other });
            }
        };

        Ok(OptionContract {
            option_type,
            position,
            strike: self.strike_price,
            bid: self.bid,
            ask: self.ask,
            expiration,
        })
    }
}

impl TryFrom<&RawContract> for OptionContract {
    type Error = ContractError;

    fn try_from(raw: &RawContract) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// Validated European option leg.
///
/// Fields are private: the only way to obtain one is through
/// [`RawContract::validate`], and it is never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionContract {
    option_type: OptionType,
    position: Position,
    strike: f64,
    bid: f64,
    ask: f64,
    expiration: DateTime<Utc>,
}

impl OptionContract {
    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the bid price.
    #[inline]
    pub fn bid(&self) -> f64 {
        self.bid
    }

    /// Returns the ask price.
    #[inline]
    pub fn ask(&self) -> f64 {
        self.ask
    }

    /// Returns the expiration timestamp.
    #[inline]
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Underlying price at expiry where this leg neither gains nor loses.
    ///
    /// | position | type | break-even      |
    /// |----------|------|-----------------|
    /// | long     | call | strike + ask    |
    /// | short    | call | strike + bid    |
    /// | long     | put  | strike − ask    |
    /// | short    | put  | strike − bid    |
    ///
    /// Truncated to two decimals. A put whose premium exceeds its strike
    /// yields a negative value.
    pub fn break_even_point(&self) -> f64 {
        let raw = match (self.position, self.option_type) {
            (Position::Long, OptionType::Call) => self.strike + self.ask,
            (Position::Short, OptionType::Call) => self.strike + self.bid,
            (Position::Long, OptionType::Put) => self.strike - self.ask,
            (Position::Short, OptionType::Put) => self.strike - self.bid,
        };
        truncate_cents(raw)
    }

    /// Profit or loss per unit at expiry for the given underlying price.
    ///
    /// Long legs pay the ask, short legs collect the bid.
    ///
    /// | position | type | profit / loss                    |
    /// |----------|------|----------------------------------|
    /// | long     | call | max(0, price − strike) − ask     |
    /// | short    | call | bid − max(0, price − strike)     |
    /// | long     | put  | max(strike − price, 0) − ask     |
    /// | short    | put  | bid − max(0, strike − price)     |
    ///
    /// Truncated to two decimals.
    pub fn profit_or_loss(&self, price: f64) -> f64 {
        let raw = match (self.position, self.option_type) {
            (Position::Long, OptionType::Call) => (price - self.strike).max(0.0) - self.ask,
            (Position::Short, OptionType::Call) => self.bid - (price - self.strike).max(0.0),
            (Position::Long, OptionType::Put) => (self.strike - price).max(0.0) - self.ask,
            (Position::Short, OptionType::Put) => self.bid - (self.strike - price).max(0.0),
        };
        truncate_cents(raw)
    }
}
