//! Error types for contract ingestion.
//!
//! This module provides:
//! - `ContractError`: the first failed validation rule of a single leg
//! - `InputError`: strategy-level ingestion failures (leg count, invalid leg)

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation failure for a single option leg.
///
/// Rules are checked in declaration order and only the first failure is
/// reported.
///
/// # Variants
/// - `InvalidOptionsType`: type is neither call nor put
/// - `InvalidStrikePrice`: strike is not positive
/// - `InvalidBidPrice`: bid is not positive
/// - `InvalidAskPrice`: ask is not positive
/// - `AskBidMismatch`: ask is below bid
/// - `InvalidPosition`: position is neither long nor short
/// - `InvalidExpirationDate`: expiration is missing or not strictly in the future
///
/// # Examples
/// ```
/// use payoff_core::types::ContractError;
///
/// let err = ContractError::InvalidStrikePrice { strike: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid strike price: -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    /// Option type is not recognised.
    #[error("Invalid option type: '{0}'")]
    InvalidOptionsType(String),

    /// Strike price is not positive.
    #[error("Invalid strike price: {strike}")]
    InvalidStrikePrice {
        /// The rejected strike
        strike: f64,
    },

    /// Bid price is not positive.
    #[error("Invalid bid price: {bid}")]
    InvalidBidPrice {
        /// The rejected bid
        bid: f64,
    },

    /// Ask price is not positive.
    #[error("Invalid ask price: {ask}")]
    InvalidAskPrice {
        /// The rejected ask
        ask: f64,
    },

    /// Ask price is below the bid price.
    #[error("Ask price must be greater than or equal to bid price: bid = {bid}, ask = {ask}")]
    AskBidMismatch {
        /// Bid price
        bid: f64,
        /// Ask price
        ask: f64,
    },

    /// Position is not recognised.
    #[error("Invalid position: '{0}'")]
    InvalidPosition(String),

    /// Expiration date is missing or not in the future.
    #[error("Invalid expiration date: must be strictly in the future")]
    InvalidExpirationDate {
        /// The rejected expiration, if one was supplied
        expiration: Option<DateTime<Utc>>,
    },
}

/// Strategy ingestion errors.
///
/// Wraps nothing but the leg-count rule: a failing leg's [`ContractError`]
/// is surfaced unchanged.
///
/// # Examples
/// ```
/// use payoff_core::types::InputError;
///
/// let err = InputError::InvalidLegCount { expected: 4, got: 3 };
/// assert!(format!("{}", err).contains("got 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Wrong number of legs supplied.
    #[error("Expected exactly {expected} contracts, got {got}")]
    InvalidLegCount {
        /// Required leg count
        expected: usize,
        /// Supplied leg count
        got: usize,
    },

    /// A leg failed validation.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_options_type_display() {
        let err = ContractError::InvalidOptionsType("xxx".to_string());
        assert_eq!(format!("{}", err), "Invalid option type: 'xxx'");
    }

    #[test]
    fn test_price_errors_display() {
        assert_eq!(
            format!("{}", ContractError::InvalidBidPrice { bid: 0.0 }),
            "Invalid bid price: 0"
        );
        assert_eq!(
            format!("{}", ContractError::InvalidAskPrice { ask: -2.5 }),
            "Invalid ask price: -2.5"
        );
        assert!(format!(
            "{}",
            ContractError::AskBidMismatch {
                bid: 12.4,
                ask: 10.0
            }
        )
        .contains("bid = 12.4, ask = 10"));
    }

    #[test]
    fn test_contract_error_passes_through_input_error() {
        let inner = ContractError::InvalidPosition("flat".to_string());
        let outer: InputError = inner.clone().into();

        assert_eq!(outer.to_string(), inner.to_string());
        assert_eq!(outer, InputError::Contract(inner));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ContractError::InvalidExpirationDate { expiration: None };
        let _: &dyn std::error::Error = &err;

        let err = InputError::InvalidLegCount {
            expected: 4,
            got: 5,
        };
        let _: &dyn std::error::Error = &err;
    }
}
