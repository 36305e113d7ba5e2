//! Option type and position enums.
//!
//! Wire values arrive as free-form strings. Each enum owns a single
//! case-insensitive [`FromStr`] implementation; nothing else in the crate
//! compares raw strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ContractError;

/// Right conferred by the option.
///
/// # Examples
/// ```
/// use payoff_core::types::OptionType;
///
/// assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert_eq!("Put".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy the underlying at the strike
    Call,
    /// Right to sell the underlying at the strike
    Put,
}

impl OptionType {
    /// Intrinsic value at expiry for the given underlying price.
    #[inline]
    pub fn intrinsic(&self, price: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (price - strike).max(0.0),
            OptionType::Put => (strike - price).max(0.0),
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(ContractError::InvalidOptionsType(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the contract: holder or writer.
///
/// # Examples
/// ```
/// use payoff_core::types::Position;
///
/// assert_eq!("long".parse::<Position>().unwrap(), Position::Long);
/// assert_eq!("SHORT".parse::<Position>().unwrap(), Position::Short);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Bought the option and paid the ask
    Long,
    /// Wrote the option and collected the bid
    Short,
}

impl Position {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Long => "long",
            Position::Short => "short",
        }
    }
}

impl FromStr for Position {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Position::Long),
            "short" => Ok(Position::Short),
            _ => Err(ContractError::InvalidPosition(s.to_string())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_parsing_is_case_insensitive() {
        for s in ["call", "Call", "CALL", "cAlL"] {
            assert_eq!(OptionType::from_str(s).unwrap(), OptionType::Call);
        }
        for s in ["put", "Put", "PUT"] {
            assert_eq!(OptionType::from_str(s).unwrap(), OptionType::Put);
        }
    }

    #[test]
    fn test_option_type_rejects_unknown() {
        assert_eq!(
            OptionType::from_str("xxx"),
            Err(ContractError::InvalidOptionsType("xxx".to_string()))
        );
        assert!(OptionType::from_str("").is_err());
        assert!(OptionType::from_str(" call").is_err());
    }

    #[test]
    fn test_position_parsing_is_case_insensitive() {
        assert_eq!(Position::from_str("Long").unwrap(), Position::Long);
        assert_eq!(Position::from_str("LONG").unwrap(), Position::Long);
        assert_eq!(Position::from_str("short").unwrap(), Position::Short);
        assert_eq!(Position::from_str("Short").unwrap(), Position::Short);
    }

    #[test]
    fn test_position_rejects_unknown() {
        assert_eq!(
            Position::from_str("flat"),
            Err(ContractError::InvalidPosition("flat".to_string()))
        );
    }

    #[test]
    fn test_intrinsic_values() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(format!("{}", OptionType::Call), "call");
        assert_eq!(format!("{}", OptionType::Put), "put");
        assert_eq!(format!("{}", Position::Long), "long");
        assert_eq!(format!("{}", Position::Short), "short");
    }
}
