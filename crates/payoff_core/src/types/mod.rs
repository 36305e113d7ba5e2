//! Contract vocabulary and error types.
//!
//! This module provides:
//! - `option`: `OptionType` and `Position` closed enums with case-insensitive parsing
//! - `error`: `ContractError` and `InputError` for ingestion failures
//!
//! # Re-exports
//!
//! - [`OptionType`], [`Position`] from `option`
//! - [`ContractError`], [`InputError`] from `error`

pub mod error;
pub mod option;

pub use error::{ContractError, InputError};
pub use option::{OptionType, Position};
