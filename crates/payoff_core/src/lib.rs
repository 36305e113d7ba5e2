//! # payoff_core: Payoff Engine for Four-Leg Option Strategies
//!
//! Computes the expiry profit/loss profile of a four-leg options combination
//! (iron condors, butterflies, spreads) and reduces it to summary risk
//! metrics.
//!
//! ## Layout
//!
//! - `types`: option type, position and error enums
//! - `contract`: unvalidated wire records, validated contracts and the
//!   two-decimal truncation policy
//! - `engine`: the shared X-sampling strategy and per-leg curves
//! - `analysis`: leg-count validation and the portfolio aggregator
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use payoff_core::analysis::{analyze, validate_legs};
//! use payoff_core::contract::RawContract;
//!
//! let expiry = Utc::now() + Duration::days(30);
//! let legs = vec![
//!     RawContract::new("put", 90.0, 1.0, 1.2, "long", expiry),
//!     RawContract::new("put", 95.0, 2.0, 2.1, "short", expiry),
//!     RawContract::new("call", 105.0, 2.0, 2.1, "short", expiry),
//!     RawContract::new("call", 110.0, 1.0, 1.2, "long", expiry),
//! ];
//!
//! let contracts = validate_legs(&legs).unwrap();
//! let result = analyze(&contracts);
//! assert_eq!(result.break_even_points.len(), 4);
//! assert!(result.max_profit >= 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analysis;
pub mod contract;
pub mod engine;
pub mod types;
