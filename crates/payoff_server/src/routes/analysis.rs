//! Strategy analysis endpoint
//!
//! `POST /analyze` takes a JSON array of exactly four option legs and returns
//! the payoff curve, maximum profit, maximum loss and break-even points.
//!
//! Every client-side failure is a 400 Bad Request with an [`ErrorResponse`]
//! body, except a body over the configured limit, which stays 413.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use payoff_core::analysis::{analyze, validate_legs, AnalysisResult, LEG_COUNT};
use payoff_core::contract::RawContract;
use payoff_core::types::{ContractError, InputError};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier ("InvalidRequest", "InvalidLegCount", "ValidationError")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Wire field that failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Malformed request body.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            error: "InvalidRequest".to_string(),
            message: message.into(),
            field: None,
        }
    }

    /// Build the response for a strategy ingestion failure.
    pub fn from_input_error(err: &InputError) -> Self {
        match err {
            InputError::InvalidLegCount { .. } => Self {
                error: "InvalidLegCount".to_string(),
                message: err.to_string(),
                field: None,
            },
            InputError::Contract(contract_err) => Self {
                error: "ValidationError".to_string(),
                message: contract_err.to_string(),
                field: Some(wire_field(contract_err).to_string()),
            },
        }
    }
}

/// Wire name of the field a validation rule inspects.
fn wire_field(err: &ContractError) -> &'static str {
    match err {
        ContractError::InvalidOptionsType(_) => "type",
        ContractError::InvalidStrikePrice { .. } => "strike_price",
        ContractError::InvalidBidPrice { .. } => "bid",
        ContractError::InvalidAskPrice { .. } | ContractError::AskBidMismatch { .. } => "ask",
        ContractError::InvalidPosition(_) => "long_short",
        ContractError::InvalidExpirationDate { .. } => "expiration_date",
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Build the analysis routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze_handler))
}

/// POST /analyze - Four-leg strategy payoff analysis
async fn analyze_handler(
    payload: Result<Json<Vec<RawContract>>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(legs) = payload.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Rejected malformed analysis request");
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorResponse::invalid_request(rejection.body_text())),
        )
    })?;

    let contracts = validate_legs(&legs).map_err(|err| {
        tracing::warn!(legs = legs.len(), error = %err, "Rejected analysis request");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::from_input_error(&err)),
        )
    })?;

    let result = analyze(&contracts);
    tracing::debug!(
        legs = LEG_COUNT,
        points = result.xy_values.len(),
        max_profit = result.max_profit,
        max_loss = result.max_loss,
        "Analysed strategy"
    );

    Ok(Json(result))
}
