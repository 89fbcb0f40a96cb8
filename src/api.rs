//! Wire contract between the reconciliation core and its transport layer
//!
//! The transport (an HTTP endpoint or a queue consumer) hands the raw
//! request body to [`handle_validation`] and writes back the status and body
//! of the returned [`ValidationResponse`]. Arrays are passed to the engine
//! exactly as received.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reconciliation::ReconciliationEngine;
use crate::types::*;

/// Top-level message of a failed validation response
pub const VALIDATION_FAILED: &str = "Validation failed";

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Body of a validation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub movements: Vec<Movement>,
    pub balances: Vec<Balance>,
}

impl ValidationRequest {
    pub fn new(movements: Vec<Movement>, balances: Vec<Balance>) -> Self {
        Self {
            movements,
            balances,
        }
    }

    /// Decode a request body
    pub fn from_json(body: &str) -> ReconciliationResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Result of a validation request as seen by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResponse {
    /// The statement reconciles: status 200, body `true`
    Valid,
    /// Status 400 with the errors as structured cause
    Invalid(Vec<ValidationError>),
}

impl ValidationResponse {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            ValidationResponse::Valid
        } else {
            ValidationResponse::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResponse::Valid)
    }

    pub fn status(&self) -> u16 {
        match self {
            ValidationResponse::Valid => STATUS_OK,
            ValidationResponse::Invalid(_) => STATUS_BAD_REQUEST,
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationResponse::Valid => &[],
            ValidationResponse::Invalid(errors) => errors.as_slice(),
        }
    }

    /// JSON body: `true`, or `{"message": "Validation failed", "cause": [...]}`
    pub fn body(&self) -> ReconciliationResult<Value> {
        match self {
            ValidationResponse::Valid => Ok(Value::Bool(true)),
            ValidationResponse::Invalid(errors) => {
                let cause = serde_json::to_value(errors)
                    .map_err(|err| ReconciliationError::Encode(err.to_string()))?;
                Ok(serde_json::json!({
                    "message": VALIDATION_FAILED,
                    "cause": cause,
                }))
            }
        }
    }
}

/// Decode a request body, run the engine and map its result to a response
pub fn handle_validation(
    engine: &ReconciliationEngine,
    body: &str,
) -> ReconciliationResult<ValidationResponse> {
    let request = ValidationRequest::from_json(body)?;
    let errors = engine.validate(&request.movements, &request.balances);
    Ok(ValidationResponse::from_errors(errors))
}
