//! # Reconciliation Core
//!
//! Reconciles dated bank movements against dated balance checkpoints,
//! checking that the movements between each pair of checkpoints explain the
//! balance change between them exactly.
//!
//! ## Features
//!
//! - **Duplicate detection**: repeated movement ids stop a run with a single error
//! - **Period grouping**: movements are split into half-open periods between consecutive balances
//! - **Exact balance checks**: decimal amounts, no rounding tolerance
//! - **Diagnostic hints**: movements whose amount equals a period difference are named
//! - **Wire contract**: request decoding and status/body mapping for a transport layer
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//! use reconciliation_core::{Balance, Movement, ReconciliationEngine};
//!
//! let date = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
//! let movements = vec![
//!     Movement::new(1, date(2), "Salary", BigDecimal::from(100)),
//!     Movement::new(2, date(4), "Groceries", BigDecimal::from(-50)),
//! ];
//! let balances = vec![
//!     Balance::new(date(1), BigDecimal::from(0)),
//!     Balance::new(date(3), BigDecimal::from(100)),
//!     Balance::new(date(5), BigDecimal::from(50)),
//! ];
//!
//! let errors = ReconciliationEngine::new().validate(&movements, &balances);
//! assert!(errors.is_empty());
//! ```

pub mod api;
pub mod config;
pub mod reconciliation;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use api::{handle_validation, ValidationRequest, ValidationResponse};
pub use config::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
