//! Integration tests for reconciliation-core

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{
    handle_validation, Balance, DefaultGroupValidator, DifferenceKind, GroupValidator, Movement,
    MovementGroup, MovementId, Period, ReconciliationConfig, ReconciliationEngine,
    ReconciliationError, ValidationError, ValidationErrorMessage, ValidationErrorType,
};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

fn movement(id: MovementId, date: NaiveDate, amount: i64) -> Movement {
    let label = if amount < 0 { "Withdrawal" } else { "Deposit" };
    Movement::new(id, date, label, BigDecimal::from(amount))
}

fn balance(date: NaiveDate, amount: i64) -> Balance {
    Balance::new(date, BigDecimal::from(amount))
}

fn statement_balances() -> Vec<Balance> {
    vec![
        balance(date(1), 0),
        balance(date(3), 100),
        balance(date(5), 50),
    ]
}

#[test]
fn test_statement_reconciles() {
    init_tracing();
    let movements = vec![movement(1, date(2), 100), movement(2, date(4), -50)];

    let errors = ReconciliationEngine::new().validate(&movements, &statement_balances());

    assert!(errors.is_empty());
}

#[test]
fn test_missing_withdrawal_detected() {
    init_tracing();
    let movements = vec![movement(1, date(2), 100)];

    let errors = ReconciliationEngine::new().validate(&movements, &statement_balances());

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type(), ValidationErrorType::Difference);
    assert_eq!(errors[0].message(), ValidationErrorMessage::WithdrawalDifference);
    assert_eq!(errors[0].period(), Some(Period::new(date(3), date(5))));
    assert_eq!(errors[0].difference(), Some(&BigDecimal::from(50)));
}

#[test]
fn test_missing_deposit_detected() {
    init_tracing();
    let movements = vec![movement(1, date(4), -50)];

    let errors = ReconciliationEngine::new().validate(&movements, &statement_balances());

    assert_eq!(
        errors,
        vec![ValidationError::Difference {
            kind: DifferenceKind::Deposit,
            period: Period::new(date(1), date(3)),
            difference: BigDecimal::from(-100),
            details: Some(String::new()),
        }]
    );
}

#[test]
fn test_duplicate_is_the_only_error() {
    init_tracing();
    let movements = vec![
        movement(1, date(2), 100),
        movement(1, date(2), 100),
        movement(3, date(4), -50),
    ];

    let errors = ReconciliationEngine::new().validate(&movements, &statement_balances());

    assert_eq!(
        errors,
        vec![ValidationError::Duplicate {
            details: "1".to_string()
        }]
    );
}

#[test]
fn test_single_balance_is_missing_balances() {
    init_tracing();
    let movements = vec![movement(1, date(2), 100), movement(2, date(4), -50)];

    let errors = ReconciliationEngine::new().validate(&movements, &[balance(date(1), 0)]);

    assert_eq!(errors, vec![ValidationError::BalancesMissing]);
}

#[test]
fn test_out_of_range_movements_ignored() {
    init_tracing();
    let engine = ReconciliationEngine::new();
    let before = vec![
        movement(1, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 100),
        movement(2, date(2), 100),
        movement(3, date(4), -50),
    ];
    let after = vec![
        movement(1, date(2), 100),
        movement(2, date(4), -50),
        movement(3, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), -50),
    ];

    assert!(engine.validate(&before, &statement_balances()).is_empty());
    assert!(engine.validate(&after, &statement_balances()).is_empty());
}

#[test]
fn test_unordered_input_reconciles() {
    init_tracing();
    let movements = vec![movement(2, date(4), -50), movement(1, date(2), 100)];
    let balances = vec![
        balance(date(3), 100),
        balance(date(5), 50),
        balance(date(1), 0),
    ];

    assert!(ReconciliationEngine::new()
        .validate(&movements, &balances)
        .is_empty());
}

#[test]
fn test_caller_input_not_modified() {
    init_tracing();
    let movements = vec![
        movement(3, date(9), 1),
        movement(2, date(4), -50),
        movement(1, date(2), 100),
    ];
    let balances = vec![balance(date(5), 50), balance(date(1), 0)];
    let (movements_before, balances_before) = (movements.clone(), balances.clone());

    let _ = ReconciliationEngine::new().reconcile(&movements, &balances);

    assert_eq!(movements, movements_before);
    assert_eq!(balances, balances_before);
}

#[test]
fn test_hint_without_matching_movement() {
    let movements = vec![
        movement(1, date(1), 20),
        movement(2, date(2), 20),
        movement(3, date(3), 30),
        movement(4, date(6), 40),
    ];
    let (start, end) = (balance(date(1), 0), balance(date(7), 71));

    let error = DefaultGroupValidator::new()
        .validate_group(&MovementGroup::new(&movements, &start, &end))
        .unwrap();

    assert_eq!(error.difference(), Some(&BigDecimal::from(39)));
    assert_eq!(error.details(), Some(""));
}

#[test]
fn test_hint_names_matching_movement() {
    let movements = vec![
        movement(1, date(1), 20),
        movement(2, date(2), 20),
        movement(3, date(3), 30),
        movement(4, date(6), 40),
    ];
    let (start, end) = (balance(date(1), 0), balance(date(7), 70));

    let error = DefaultGroupValidator::new()
        .validate_group(&MovementGroup::new(&movements, &start, &end))
        .unwrap();

    assert_eq!(error.difference(), Some(&BigDecimal::from(40)));
    assert!(error.details().unwrap().ends_with('4'));
}

#[test]
fn test_hint_order_follows_date_then_input_order() {
    init_tracing();
    // Both -30 movements share a date; the hint keeps their input order
    let movements = vec![
        movement(9, date(2), -30),
        movement(5, date(2), -30),
        movement(1, date(1), 10),
    ];
    let balances = vec![balance(date(1), 0), balance(date(3), 0)];

    let errors = ReconciliationEngine::new().validate(&movements, &balances);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].difference(), Some(&BigDecimal::from(-50)));

    let balances = vec![balance(date(1), 0), balance(date(3), -20)];
    let errors = ReconciliationEngine::new().validate(&movements, &balances);
    assert_eq!(
        errors[0].details(),
        Some("The following movements match the difference: 9, 5")
    );
}

#[test]
fn test_boundary_movements() {
    init_tracing();
    let engine = ReconciliationEngine::new();
    // On the first checkpoint: counted in the first period
    // On the inner checkpoint: counted in the second period
    // On the last checkpoint: ignored
    let movements = vec![
        movement(1, date(1), 10),
        movement(2, date(3), 5),
        movement(3, date(5), 1000),
    ];
    let balances = vec![balance(date(1), 0), balance(date(3), 10), balance(date(5), 15)];

    let report = engine.reconcile(&movements, &balances);

    assert!(report.is_reconciled(), "{}", report.summary());
    assert_eq!(report.periods[0].movement_count, 1);
    assert_eq!(report.periods[1].movement_count, 1);
    assert_eq!(report.discarded, 1);
}

#[test]
fn test_decimal_amounts_are_exact() {
    init_tracing();
    let movements = vec![
        Movement::new(1, date(2), "Coffee", "-3.10".parse().unwrap()),
        Movement::new(2, date(2), "Refund", "0.20".parse().unwrap()),
        Movement::new(3, date(2), "Interest", "0.10".parse().unwrap()),
    ];
    let balances = vec![
        Balance::new(date(1), "100.00".parse().unwrap()),
        Balance::new(date(3), "97.2".parse().unwrap()),
    ];

    assert!(ReconciliationEngine::new()
        .validate(&movements, &balances)
        .is_empty());
}

#[test]
fn test_wire_contract_success() {
    init_tracing();
    let body = json!({
        "movements": [
            { "id": 1, "date": "2025-01-02", "label": "Deposit", "amount": 100 },
            { "id": 2, "date": "2025-01-04", "label": "Withdrawal", "amount": -50 }
        ],
        "balances": [
            { "date": "2025-01-01", "balance": 0 },
            { "date": "2025-01-03", "balance": 100 },
            { "date": "2025-01-05", "balance": 50 }
        ]
    })
    .to_string();

    let response = handle_validation(&ReconciliationEngine::new(), &body).unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body().unwrap(), json!(true));
}

#[test]
fn test_wire_contract_failure() {
    init_tracing();
    let body = json!({
        "movements": [
            { "id": 1, "date": "2025-01-02", "label": "Deposit", "amount": 100 }
        ],
        "balances": [
            { "date": "2025-01-01", "balance": 0 },
            { "date": "2025-01-03", "balance": 100 },
            { "date": "2025-01-05", "balance": 50 }
        ]
    })
    .to_string();

    let response = handle_validation(&ReconciliationEngine::new(), &body).unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(
        response.body().unwrap(),
        json!({
            "message": "Validation failed",
            "cause": [{
                "type": "Difference",
                "message": "At least one withdrawal is missing",
                "details": "",
                "period": { "start": "2025-01-03", "end": "2025-01-05" },
                "difference": 50
            }]
        })
    );
}

#[test]
fn test_wire_contract_decimal_amounts() {
    init_tracing();
    let body = r#"{
        "movements": [
            { "id": 1, "date": "2025-01-02", "label": "Cashback", "amount": 0.1 },
            { "id": 2, "date": "2025-01-02", "label": "Cashback", "amount": 0.2 },
            { "id": 3, "date": "2025-01-04", "label": "Fee", "amount": -0.7 }
        ],
        "balances": [
            { "date": "2025-01-01", "balance": 0 },
            { "date": "2025-01-03", "balance": 0.3 },
            { "date": "2025-01-05", "balance": -0.3 }
        ]
    }"#;

    let response = handle_validation(&ReconciliationEngine::new(), body).unwrap();

    assert_eq!(response.status(), 400);
    let errors = response.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].period(), Some(Period::new(date(3), date(5))));
    assert_eq!(errors[0].difference(), Some(&"-0.1".parse::<BigDecimal>().unwrap()));
    let text = serde_json::to_string(&response.body().unwrap()).unwrap();
    assert!(text.contains(r#""difference":-0.1"#), "{text}");
}

#[test]
fn test_wire_contract_date_times() {
    init_tracing();
    let body = json!({
        "movements": [
            { "id": 1, "date": "2025-01-02T10:15:00.000Z", "label": "Deposit", "amount": 100 },
            { "id": 2, "date": "2025-01-04T08:00:00.000Z", "label": "Withdrawal", "amount": -50 }
        ],
        "balances": [
            { "date": "2025-01-01T00:00:00.000Z", "balance": 0 },
            { "date": "2025-01-03", "balance": 100 },
            { "date": "2025-01-05T00:00:00+00:00", "balance": 50 }
        ]
    })
    .to_string();

    let response = handle_validation(&ReconciliationEngine::new(), &body).unwrap();

    assert_eq!(response.status(), 200);
}

#[test]
fn test_wire_contract_long_labels_pass_through() {
    init_tracing();
    let body = json!({
        "movements": [
            { "id": 1, "date": "2025-01-02", "label": "x".repeat(5000), "amount": 100 }
        ],
        "balances": [
            { "date": "2025-01-01", "balance": 0 },
            { "date": "2025-01-03", "balance": 100 }
        ]
    })
    .to_string();

    let response = handle_validation(&ReconciliationEngine::new(), &body).unwrap();

    assert!(response.is_valid());
}

#[test]
fn test_wire_contract_duplicate() {
    init_tracing();
    let body = json!({
        "movements": [
            { "id": 3, "date": "2025-01-05", "label": "Deposit", "amount": 100 },
            { "id": 1, "date": "2025-01-01", "label": "Deposit", "amount": 100 },
            { "id": 2, "date": "2025-01-02", "label": "Deposit", "amount": 100 },
            { "id": 1, "date": "2025-01-03", "label": "Deposit", "amount": 100 },
            { "id": 3, "date": "2025-01-04", "label": "Deposit", "amount": 100 }
        ],
        "balances": [
            { "date": "2025-01-01", "balance": 0 },
            { "date": "2025-01-06", "balance": 0 }
        ]
    })
    .to_string();

    let response = handle_validation(&ReconciliationEngine::new(), &body).unwrap();

    assert_eq!(
        response.body().unwrap()["cause"],
        json!([{ "type": "Duplicate", "message": "A duplicate is found", "details": "1, 3" }])
    );
}

#[test]
fn test_wire_contract_malformed_body() {
    let result = handle_validation(&ReconciliationEngine::new(), r#"{ "movements": "nope" }"#);
    assert!(matches!(result, Err(ReconciliationError::Decode(_))));

    let result = handle_validation(
        &ReconciliationEngine::new(),
        r#"{ "movements": [{ "id": 1, "date": "not a date", "label": "x", "amount": 1 }], "balances": [] }"#,
    );
    assert!(matches!(result, Err(ReconciliationError::Decode(_))));
}

#[test]
fn test_engine_from_json_config() {
    init_tracing();
    let config = ReconciliationConfig::from_json(r#"{ "match_hints": false }"#).unwrap();
    let engine = ReconciliationEngine::with_config(config);
    assert!(!engine.config().match_hints);
    let movements = vec![movement(1, date(2), 100), movement(2, date(4), 50)];

    let errors = engine.validate(&movements, &statement_balances());

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].details(), None);
    assert_eq!(errors[0].difference(), Some(&BigDecimal::from(100)));
}

#[test]
fn test_engine_shared_across_threads() {
    init_tracing();
    let engine = std::sync::Arc::new(ReconciliationEngine::new());

    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                let movements = vec![movement(1, date(2), 100 + offset), movement(2, date(4), -50)];
                engine.validate(&movements, &statement_balances()).len()
            })
        })
        .collect();

    let failures: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(failures, vec![0, 1, 1, 1]);
}
