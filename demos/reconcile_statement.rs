//! Reconciling a monthly bank statement

use chrono::NaiveDate;
use reconciliation_core::{
    handle_validation, Balance, Movement, ReconciliationEngine, ValidationRequest,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🏦 Reconciliation Core - Statement Example\n");

    let engine = ReconciliationEngine::new();
    let date = |day| NaiveDate::from_ymd_opt(2025, 3, day).ok_or("invalid date");

    // 1. Statement with weekly balance checkpoints
    let balances = vec![
        Balance::new(date(1)?, "1500.00".parse()?),
        Balance::new(date(8)?, "1320.50".parse()?),
        Balance::new(date(15)?, "3320.50".parse()?),
    ];

    let mut movements = vec![
        Movement::new(101, date(2)?, "Groceries", "-79.50".parse()?),
        Movement::new(102, date(5)?, "Electricity", "-100.00".parse()?),
        Movement::new(103, date(9)?, "Salary", "2100.00".parse()?),
        Movement::new(104, date(12)?, "Gym membership", "-100.00".parse()?),
        // After the last checkpoint: not reconciled
        Movement::new(105, date(20)?, "Rent", "-900.00".parse()?),
    ];

    println!("📊 Reconciling {} movements...", movements.len());
    let report = engine.reconcile(&movements, &balances);
    println!("  {}", report.summary());
    for period in &report.periods {
        println!(
            "  • {}: {} movements, total {}, expected {}",
            period.period, period.movement_count, period.total, period.expected
        );
    }
    println!();

    // 2. An import that lost the gym payment no longer reconciles
    println!("🔍 Reconciling an import missing one withdrawal...");
    movements.retain(|movement| movement.id != 104);

    let errors = engine.validate(&movements, &balances);
    for error in &errors {
        println!("  ✗ {}", error);
        if let Some(details) = error.details().filter(|details| !details.is_empty()) {
            println!("    {}", details);
        }
    }
    println!();

    // 3. Same statement through the wire contract
    println!("📨 Sending the statement as a JSON request...");
    let body = serde_json::to_string(&ValidationRequest::new(movements, balances))?;
    let response = handle_validation(&engine, &body)?;
    println!("  Status: {}", response.status());
    println!("  Body: {}", serde_json::to_string_pretty(&response.body()?)?);

    Ok(())
}
