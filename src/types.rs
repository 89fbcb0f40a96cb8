//! Core types and data structures for statement reconciliation

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a bank movement
pub type MovementId = i64;

/// Instant a movement or checkpoint is dated at, in UTC
///
/// Accepts a bare calendar date (`2025-01-02`, read as midnight), an
/// RFC 3339 date-time with an offset (`2025-01-02T00:00:00.000Z`), or a
/// date-time without one. Only ordering matters; the full instant is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatementDate(NaiveDateTime);

impl StatementDate {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl From<NaiveDate> for StatementDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for StatementDate {
    fn from(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for StatementDate {
    fn from(instant: DateTime<Tz>) -> Self {
        Self(instant.naive_utc())
    }
}

impl PartialEq<NaiveDate> for StatementDate {
    fn eq(&self, other: &NaiveDate) -> bool {
        *self == StatementDate::from(*other)
    }
}

impl FromStr for StatementDate {
    type Err = ReconciliationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(date.into());
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Ok(instant.into());
        }
        text.parse::<NaiveDateTime>()
            .map(Self)
            .map_err(|_| ReconciliationError::Decode(format!("invalid date: {text}")))
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.time() == NaiveTime::MIN {
            write!(f, "{}", self.0.date())
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
        }
    }
}

impl Serialize for StatementDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatementDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Amounts as exact JSON numbers
///
/// Decoding reads the number's decimal text, never an `f64`, so `0.1` is
/// exactly one tenth. Decimal strings are accepted too. Encoding writes an
/// integer when the value fits one, otherwise the full decimal text.
pub(crate) mod wire_decimal {
    use bigdecimal::{BigDecimal, ToPrimitive};
    use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Number, Value};

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_integer() {
            if let Some(integer) = value.to_i64() {
                return serializer.serialize_i64(integer);
            }
        }
        let number: Number = value.to_string().parse().map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        let text = match Value::deserialize(deserializer)? {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.trim().to_string(),
            other => {
                return Err(de::Error::custom(format!(
                    "invalid amount: expected a number, found {other}"
                )))
            }
        };
        text.parse()
            .map_err(|_| de::Error::custom(format!("invalid amount: {text}")))
    }
}

/// A single dated bank movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Identifier, expected to be unique within one reconciliation run
    pub id: MovementId,
    /// When the movement was booked
    pub date: StatementDate,
    /// Free-text label as printed on the statement
    pub label: String,
    /// Signed amount: positive for deposits, negative for withdrawals
    #[serde(with = "wire_decimal")]
    pub amount: BigDecimal,
}

impl Movement {
    /// Create a new movement
    pub fn new(
        id: MovementId,
        date: impl Into<StatementDate>,
        label: impl Into<String>,
        amount: BigDecimal,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            label: label.into(),
            amount,
        }
    }
}

/// Account balance checkpoint at a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// When the balance was read
    pub date: StatementDate,
    /// Actual account balance at that instant
    #[serde(with = "wire_decimal")]
    pub balance: BigDecimal,
}

impl Balance {
    /// Create a new balance checkpoint
    pub fn new(date: impl Into<StatementDate>, balance: BigDecimal) -> Self {
        Self {
            date: date.into(),
            balance,
        }
    }
}

/// Half-open date interval `[start, end)` between two consecutive balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    pub start: StatementDate,
    pub end: StatementDate,
}

impl Period {
    pub fn new(start: impl Into<StatementDate>, end: impl Into<StatementDate>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether a date falls inside the period (start inclusive, end exclusive)
    pub fn contains(&self, date: impl Into<StatementDate>) -> bool {
        let date = date.into();
        self.start <= date && date < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Movements of one period together with the balances bounding it
///
/// Groups borrow from the sequenced movements; they never copy or own them.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementGroup<'a> {
    pub movements: &'a [Movement],
    pub start: &'a Balance,
    pub end: &'a Balance,
}

impl<'a> MovementGroup<'a> {
    pub fn new(movements: &'a [Movement], start: &'a Balance, end: &'a Balance) -> Self {
        Self {
            movements,
            start,
            end,
        }
    }

    /// Period covered by this group
    pub fn period(&self) -> Period {
        Period::new(self.start.date, self.end.date)
    }

    /// Sum of all movement amounts in the group
    pub fn total(&self) -> BigDecimal {
        self.movements.iter().map(|m| &m.amount).sum()
    }

    /// Balance change the movements have to explain
    pub fn expected_change(&self) -> BigDecimal {
        &self.end.balance - &self.start.balance
    }
}

/// Category of a validation error, serialized as the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationErrorType {
    BalancesMissing,
    Duplicate,
    Difference,
}

/// Closed set of human-readable messages attached to validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorMessage {
    BalancesMissing,
    WithdrawalDifference,
    DepositDifference,
    Duplicate,
}

impl ValidationErrorMessage {
    /// The fixed wire text of the message
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorMessage::BalancesMissing => "At least one balance is missing",
            ValidationErrorMessage::WithdrawalDifference => "At least one withdrawal is missing",
            ValidationErrorMessage::DepositDifference => "At least one deposit is missing",
            ValidationErrorMessage::Duplicate => "A duplicate is found",
        }
    }
}

impl fmt::Display for ValidationErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ValidationErrorMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Direction of a period difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceKind {
    /// Movements overstate the balance change: a withdrawal is missing
    Withdrawal,
    /// Movements understate the balance change: a deposit is missing
    Deposit,
}

/// Business-rule outcome of a reconciliation run
///
/// These are reported values, never faults. An empty list of them means the
/// statement reconciles.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Fewer than two balances were supplied
    BalancesMissing,
    /// Some movement ids occur more than once; `details` lists them
    Duplicate { details: String },
    /// A period whose movements do not explain its balance change
    Difference {
        kind: DifferenceKind,
        period: Period,
        /// `sum(movements) - (end.balance - start.balance)`, signed
        difference: BigDecimal,
        /// Hint naming movements whose amount equals the difference
        details: Option<String>,
    },
}

impl ValidationError {
    pub fn error_type(&self) -> ValidationErrorType {
        match self {
            ValidationError::BalancesMissing => ValidationErrorType::BalancesMissing,
            ValidationError::Duplicate { .. } => ValidationErrorType::Duplicate,
            ValidationError::Difference { .. } => ValidationErrorType::Difference,
        }
    }

    pub fn message(&self) -> ValidationErrorMessage {
        match self {
            ValidationError::BalancesMissing => ValidationErrorMessage::BalancesMissing,
            ValidationError::Duplicate { .. } => ValidationErrorMessage::Duplicate,
            ValidationError::Difference {
                kind: DifferenceKind::Withdrawal,
                ..
            } => ValidationErrorMessage::WithdrawalDifference,
            ValidationError::Difference {
                kind: DifferenceKind::Deposit,
                ..
            } => ValidationErrorMessage::DepositDifference,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ValidationError::BalancesMissing => None,
            ValidationError::Duplicate { details } => Some(details.as_str()),
            ValidationError::Difference { details, .. } => details.as_deref(),
        }
    }

    pub fn period(&self) -> Option<Period> {
        match self {
            ValidationError::Difference { period, .. } => Some(*period),
            _ => None,
        }
    }

    pub fn difference(&self) -> Option<&BigDecimal> {
        match self {
            ValidationError::Difference { difference, .. } => Some(difference),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BalancesMissing => write!(f, "{}", self.message()),
            ValidationError::Duplicate { details } => write!(f, "{}: {}", self.message(), details),
            ValidationError::Difference {
                period, difference, ..
            } => write!(f, "{} in {} (difference {})", self.message(), period, difference),
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let field_count = match self {
            ValidationError::BalancesMissing => 2,
            ValidationError::Duplicate { .. } => 3,
            ValidationError::Difference { details, .. } => 4 + usize::from(details.is_some()),
        };
        let mut state = serializer.serialize_struct("ValidationError", field_count)?;
        state.serialize_field("type", &self.error_type())?;
        state.serialize_field("message", &self.message())?;
        match self {
            ValidationError::BalancesMissing => {}
            ValidationError::Duplicate { details } => {
                state.serialize_field("details", details)?;
            }
            ValidationError::Difference {
                period,
                difference,
                details,
                ..
            } => {
                if let Some(details) = details {
                    state.serialize_field("details", details)?;
                }
                state.serialize_field("period", period)?;
                state.serialize_field("difference", &WireAmount(difference))?;
            }
        }
        state.end()
    }
}

struct WireAmount<'a>(&'a BigDecimal);

impl Serialize for WireAmount<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        wire_decimal::serialize(self.0, serializer)
    }
}

/// Faults raised around the reconciliation core
///
/// Business-rule findings are [`ValidationError`] values; this enum only
/// covers payloads that could not be decoded or encoded.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ReconciliationError {
    fn from(err: serde_json::Error) -> Self {
        ReconciliationError::Decode(err.to_string())
    }
}

/// Result type for reconciliation operations
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;
