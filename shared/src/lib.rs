use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Server-side key of one expense. The server emits it as a JSON number, but
/// it is treated as opaque text everywhere in the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawExpenseId")]
pub struct ExpenseId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpenseId {
    Integer(i64),
    Text(String),
}

impl From<RawExpenseId> for ExpenseId {
    fn from(raw: RawExpenseId) -> Self {
        match raw {
            RawExpenseId::Integer(n) => ExpenseId(n.to_string()),
            RawExpenseId::Text(s) => ExpenseId(s),
        }
    }
}

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        ExpenseId(id.into())
    }

    /// Build an id from a `data-id` attribute value. Blank values carry no id.
    pub fn from_attribute(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ExpenseId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One expense as returned by `GET /expense/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub description: String,
    /// One of the categories offered by the server-rendered select
    pub category: String,
    pub amount: f64,
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
    /// One of the payment methods offered by the server-rendered select
    pub payment_method: String,
}

impl ExpenseRecord {
    /// Text written into the amount input. Uses the shortest representation
    /// that round-trips, so `3.5` stays `3.5` and `12.0` becomes `12`.
    pub fn amount_input_value(&self) -> String {
        self.amount.to_string()
    }

    /// Endpoint the edit form posts to for this record
    pub fn update_path(&self) -> String {
        edit_path(&self.id)
    }
}

/// Error envelope the server sends alongside non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Path of the read endpoint for a single expense
pub fn expense_path(id: &ExpenseId) -> String {
    format!("/expense/{}", id)
}

/// Path of the update endpoint for a single expense
pub fn edit_path(id: &ExpenseId) -> String {
    format!("/edit/{}", id)
}

/// Format a date the way `<input type="date">` expects its value
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Raw values read out of an add or edit expense form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFormFields {
    pub description: String,
    /// `None` when no option is chosen
    pub category: Option<String>,
    pub amount: String,
    pub date: String,
    /// `None` when no option is chosen
    pub payment_method: Option<String>,
}

/// Reasons an expense form is rejected before submission. The display text
/// is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Description cannot be empty.")]
    EmptyDescription,
    #[error("Please select a category.")]
    MissingCategory,
    #[error("Please select a payment method.")]
    MissingPaymentMethod,
    #[error("Amount must be a positive number.")]
    AmountNotPositive,
    #[error("Please select a date.")]
    MissingDate,
}

/// Outcome of validating one form submission
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
    pub failure: Option<ValidationFailure>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
            failure: None,
        }
    }

    fn invalid(failure: ValidationFailure) -> Self {
        Self {
            is_valid: false,
            message: Some(failure.to_string()),
            failure: Some(failure),
        }
    }
}

/// Validate an expense form. Rules are checked in a fixed order and only the
/// first failing rule is reported.
pub fn validate_expense_form(fields: &ExpenseFormFields) -> ValidationResult {
    match first_failure(fields) {
        Some(failure) => ValidationResult::invalid(failure),
        None => ValidationResult::valid(),
    }
}

fn first_failure(fields: &ExpenseFormFields) -> Option<ValidationFailure> {
    if fields.description.trim().is_empty() {
        return Some(ValidationFailure::EmptyDescription);
    }
    if !is_selected(&fields.category) {
        return Some(ValidationFailure::MissingCategory);
    }
    if !is_selected(&fields.payment_method) {
        return Some(ValidationFailure::MissingPaymentMethod);
    }
    match parse_amount(&fields.amount) {
        Some(amount) if amount > 0.0 => {}
        _ => return Some(ValidationFailure::AmountNotPositive),
    }
    if fields.date.is_empty() {
        return Some(ValidationFailure::MissingDate);
    }
    None
}

fn is_selected(selection: &Option<String>) -> bool {
    selection.as_deref().is_some_and(|value| !value.is_empty())
}

/// Parse the amount input. Empty, non-numeric and non-finite input yields `None`.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Visual treatment of a notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Bootstrap class selecting the alert colour
    pub fn alert_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
