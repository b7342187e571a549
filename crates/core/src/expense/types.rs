//! Expense domain types.
//!
//! Amounts are `Decimal` end to end and serialize as strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracker_shared::types::ExpenseId;
use tracker_shared::validation::non_blank;
use validator::{Validate, ValidationError};

use super::urgency::Urgency;

/// Expense status in the approval lifecycle.
///
/// The valid transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Approved (approve)
/// - Submitted → Rejected (reject)
///
/// Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Saved but not yet sent for approval.
    Draft,
    /// Waiting for a decision.
    Submitted,
    /// Accepted for reimbursement.
    Approved,
    /// Declined with a reason.
    Rejected,
}

impl ExpenseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if the expense can still be edited or deleted.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted)
    }

    /// Returns true once a decision has been made.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense category.
///
/// Serialized with its display name. The short names used by older clients
/// are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Flights, trains, cabs.
    #[serde(rename = "Travel & Transportation", alias = "Travel")]
    Travel,
    /// Client dinners and team meals.
    #[serde(rename = "Meals & Entertainment", alias = "Meals")]
    Meals,
    /// Stationery and consumables.
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    /// Phone and internet bills.
    #[serde(rename = "Communications")]
    Communications,
    /// Courses and certifications.
    #[serde(rename = "Training & Development", alias = "Training")]
    Training,
    /// Meeting venues and hospitality.
    #[serde(rename = "Client Meeting")]
    ClientMeeting,
    /// Licences and subscriptions.
    #[serde(rename = "Software & Subscriptions", alias = "Software")]
    Software,
    /// Devices and peripherals.
    #[serde(rename = "Equipment & Hardware", alias = "Equipment")]
    Equipment,
    /// Anything else.
    #[serde(rename = "Other")]
    Other,
}

impl ExpenseCategory {
    /// All categories in display order.
    pub const ALL: [Self; 9] = [
        Self::Travel,
        Self::Meals,
        Self::OfficeSupplies,
        Self::Communications,
        Self::Training,
        Self::ClientMeeting,
        Self::Software,
        Self::Equipment,
        Self::Other,
    ];

    /// Returns the display name, which is also the stored value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "Travel & Transportation",
            Self::Meals => "Meals & Entertainment",
            Self::OfficeSupplies => "Office Supplies",
            Self::Communications => "Communications",
            Self::Training => "Training & Development",
            Self::ClientMeeting => "Client Meeting",
            Self::Software => "Software & Subscriptions",
            Self::Equipment => "Equipment & Hardware",
            Self::Other => "Other",
        }
    }

    /// Parses a display name or short alias.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .or_else(|| match s.to_lowercase().as_str() {
                "travel" => Some(Self::Travel),
                "meals" => Some(Self::Meals),
                "training" => Some(Self::Training),
                "software" => Some(Self::Software),
                "equipment" => Some(Self::Equipment),
                _ => None,
            })
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored expense claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Name of the claimant.
    pub employee_name: String,
    /// Claimant's employee identifier.
    pub employee_id: String,
    /// Claimant's department.
    pub department: String,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Claimed amount, always positive.
    pub amount: Decimal,
    /// What the money was spent on.
    pub description: String,
    /// Link to the receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    /// Lifecycle status.
    pub status: ExpenseStatus,
    /// When the expense entered (or re-entered) the approval queue.
    pub submitted_date: DateTime<Utc>,
    /// When the expense was approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    /// Who approved the expense.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_name: Option<String>,
    /// Approver's comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
    /// Why the expense was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A submitted expense annotated for the approval queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingExpense {
    /// The underlying expense.
    #[serde(flatten)]
    pub expense: Expense,
    /// Whole days since submission.
    pub days_waiting: i64,
    /// Priority for reviewers.
    pub urgency: Urgency,
}

/// Largest scale an amount may carry; matches `NUMERIC(12, 2)`.
const AMOUNT_SCALE: u32 = 2;

/// Amounts must stay below this bound to fit ten integer digits.
const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0x540B_E400, 2, 0, false, 0);

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Accepts positive amounts that fit the stored column exactly.
pub(crate) fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(amount_error("positive", "Amount must be positive"));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(amount_error("scale", "Amount must have at most 2 decimal places"));
    }
    if *amount >= AMOUNT_LIMIT {
        return Err(amount_error("range", "Amount must be less than 10000000000"));
    }
    Ok(())
}

/// Payload for creating an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewExpense {
    /// Name of the claimant.
    #[validate(
        custom(function = "non_blank", message = "Employee name is required"),
        length(max = 255, message = "Employee name must be at most 255 characters")
    )]
    pub employee_name: String,
    /// Claimant's employee identifier.
    #[validate(
        custom(function = "non_blank", message = "Employee ID is required"),
        length(max = 50, message = "Employee ID must be at most 50 characters")
    )]
    pub employee_id: String,
    /// Claimant's department, `General` when omitted.
    #[serde(default)]
    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Claimed amount.
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    /// What the money was spent on.
    #[validate(custom(function = "non_blank", message = "Description is required"))]
    pub description: String,
    /// Link to the receipt.
    #[serde(default)]
    pub receipt_url: Option<String>,
    /// Keep the expense as a draft instead of submitting it.
    #[serde(default)]
    pub save_as_draft: bool,
}

/// Partial update of an editable expense.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpenseUpdate {
    /// New claimant name.
    #[validate(
        custom(function = "non_blank", message = "Employee name is required"),
        length(max = 255, message = "Employee name must be at most 255 characters")
    )]
    pub employee_name: Option<String>,
    /// New employee identifier.
    #[validate(
        custom(function = "non_blank", message = "Employee ID is required"),
        length(max = 50, message = "Employee ID must be at most 50 characters")
    )]
    pub employee_id: Option<String>,
    /// New department.
    #[validate(
        custom(function = "non_blank", message = "Department is required"),
        length(max = 100, message = "Department must be at most 100 characters")
    )]
    pub department: Option<String>,
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New amount.
    #[validate(custom(function = "positive_amount"))]
    pub amount: Option<Decimal>,
    /// New description.
    #[validate(custom(function = "non_blank", message = "Description is required"))]
    pub description: Option<String>,
    /// New receipt link.
    pub receipt_url: Option<String>,
}

impl ExpenseUpdate {
    /// Applies the provided fields onto an expense.
    pub fn apply(self, expense: &mut Expense) {
        if let Some(v) = self.employee_name {
            expense.employee_name = v.trim().to_string();
        }
        if let Some(v) = self.employee_id {
            expense.employee_id = v.trim().to_string();
        }
        if let Some(v) = self.department {
            expense.department = v.trim().to_string();
        }
        if let Some(v) = self.category {
            expense.category = v;
        }
        if let Some(v) = self.amount {
            expense.amount = v;
        }
        if let Some(v) = self.description {
            expense.description = v.trim().to_string();
        }
        if let Some(v) = self.receipt_url {
            expense.receipt_url = Some(v).filter(|u| !u.trim().is_empty());
        }
    }
}

/// Payload for approving an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApprovalRequest {
    /// Approver's comments.
    #[validate(custom(function = "non_blank", message = "Comments are required"))]
    pub comments: String,
    /// Overrides the claimed amount.
    #[serde(default)]
    #[validate(custom(function = "positive_amount"))]
    pub approved_amount: Option<Decimal>,
}

/// Payload for rejecting an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RejectionRequest {
    /// Why the expense is rejected.
    #[validate(custom(function = "non_blank", message = "Comments are required"))]
    pub comments: String,
}

/// Payload for approving or rejecting several expenses at once.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BulkDecisionRequest {
    /// Expenses to decide.
    #[validate(length(
        min = 1,
        max = 100,
        message = "Between 1 and 100 expenses are required"
    ))]
    pub ids: Vec<ExpenseId>,
    /// Comments applied to every expense.
    #[validate(custom(function = "non_blank", message = "Comments are required"))]
    pub comments: String,
}

/// Outcome for one expense of a bulk decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemResult {
    /// Expense ID.
    pub id: ExpenseId,
    /// Whether the decision was applied.
    pub success: bool,
    /// Why the decision failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a bulk decision.
///
/// Items are independent: a failure does not roll back the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    /// Per-item results in request order.
    pub results: Vec<BulkItemResult>,
    /// Number of applied decisions.
    pub succeeded: usize,
    /// Number of failed decisions.
    pub failed: usize,
}

impl BulkOutcome {
    /// Builds an outcome from per-item results.
    #[must_use]
    pub fn from_results(results: Vec<BulkItemResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let failed = results.len() - succeeded;
        Self {
            results,
            succeeded,
            failed,
        }
    }
}

/// Optional filters for listing expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpenseFilter {
    /// Only this status.
    pub status: Option<ExpenseStatus>,
    /// Only this category.
    pub category: Option<ExpenseCategory>,
    /// Only this claimant.
    pub employee_id: Option<String>,
}

impl ExpenseFilter {
    /// Filter on a single status.
    #[must_use]
    pub fn by_status(status: ExpenseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns true if the expense passes every set filter.
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        self.status.is_none_or(|s| s == expense.status)
            && self.category.is_none_or(|c| c == expense.category)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|id| id == expense.employee_id)
    }
}
