//! Expense repository for database operations.
//!
//! Updates and deletes against an existing expense carry the status the
//! caller read, so a concurrent decision makes the second write affect no
//! rows.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue::{NotSet, Set}, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Statement,
};
use tracker_core::dashboard::{ExpenseTotals, StatsWindow};
use tracker_core::expense::{Expense, ExpenseCategory, ExpenseFilter, ExpenseStatus};
use tracker_core::store::{ExpenseStore, StoreError};
use tracker_shared::types::ExpenseId;

use super::store_err;
use crate::entities::{expenses, sea_orm_active_enums};

/// Bucketed counts and sums. `$1` is the start of this month, `$2` the
/// start of last month and `$3` now. Drafts only count towards `total`.
const TOTALS_SQL: &str = r"
SELECT
    COUNT(*) AS total,
    COUNT(*) FILTER (WHERE status = 'submitted') AS pending,
    COUNT(*) FILTER (WHERE status = 'approved') AS approved,
    COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
    COALESCE(SUM(amount) FILTER (
        WHERE status = 'approved' AND approved_date >= $1 AND approved_date <= $3
    ), 0) AS monthly_spend,
    COALESCE(SUM(amount) FILTER (
        WHERE status <> 'draft' AND submitted_date >= $1 AND submitted_date <= $3
    ), 0) AS submitted_this_month,
    COALESCE(SUM(amount) FILTER (
        WHERE status <> 'draft' AND submitted_date >= $2 AND submitted_date < $1
    ), 0) AS submitted_last_month
FROM expenses
";

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    total: i64,
    pending: i64,
    approved: i64,
    rejected: i64,
    monthly_spend: Decimal,
    submitted_this_month: Decimal,
    submitted_last_month: Decimal,
}

impl TryFrom<TotalsRow> for ExpenseTotals {
    type Error = StoreError;

    fn try_from(row: TotalsRow) -> Result<Self, Self::Error> {
        let count = |value: i64| {
            u64::try_from(value)
                .map_err(|_| StoreError::Backend(format!("negative expense count: {value}")))
        };
        Ok(Self {
            total: count(row.total)?,
            pending: count(row.pending)?,
            approved: count(row.approved)?,
            rejected: count(row.rejected)?,
            monthly_spend: row.monthly_spend,
            submitted_this_month: row.submitted_this_month,
            submitted_last_month: row.submitted_last_month,
        })
    }
}

/// Expense repository backed by the `expenses` table.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        let mut query = expenses::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(
                expenses::Column::Status.eq(sea_orm_active_enums::ExpenseStatus::from(status)),
            );
        }
        if let Some(category) = filter.category {
            query = query.filter(expenses::Column::Category.eq(category.as_str()));
        }
        if let Some(employee_id) = filter.employee_id.as_deref() {
            query = query.filter(expenses::Column::EmployeeId.eq(employee_id));
        }

        let models = query
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;
        models.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
        expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_err)?
            .map(to_domain)
            .transpose()
    }

    async fn insert(&self, expense: &Expense) -> Result<(), StoreError> {
        expenses::Entity::insert(to_active(expense))
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn update(&self, expense: &Expense, expected: ExpenseStatus) -> Result<bool, StoreError> {
        let mut changes = to_active(expense);
        changes.id = NotSet;
        changes.created_at = NotSet;

        let result = expenses::Entity::update_many()
            .set(changes)
            .filter(expenses::Column::Id.eq(expense.id.into_inner()))
            .filter(
                expenses::Column::Status.eq(sea_orm_active_enums::ExpenseStatus::from(expected)),
            )
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: ExpenseId, expected: ExpenseStatus) -> Result<bool, StoreError> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::Id.eq(id.into_inner()))
            .filter(
                expenses::Column::Status.eq(sea_orm_active_enums::ExpenseStatus::from(expected)),
            )
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn totals(&self, window: &StatsWindow) -> Result<ExpenseTotals, StoreError> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            TOTALS_SQL,
            [
                window.this_month.into(),
                window.last_month.into(),
                window.now.into(),
            ],
        );
        TotalsRow::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or_else(|| StoreError::Backend("expense totals returned no row".to_string()))?
            .try_into()
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Expense>, StoreError> {
        let models = expenses::Entity::find()
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)?;
        models.into_iter().map(to_domain).collect()
    }
}

fn to_domain(model: expenses::Model) -> Result<Expense, StoreError> {
    let category = ExpenseCategory::parse(&model.category).ok_or_else(|| {
        StoreError::Backend(format!("unknown expense category: {}", model.category))
    })?;

    Ok(Expense {
        id: ExpenseId::from_uuid(model.id),
        employee_name: model.employee_name,
        employee_id: model.employee_id,
        department: model.department,
        category,
        amount: model.amount,
        description: model.description,
        receipt_url: model.receipt_url,
        status: model.status.into(),
        submitted_date: model.submitted_date.with_timezone(&Utc),
        approved_date: model.approved_date.map(|d| d.with_timezone(&Utc)),
        approver_name: model.approver_name,
        approval_notes: model.approval_notes,
        rejection_reason: model.rejection_reason,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn to_active(expense: &Expense) -> expenses::ActiveModel {
    expenses::ActiveModel {
        id: Set(expense.id.into_inner()),
        employee_name: Set(expense.employee_name.clone()),
        employee_id: Set(expense.employee_id.clone()),
        department: Set(expense.department.clone()),
        category: Set(expense.category.as_str().to_string()),
        amount: Set(expense.amount),
        description: Set(expense.description.clone()),
        receipt_url: Set(expense.receipt_url.clone()),
        status: Set(expense.status.into()),
        submitted_date: Set(expense.submitted_date.into()),
        approved_date: Set(expense.approved_date.map(Into::into)),
        approver_name: Set(expense.approver_name.clone()),
        approval_notes: Set(expense.approval_notes.clone()),
        rejection_reason: Set(expense.rejection_reason.clone()),
        created_at: Set(expense.created_at.into()),
        updated_at: Set(expense.updated_at.into()),
    }
}
