//! Ledger repository for income and expense entries.
//!
//! Every insert reads the global totals and stamps the new row with the
//! balance before it, all inside one transaction that holds a lock on both
//! ledger tables. Stored snapshots are never rewritten.

use billbook_core::ledger::{
    LedgerError, LedgerKind, LedgerService, LedgerTotals, NewLedgerEntry, SalaryPayment,
    StampedEntry,
};
use billbook_core::money::MONEY_SCALE;
use billbook_shared::types::{ExpenseId, IncomeId, PageRequest, PageResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, Func},
};
use tracing::info;
use uuid::Uuid;

use super::store::page_of;
use crate::entities::{employees, expenses, incomes};

/// Serialises concurrent ledger writers on PostgreSQL. SQLite already allows
/// a single writer at a time.
const LOCK_LEDGER_SQL: &str = "LOCK TABLE incomes, expenses IN SHARE ROW EXCLUSIVE MODE";

/// Error types for ledger repository operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerRepoError {
    /// Ledger rule violation or missing record.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A stored income or expense row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Which table the row lives in.
    pub kind: LedgerKind,
    /// Row ID.
    pub id: Uuid,
    /// Source or reason.
    pub name: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Balance immediately before this entry.
    pub previous_balance: Decimal,
    /// Payment method.
    pub payment_type: String,
    /// External reference, empty when none.
    pub transaction_id: String,
    /// Linked employee (expenses only).
    pub employee_id: Option<Uuid>,
    /// Insert time.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<incomes::Model> for LedgerEntry {
    fn from(row: incomes::Model) -> Self {
        Self {
            kind: LedgerKind::Income,
            id: row.id,
            name: row.name,
            date: row.date,
            amount: row.amount,
            previous_balance: row.previous_balance,
            payment_type: row.payment_type,
            transaction_id: row.transaction_id,
            employee_id: None,
            created_at: row.created_at,
        }
    }
}

impl From<expenses::Model> for LedgerEntry {
    fn from(row: expenses::Model) -> Self {
        Self {
            kind: LedgerKind::Expense,
            id: row.id,
            name: row.name,
            date: row.date,
            amount: row.amount,
            previous_balance: row.previous_balance,
            payment_type: row.payment_type,
            transaction_id: row.transaction_id,
            employee_id: row.employee_id,
            created_at: row.created_at,
        }
    }
}

/// Descriptive fields that may change after an entry is recorded.
#[derive(Debug, Clone, Default)]
pub struct UpdateLedgerEntryInput {
    /// New name.
    pub name: Option<String>,
    /// New payment type.
    pub payment_type: Option<String>,
    /// New external reference.
    pub transaction_id: Option<String>,
}

/// Ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an income or expense entry stamped with the current balance.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any write, `EmployeeNotFound` for an
    /// unknown linked employee, or a database error.
    pub async fn record(&self, entry: NewLedgerEntry) -> Result<LedgerEntry, LedgerRepoError> {
        LedgerService::validate(&entry)?;

        let txn = self.db.begin().await?;
        lock_ledger(&txn).await?;

        if let Some(employee_id) = entry.employee_id {
            let employee_id = employee_id.into_inner();
            employees::Entity::find_by_id(employee_id)
                .one(&txn)
                .await?
                .ok_or(LedgerError::EmployeeNotFound(employee_id))?;
        }

        let totals = totals_on(&txn).await?;
        let stamped = LedgerService::stamp(entry, &totals)?;
        let stored = insert_stamped(&txn, stamped).await?;
        txn.commit().await?;

        info!(
            kind = %stored.kind,
            entry_id = %stored.id,
            amount = %stored.amount,
            previous_balance = %stored.previous_balance,
            "Ledger entry recorded"
        );
        Ok(stored)
    }

    /// Pays an employee: records a salary expense linked to them.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` without writing anything when the employee
    /// does not exist.
    pub async fn pay_salary(
        &self,
        payment: SalaryPayment,
    ) -> Result<LedgerEntry, LedgerRepoError> {
        let txn = self.db.begin().await?;
        lock_ledger(&txn).await?;

        let employee_id = payment.employee_id.into_inner();
        let employee = employees::Entity::find_by_id(employee_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EmployeeNotFound(employee_id))?;

        let entry = LedgerService::salary_expense(&employee.employee_name, &payment);
        let totals = totals_on(&txn).await?;
        let stamped = LedgerService::stamp(entry, &totals)?;
        let stored = insert_stamped(&txn, stamped).await?;
        txn.commit().await?;

        info!(
            employee_id = %employee_id,
            entry_id = %stored.id,
            amount = %stored.amount,
            "Salary paid"
        );
        Ok(stored)
    }

    /// Current totals over both ledger tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn totals(&self) -> Result<LedgerTotals, LedgerRepoError> {
        Ok(totals_on(&self.db).await?)
    }

    /// Lists entries of one kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        kind: LedgerKind,
        page: &PageRequest,
    ) -> Result<PageResponse<LedgerEntry>, LedgerRepoError> {
        let (rows, total) = match kind {
            LedgerKind::Income => {
                let total = incomes::Entity::find().count(&self.db).await?;
                let rows = incomes::Entity::find()
                    .order_by_desc(incomes::Column::CreatedAt)
                    .order_by_desc(incomes::Column::Id)
                    .offset(page.offset())
                    .limit(page.limit())
                    .all(&self.db)
                    .await?;
                (rows.into_iter().map(LedgerEntry::from).collect(), total)
            }
            LedgerKind::Expense => {
                let total = expenses::Entity::find().count(&self.db).await?;
                let rows = expenses::Entity::find()
                    .order_by_desc(expenses::Column::CreatedAt)
                    .order_by_desc(expenses::Column::Id)
                    .offset(page.offset())
                    .limit(page.limit())
                    .all(&self.db)
                    .await?;
                (rows.into_iter().map(LedgerEntry::from).collect(), total)
            }
        };
        Ok(page_of(rows, page, total))
    }

    /// Finds one entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if no such row exists.
    pub async fn get(&self, kind: LedgerKind, id: Uuid) -> Result<LedgerEntry, LedgerRepoError> {
        let found = match kind {
            LedgerKind::Income => incomes::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(LedgerEntry::from),
            LedgerKind::Expense => expenses::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(LedgerEntry::from),
        };
        found.ok_or_else(|| LedgerError::EntryNotFound { kind, id }.into())
    }

    /// Updates descriptive fields. Amount, date and the balance snapshot
    /// cannot change.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` for an unknown row or `MissingField` when a
    /// supplied name or payment type is blank.
    pub async fn update(
        &self,
        kind: LedgerKind,
        id: Uuid,
        input: UpdateLedgerEntryInput,
    ) -> Result<LedgerEntry, LedgerRepoError> {
        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(LedgerError::MissingField("name").into());
        }
        if input
            .payment_type
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(LedgerError::MissingField("payment_type").into());
        }

        let updated = match kind {
            LedgerKind::Income => {
                let row = incomes::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(LedgerError::EntryNotFound { kind, id })?;
                let mut active: incomes::ActiveModel = row.into();
                if let Some(name) = input.name {
                    active.name = Set(name);
                }
                if let Some(payment_type) = input.payment_type {
                    active.payment_type = Set(payment_type);
                }
                if let Some(transaction_id) = input.transaction_id {
                    active.transaction_id = Set(transaction_id);
                }
                LedgerEntry::from(active.update(&self.db).await?)
            }
            LedgerKind::Expense => {
                let row = expenses::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(LedgerError::EntryNotFound { kind, id })?;
                let mut active: expenses::ActiveModel = row.into();
                if let Some(name) = input.name {
                    active.name = Set(name);
                }
                if let Some(payment_type) = input.payment_type {
                    active.payment_type = Set(payment_type);
                }
                if let Some(transaction_id) = input.transaction_id {
                    active.transaction_id = Set(transaction_id);
                }
                LedgerEntry::from(active.update(&self.db).await?)
            }
        };

        info!(kind = %kind, entry_id = %id, "Ledger entry updated");
        Ok(updated)
    }

    /// Deletes an entry. Snapshots stamped on later rows are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if no such row exists.
    pub async fn delete(&self, kind: LedgerKind, id: Uuid) -> Result<(), LedgerRepoError> {
        let result = match kind {
            LedgerKind::Income => incomes::Entity::delete_by_id(id).exec(&self.db).await?,
            LedgerKind::Expense => expenses::Entity::delete_by_id(id).exec(&self.db).await?,
        };
        if result.rows_affected == 0 {
            return Err(LedgerError::EntryNotFound { kind, id }.into());
        }

        info!(kind = %kind, entry_id = %id, "Ledger entry deleted");
        Ok(())
    }
}

async fn lock_ledger<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    if conn.get_database_backend() == DbBackend::Postgres {
        conn.execute_unprepared(LOCK_LEDGER_SQL).await?;
    }
    Ok(())
}

/// Sums both amount columns as seen by `conn`.
pub(crate) async fn totals_on<C: ConnectionTrait>(conn: &C) -> Result<LedgerTotals, DbErr> {
    let total_income = sum_amount::<incomes::Entity, _>(conn, incomes::Column::Amount).await?;
    let total_expense = sum_amount::<expenses::Entity, _>(conn, expenses::Column::Amount).await?;
    Ok(LedgerTotals::new(total_income, total_expense))
}

/// `SUM(column)` computed by the database and returned as text, so SQLite's
/// floating point sum is read back at its printed precision.
async fn sum_amount<E, C>(conn: &C, column: E::Column) -> Result<Decimal, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let total: Option<Option<String>> = E::find()
        .select_only()
        .column_as(
            Expr::cust_with_expr("CAST($1 AS TEXT)", Func::sum(Expr::col(column))),
            "total",
        )
        .into_tuple()
        .one(conn)
        .await?;

    match total.flatten() {
        None => Ok(Decimal::ZERO),
        Some(text) => text
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&text))
            .map(|sum| sum.round_dp(MONEY_SCALE))
            .map_err(|e| DbErr::Type(format!("invalid amount sum {text:?}: {e}"))),
    }
}

async fn insert_stamped<C: ConnectionTrait>(
    conn: &C,
    stamped: StampedEntry,
) -> Result<LedgerEntry, DbErr> {
    let StampedEntry {
        entry,
        previous_balance,
    } = stamped;
    let today = chrono::Utc::now().date_naive();
    let now = chrono::Utc::now().into();
    let transaction_id = entry.transaction_id.unwrap_or_default();

    let stored: LedgerEntry = match entry.kind {
        LedgerKind::Income => incomes::ActiveModel {
            id: Set(IncomeId::new().into_inner()),
            name: Set(entry.name),
            date: Set(today),
            amount: Set(entry.amount),
            previous_balance: Set(previous_balance),
            payment_type: Set(entry.payment_type),
            transaction_id: Set(transaction_id),
            created_at: Set(now),
        }
        .insert(conn)
        .await?
        .into(),
        LedgerKind::Expense => expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            name: Set(entry.name),
            date: Set(today),
            amount: Set(entry.amount),
            previous_balance: Set(previous_balance),
            payment_type: Set(entry.payment_type),
            transaction_id: Set(transaction_id),
            employee_id: Set(entry.employee_id.map(|id| id.into_inner())),
            created_at: Set(now),
        }
        .insert(conn)
        .await?
        .into(),
    };
    Ok(stored)
}
