//! Employee repository.
//!
//! `salary_balance` is plain stored data; salary payments go through the
//! ledger and never touch it.

use billbook_core::entity::{EntityKind, validate_balance};
use billbook_shared::types::{EmployeeId, PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::store::{StoreError, page_of};
use crate::entities::employees;

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Employee name.
    pub employee_name: String,
    /// Mobile number.
    pub mobile_number: String,
    /// City.
    pub city: String,
    /// Opening salary balance (defaults to zero).
    pub salary_balance: Option<Decimal>,
}

/// Input for replacing an employee's fields.
#[derive(Debug, Clone)]
pub struct UpdateEmployeeInput {
    /// Employee name.
    pub employee_name: String,
    /// Mobile number.
    pub mobile_number: String,
    /// City.
    pub city: String,
    /// Salary balance; unchanged when absent.
    pub salary_balance: Option<Decimal>,
}

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateEmployeeInput) -> Result<employees::Model, StoreError> {
        if let Some(salary_balance) = input.salary_balance {
            validate_balance("salary_balance", salary_balance)?;
        }
        let employee = employees::ActiveModel {
            id: Set(EmployeeId::new().into_inner()),
            employee_name: Set(input.employee_name),
            mobile_number: Set(input.mobile_number),
            city: Set(input.city),
            salary_balance: Set(input.salary_balance.unwrap_or(Decimal::ZERO)),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Finds an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub async fn get(&self, id: Uuid) -> Result<employees::Model, StoreError> {
        employees::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Employee, id))
    }

    /// Lists employees, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<employees::Model>, StoreError> {
        let total = employees::Entity::find().count(&self.db).await?;
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::CreatedAt)
            .order_by_asc(employees::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(page_of(rows, page, total))
    }

    /// Replaces an employee's fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateEmployeeInput,
    ) -> Result<employees::Model, StoreError> {
        if let Some(salary_balance) = input.salary_balance {
            validate_balance("salary_balance", salary_balance)?;
        }
        let mut employee: employees::ActiveModel = self.get(id).await?.into();
        employee.employee_name = Set(input.employee_name);
        employee.mobile_number = Set(input.mobile_number);
        employee.city = Set(input.city);
        if let Some(salary_balance) = input.salary_balance {
            employee.salary_balance = Set(salary_balance);
        }
        let employee = employee.update(&self.db).await?;

        info!(employee_id = %id, "Employee updated");
        Ok(employee)
    }

    /// Deletes an employee. Linked expenses keep their rows with the link cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(EntityKind::Employee, id));
        }

        info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}
