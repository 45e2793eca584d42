//! Bank account repository.
//!
//! Bank accounts are reference data only; they are not linked to the ledger.

use billbook_core::entity::{EntityError, EntityKind, validate_balance};
use billbook_shared::types::{BankAccountId, PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::store::{StoreError, page_of};
use crate::entities::bank_accounts;

/// Bank account fields accepted on create and replace.
#[derive(Debug, Clone)]
pub struct BankAccountInput {
    /// Account holder name.
    pub account_name: String,
    /// Account number.
    pub account_number: String,
    /// Bank name.
    pub bank_name: String,
    /// IFSC branch code.
    pub ifsc_code: String,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Initial amount.
    pub initial_amount: Decimal,
}

impl BankAccountInput {
    fn validate(&self) -> Result<(), EntityError> {
        validate_balance("opening_balance", self.opening_balance)?;
        validate_balance("initial_amount", self.initial_amount)
    }
}

/// Bank account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    /// Creates a new bank account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bank account.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a balance the amount column cannot hold, or an
    /// error if the database insert fails.
    pub async fn create(
        &self,
        input: BankAccountInput,
    ) -> Result<bank_accounts::Model, StoreError> {
        input.validate()?;
        let account = bank_accounts::ActiveModel {
            id: Set(BankAccountId::new().into_inner()),
            account_name: Set(input.account_name),
            account_number: Set(input.account_number),
            bank_name: Set(input.bank_name),
            ifsc_code: Set(input.ifsc_code),
            opening_balance: Set(input.opening_balance),
            initial_amount: Set(input.initial_amount),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(bank_account_id = %account.id, "Bank account created");
        Ok(account)
    }

    /// Finds a bank account by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn get(&self, id: Uuid) -> Result<bank_accounts::Model, StoreError> {
        bank_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::BankAccount, id))
    }

    /// Lists bank accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<bank_accounts::Model>, StoreError> {
        let total = bank_accounts::Entity::find().count(&self.db).await?;
        let rows = bank_accounts::Entity::find()
            .order_by_asc(bank_accounts::Column::CreatedAt)
            .order_by_asc(bank_accounts::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(page_of(rows, page, total))
    }

    /// Replaces a bank account's fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: BankAccountInput,
    ) -> Result<bank_accounts::Model, StoreError> {
        input.validate()?;
        let mut account: bank_accounts::ActiveModel = self.get(id).await?.into();
        account.account_name = Set(input.account_name);
        account.account_number = Set(input.account_number);
        account.bank_name = Set(input.bank_name);
        account.ifsc_code = Set(input.ifsc_code);
        account.opening_balance = Set(input.opening_balance);
        account.initial_amount = Set(input.initial_amount);
        let account = account.update(&self.db).await?;

        info!(bank_account_id = %id, "Bank account updated");
        Ok(account)
    }

    /// Deletes a bank account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = bank_accounts::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(EntityKind::BankAccount, id));
        }

        info!(bank_account_id = %id, "Bank account deleted");
        Ok(())
    }
}
