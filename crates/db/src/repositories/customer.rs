//! Customer repository.

use billbook_core::entity::EntityKind;
use billbook_shared::types::{CustomerId, PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::store::{StoreError, page_of};
use crate::entities::customers;

/// Customer fields accepted on create and replace.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    /// Customer name.
    pub customer_name: String,
    /// Shop name, if any.
    pub shop_name: Option<String>,
    /// Mobile number, used verbatim in share links.
    pub mobile_number: String,
    /// City.
    pub city: String,
}

/// Customer repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CustomerInput) -> Result<customers::Model, StoreError> {
        let customer = customers::ActiveModel {
            id: Set(CustomerId::new().into_inner()),
            customer_name: Set(input.customer_name),
            shop_name: Set(input.shop_name),
            mobile_number: Set(input.mobile_number),
            city: Set(input.city),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Finds a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist.
    pub async fn get(&self, id: Uuid) -> Result<customers::Model, StoreError> {
        customers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, id))
    }

    /// Lists customers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<customers::Model>, StoreError> {
        let total = customers::Entity::find().count(&self.db).await?;
        let rows = customers::Entity::find()
            .order_by_asc(customers::Column::CreatedAt)
            .order_by_asc(customers::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(page_of(rows, page, total))
    }

    /// Replaces a customer's fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: CustomerInput,
    ) -> Result<customers::Model, StoreError> {
        let mut customer: customers::ActiveModel = self.get(id).await?.into();
        customer.customer_name = Set(input.customer_name);
        customer.shop_name = Set(input.shop_name);
        customer.mobile_number = Set(input.mobile_number);
        customer.city = Set(input.city);
        let customer = customer.update(&self.db).await?;

        info!(customer_id = %id, "Customer updated");
        Ok(customer)
    }

    /// Deletes a customer. Invoices keep their rows with the customer cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = customers::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(EntityKind::Customer, id));
        }

        info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}
