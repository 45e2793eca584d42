//! Vendor repository.

use billbook_core::entity::EntityKind;
use billbook_shared::types::{PageRequest, PageResponse, VendorId};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::store::{StoreError, page_of};
use crate::entities::vendors;

/// Vendor fields accepted on create and replace.
#[derive(Debug, Clone)]
pub struct VendorInput {
    /// Contact name.
    pub vendor_name: String,
    /// Company name.
    pub company_name: String,
    /// Mobile number, used verbatim in share links.
    pub mobile_number: String,
    /// City.
    pub city: String,
}

/// Vendor repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a vendor.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: VendorInput) -> Result<vendors::Model, StoreError> {
        let vendor = vendors::ActiveModel {
            id: Set(VendorId::new().into_inner()),
            vendor_name: Set(input.vendor_name),
            company_name: Set(input.company_name),
            mobile_number: Set(input.mobile_number),
            city: Set(input.city),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(vendor_id = %vendor.id, "Vendor created");
        Ok(vendor)
    }

    /// Finds a vendor by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist.
    pub async fn get(&self, id: Uuid) -> Result<vendors::Model, StoreError> {
        vendors::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Vendor, id))
    }

    /// Lists vendors, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<vendors::Model>, StoreError> {
        let total = vendors::Entity::find().count(&self.db).await?;
        let rows = vendors::Entity::find()
            .order_by_asc(vendors::Column::CreatedAt)
            .order_by_asc(vendors::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(page_of(rows, page, total))
    }

    /// Replaces a vendor's fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist.
    pub async fn update(&self, id: Uuid, input: VendorInput) -> Result<vendors::Model, StoreError> {
        let mut vendor: vendors::ActiveModel = self.get(id).await?.into();
        vendor.vendor_name = Set(input.vendor_name);
        vendor.company_name = Set(input.company_name);
        vendor.mobile_number = Set(input.mobile_number);
        vendor.city = Set(input.city);
        let vendor = vendor.update(&self.db).await?;

        info!(vendor_id = %id, "Vendor updated");
        Ok(vendor)
    }

    /// Deletes a vendor. Invoices keep their rows with the vendor cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = vendors::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(EntityKind::Vendor, id));
        }

        info!(vendor_id = %id, "Vendor deleted");
        Ok(())
    }
}
