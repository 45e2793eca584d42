//! Shared pieces of the master-data repositories.

use billbook_core::entity::{EntityError, EntityKind};
use billbook_shared::types::{PageRequest, PageResponse};
use sea_orm::DbErr;
use uuid::Uuid;

/// Error types for master-data operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record missing or a field rule broken.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    /// Not-found error for `kind` with `id`.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        Self::Entity(EntityError::NotFound { kind, id })
    }
}

/// Wraps one page of rows with its metadata.
pub(crate) fn page_of<T>(data: Vec<T>, request: &PageRequest, total: u64) -> PageResponse<T> {
    // `limit()` is clamped to MAX_PER_PAGE, which fits in u32.
    let per_page = u32::try_from(request.limit()).unwrap_or(u32::MAX);
    PageResponse::new(data, request.page.max(1), per_page, total)
}
