use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CreateCategoryFormPayload, UpdateCategoryFormPayload};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Persist a new category and return it in response shape.
///
/// A collision on either unique field (`id` or `slug`) is reported as
/// [`ServiceError::Conflict`] without naming the field.
pub fn create_category<R>(
    payload: CreateCategoryFormPayload,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => Ok(CategoryDto::from(created)),
        Err(RepositoryError::UniqueViolation(detail)) => {
            log::info!("Rejected duplicate category {}: {detail}", category.id);
            Err(ServiceError::Conflict)
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_categories<R>(query: &CategoryListQuery, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories(query) {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Resolve `key` as an identifier first, then as a slug.
pub fn show_category<R>(key: &str, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    match repo.get_category_by_id_or_slug(key) {
        Ok(Some(category)) => Ok(CategoryDto::from(category)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(payload: UpdateCategoryFormPayload, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    match repo.update_category(&payload.category_id, &payload.update) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(RepositoryError::UniqueViolation(detail)) => {
            log::info!(
                "Rejected update of category {}: {detail}",
                payload.category_id
            );
            Err(ServiceError::Conflict)
        }
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_category<R>(category_id: &CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    match repo.delete_category(category_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}
