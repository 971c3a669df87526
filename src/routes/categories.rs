use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::types::CategoryId;
use crate::forms::categories::{
    CategoryFilterQuery, CreateCategoryForm, CreateCategoryFormPayload, UpdateCategoryForm,
};
use crate::repository::{CategoryListQuery, DieselRepository};
use crate::routes::{ApiError, CATEGORY_NOT_FOUND_TEXT};
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    list_categories as list_categories_service, show_category as show_category_service,
    update_category as update_category_service,
};

#[post("/category")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCategoryForm>,
) -> Result<HttpResponse, ApiError> {
    let payload: CreateCategoryFormPayload = form.try_into()?;
    let created = create_category_service(payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(created))
}

#[get("/category")]
pub async fn list_categories(
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<CategoryFilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let query: CategoryListQuery = params.try_into()?;
    let categories = list_categories_service(&query, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/category/{id_or_slug}")]
pub async fn show_category(
    id_or_slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    let category = show_category_service(&id_or_slug, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(category))
}

#[patch("/category/{category_id}")]
pub async fn update_category(
    category_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> Result<HttpResponse, ApiError> {
    let payload = form.into_payload(category_id.into_inner())?;
    update_category_service(payload, repo.get_ref())?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/category/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ApiError> {
    // A blank id can never match a stored record.
    let category_id = CategoryId::new(category_id.into_inner())
        .map_err(|_| ApiError::NotFound(CATEGORY_NOT_FOUND_TEXT.to_string()))?;
    delete_category_service(&category_id, repo.get_ref())?;
    Ok(HttpResponse::NoContent().finish())
}
