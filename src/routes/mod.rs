use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;
use thiserror::Error;

use crate::forms::FieldErrors;
use crate::forms::categories::CategoryFormError;
use crate::services::ServiceError;

pub mod categories;

pub const CATEGORY_NOT_FOUND_TEXT: &str = "Category not found";
pub const UNIQUE_FIELDS_TEXT: &str = "Fields must be unique";

/// Errors rendered as `{ statusCode, message, messages?, error }` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", .0.first_message())]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<&'a FieldErrors>,
    error: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let messages = match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };
        HttpResponse::build(status).json(ErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
            messages,
            error: status.canonical_reason().unwrap_or("Error"),
        })
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound => ApiError::NotFound(CATEGORY_NOT_FOUND_TEXT.to_string()),
            ServiceError::Conflict => ApiError::BadRequest(UNIQUE_FIELDS_TEXT.to_string()),
            ServiceError::Internal => ApiError::Internal,
        }
    }
}

impl From<CategoryFormError> for ApiError {
    fn from(value: CategoryFormError) -> Self {
        match value {
            CategoryFormError::Validation(errors) => ApiError::Validation(errors),
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected JSON body: {err}");
        ApiError::BadRequest(err.to_string()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {err}");
        ApiError::BadRequest(err.to_string()).into()
    })
}

/// Register the category resource and its extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(categories::create_category)
        .service(categories::list_categories)
        .service(categories::show_category)
        .service(categories::update_category)
        .service(categories::delete_category);
}
