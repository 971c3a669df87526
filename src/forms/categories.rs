use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{
    CategoryDescription, CategoryId, CategoryName, CategorySlug, CategorySort, PageNumber,
    PageSize, SearchTerm, TypeConstraintError,
};
use crate::forms::{FieldErrors, Typed};
use crate::repository::CategoryListQuery;

/// Validation failure of any category form, keyed by field.
#[derive(Debug, Error, PartialEq)]
pub enum CategoryFormError {
    #[error("{}", .0.first_message())]
    Validation(FieldErrors),
}

impl CategoryFormError {
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            CategoryFormError::Validation(errors) => errors,
        }
    }
}

/// Run a domain constructor, parking its error under `field`.
fn convert<T>(
    errors: &mut FieldErrors,
    field: &str,
    result: Result<T, TypeConstraintError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.add_constraint(field, e);
            None
        }
    }
}

const MUST_BE_STRING: &str = "must be a string";
const MUST_BE_BOOLEAN: &str = "must be a boolean value";

fn text(errors: &mut FieldErrors, field: &str, value: Option<Typed<String>>) -> Option<String> {
    value?.accept(errors, field, MUST_BE_STRING)
}

fn flag(errors: &mut FieldErrors, field: &str, value: Option<Typed<bool>>) -> Option<bool> {
    value?.accept(errors, field, MUST_BE_BOOLEAN)
}

/// `POST /category` body. Fields are typed loosely so that missing and
/// mistyped values are reported per field.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCategoryForm {
    #[validate(required(message = "id should not be null or undefined"))]
    pub id: Option<Typed<String>>,
    #[validate(required(message = "slug should not be null or undefined"))]
    pub slug: Option<Typed<String>>,
    #[validate(required(message = "name should not be null or undefined"))]
    pub name: Option<Typed<String>>,
    pub description: Option<Typed<String>>,
    #[validate(required(message = "active should not be null or undefined"))]
    pub active: Option<Typed<bool>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryFormPayload {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub active: bool,
}

impl CreateCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            id: self.id,
            slug: self.slug,
            name: self.name,
            description: self.description,
            active: self.active,
            created_date: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        let mut errors = value
            .validate()
            .err()
            .map(FieldErrors::from)
            .unwrap_or_default();

        let id = text(&mut errors, "id", value.id)
            .and_then(|id| convert(&mut errors, "id", CategoryId::new(id)));
        let slug = text(&mut errors, "slug", value.slug)
            .and_then(|slug| convert(&mut errors, "slug", CategorySlug::new(slug)));
        let name = text(&mut errors, "name", value.name)
            .and_then(|name| convert(&mut errors, "name", CategoryName::new(name)));
        let description = match text(&mut errors, "description", value.description) {
            Some(description) => convert(
                &mut errors,
                "description",
                CategoryDescription::new(description).map(Some),
            ),
            None => Some(None),
        };
        let active = flag(&mut errors, "active", value.active);

        match (id, slug, name, description, active) {
            (Some(id), Some(slug), Some(name), Some(description), Some(active))
                if errors.is_empty() =>
            {
                Ok(Self {
                    id,
                    slug,
                    name,
                    description,
                    active,
                })
            }
            _ => Err(CategoryFormError::Validation(errors)),
        }
    }
}

/// Partial update body. `id` is accepted only when it repeats the path id.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCategoryForm {
    pub id: Option<Typed<String>>,
    pub slug: Option<Typed<String>>,
    pub name: Option<Typed<String>>,
    pub description: Option<Typed<String>>,
    pub active: Option<Typed<bool>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub update: CategoryUpdate,
}

impl UpdateCategoryForm {
    /// Validate the body against the category addressed by `category_id`.
    pub fn into_payload(
        self,
        category_id: impl Into<String>,
    ) -> Result<UpdateCategoryFormPayload, CategoryFormError> {
        let mut errors = FieldErrors::new();
        let category_id = convert(&mut errors, "id", CategoryId::new(category_id));

        let body_id = text(&mut errors, "id", self.id);
        if let (Some(body_id), Some(path_id)) = (&body_id, &category_id) {
            if body_id.trim() != path_id.as_str() {
                errors.add("id", "id cannot be changed");
            }
        }

        let slug = text(&mut errors, "slug", self.slug)
            .and_then(|slug| convert(&mut errors, "slug", CategorySlug::new(slug)));
        let name = text(&mut errors, "name", self.name)
            .and_then(|name| convert(&mut errors, "name", CategoryName::new(name)));
        let description = text(&mut errors, "description", self.description).and_then(
            |description| {
                convert(
                    &mut errors,
                    "description",
                    CategoryDescription::new(description),
                )
            },
        );
        let active = flag(&mut errors, "active", self.active);

        match category_id {
            Some(category_id) if errors.is_empty() => Ok(UpdateCategoryFormPayload {
                category_id,
                update: CategoryUpdate {
                    slug,
                    name,
                    description,
                    active,
                },
            }),
            _ => Err(CategoryFormError::Validation(errors)),
        }
    }
}

/// Raw `GET /category` query string. Every value arrives as text.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryFilterQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Empty (or blank) parameters behave as if they were omitted.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_active(value: &str) -> Result<bool, String> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err("active must be one of the following values: 0, 1, false, true".to_string()),
    }
}

fn parse_count<T>(
    value: &str,
    field: &str,
    build: impl FnOnce(usize) -> Result<T, TypeConstraintError>,
) -> Result<T, String> {
    let number: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{field} must be an integer number"))?;
    if number < 1 {
        return Err(format!("{field} must not be less than 1"));
    }
    let number = usize::try_from(number).map_err(|_| format!("{field} is out of range"))?;
    build(number).map_err(|e| e.to_string())
}

impl TryFrom<CategoryFilterQuery> for CategoryListQuery {
    type Error = CategoryFormError;

    fn try_from(value: CategoryFilterQuery) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let mut query = CategoryListQuery::default();

        if let Some(name) = present(value.name) {
            if let Some(term) = convert(&mut errors, "name", SearchTerm::new(name)) {
                query = query.name(term);
            }
        }
        if let Some(description) = present(value.description) {
            if let Some(term) = convert(&mut errors, "description", SearchTerm::new(description))
            {
                query = query.description(term);
            }
        }
        if let Some(search) = present(value.search) {
            if let Some(term) = convert(&mut errors, "search", SearchTerm::new(search)) {
                query = query.search(term);
            }
        }
        if let Some(active) = present(value.active) {
            match parse_active(&active) {
                Ok(active) => query = query.active(active),
                Err(message) => errors.add("active", message),
            }
        }
        if let Some(sort) = present(value.sort) {
            if let Some(sort) = convert(&mut errors, "sort", sort.parse::<CategorySort>()) {
                query = query.sort(sort);
            }
        }

        let page = match value.page {
            Some(page) => parse_count(&page, "page", PageNumber::new)
                .map_err(|message| errors.add("page", message))
                .ok(),
            None => Some(PageNumber::default()),
        };
        let page_size = match value.page_size {
            Some(page_size) => parse_count(&page_size, "pageSize", PageSize::new)
                .map_err(|message| errors.add("pageSize", message))
                .ok(),
            None => Some(PageSize::default()),
        };

        match (page, page_size) {
            (Some(page), Some(page_size)) if errors.is_empty() => {
                Ok(query.paginate(page, page_size))
            }
            _ => Err(CategoryFormError::Validation(errors)),
        }
    }
}
