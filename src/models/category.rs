use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryUpdate as DomainCategoryUpdate,
    NewCategory as DomainNewCategory,
};
use crate::domain::types::{
    CategoryDescription, CategoryId, CategoryName, CategorySlug, TypeConstraintError,
    fold_for_search,
};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_date: NaiveDateTime,
    pub name_folded: String,
    pub description_folded: Option<String>,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_date: NaiveDateTime,
    pub name_folded: String,
    pub description_folded: Option<String>,
}

/// Patchable subset of [`Category`]; `None` columns are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangeset {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub name_folded: Option<String>,
    pub description_folded: Option<String>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(category.id)?,
            slug: CategorySlug::new(category.slug)?,
            name: CategoryName::new(category.name)?,
            description: category
                .description
                .map(CategoryDescription::new)
                .transpose()?,
            active: category.active,
            created_date: category.created_date,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        let name_folded = fold_for_search(category.name.as_str());
        let description_folded = category
            .description
            .as_ref()
            .map(|description| fold_for_search(description.as_str()));

        Self {
            id: category.id.into_inner(),
            slug: category.slug.into_inner(),
            name: category.name.into_inner(),
            description: category.description.map(CategoryDescription::into_inner),
            active: category.active,
            created_date: category.created_date,
            name_folded,
            description_folded,
        }
    }
}

impl From<DomainCategoryUpdate> for CategoryChangeset {
    fn from(update: DomainCategoryUpdate) -> Self {
        Self {
            name_folded: update.name.as_ref().map(|name| fold_for_search(name)),
            description_folded: update
                .description
                .as_ref()
                .map(|description| fold_for_search(description)),
            slug: update.slug.map(CategorySlug::into_inner),
            name: update.name.map(CategoryName::into_inner),
            description: update.description.map(CategoryDescription::into_inner),
            active: update.active,
        }
    }
}
