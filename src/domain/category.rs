use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryDescription, CategoryId, CategoryName, CategorySlug};

/// Canonical category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub active: bool,
    pub created_date: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub active: bool,
    pub created_date: NaiveDateTime,
}

impl From<NewCategory> for Category {
    fn from(value: NewCategory) -> Self {
        Self {
            id: value.id,
            slug: value.slug,
            name: value.name,
            description: value.description,
            active: value.active,
            created_date: value.created_date,
        }
    }
}

/// Partial update of a [`Category`]; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryUpdate {
    pub slug: Option<CategorySlug>,
    pub name: Option<CategoryName>,
    pub description: Option<CategoryDescription>,
    pub active: Option<bool>,
}

impl CategoryUpdate {
    /// Whether applying the update would alter any field of `category`.
    pub fn changes(&self, category: &Category) -> bool {
        self.slug.as_ref().is_some_and(|slug| *slug != category.slug)
            || self.name.as_ref().is_some_and(|name| *name != category.name)
            || self
                .description
                .as_ref()
                .is_some_and(|description| category.description.as_ref() != Some(description))
            || self.active.is_some_and(|active| active != category.active)
    }

    /// Apply the changes to an in-memory record.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(slug) = &self.slug {
            category.slug = slug.clone();
        }
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = Some(description.clone());
        }
        if let Some(active) = self.active {
            category.active = active;
        }
    }
}
