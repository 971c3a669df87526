use std::cell::RefCell;
use std::cmp::Ordering;

use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, CategorySortField, SortDirection};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: RefCell<Vec<Category>>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: RefCell::new(categories),
        }
    }

    pub fn snapshot(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    fn compare(field: CategorySortField, a: &Category, b: &Category) -> Ordering {
        match field {
            CategorySortField::Id => a.id.cmp(&b.id),
            CategorySortField::Slug => a.slug.cmp(&b.slug),
            CategorySortField::Name => a.name.cmp(&b.name),
            CategorySortField::Description => a.description.cmp(&b.description),
            CategorySortField::Active => a.active.cmp(&b.active),
            CategorySortField::CreatedDate => a.created_date.cmp(&b.created_date),
        }
    }

    fn collides(&self, id: Option<&str>, slug: Option<&str>, skip: Option<&str>) -> bool {
        self.categories.borrow().iter().any(|c| {
            skip.is_none_or(|skip| c.id.as_str() != skip)
                && (id == Some(c.id.as_str()) || slug == Some(c.slug.as_str()))
        })
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self, query: &CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        let Some(offset) = query.window.offset() else {
            return Ok(Vec::new());
        };
        let mut items: Vec<Category> = self
            .categories
            .borrow()
            .iter()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            let primary = match query.sort.direction {
                SortDirection::Asc => Self::compare(query.sort.field, a, b),
                SortDirection::Desc => Self::compare(query.sort.field, b, a),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });

        Ok(items
            .into_iter()
            .skip(offset)
            .take(query.window.limit())
            .collect())
    }

    fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned())
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.slug.as_str() == slug)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        if self.collides(Some(category.id.as_str()), Some(category.slug.as_str()), None) {
            return Err(RepositoryError::UniqueViolation(
                "categories.id, categories.slug".into(),
            ));
        }
        let created: Category = category.clone().into();
        self.categories.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_category(
        &self,
        id: &CategoryId,
        update: &CategoryUpdate,
    ) -> RepositoryResult<usize> {
        let slug = update.slug.as_ref().map(|s| s.as_str());
        if self.collides(None, slug, Some(id.as_str())) {
            return Err(RepositoryError::UniqueViolation("categories.slug".into()));
        }

        let mut categories = self.categories.borrow_mut();
        match categories.iter_mut().find(|c| c.id == *id) {
            Some(category) if update.changes(category) => {
                update.apply_to(category);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    fn delete_category(&self, id: &CategoryId) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let before = categories.len();
        categories.retain(|c| c.id != *id);
        Ok(before - categories.len())
    }
}
