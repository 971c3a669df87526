use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{
    CategoryId, CategorySort, PageNumber, PageSize, PageWindow, SearchTerm, fold_for_search,
};

pub mod category;
pub mod errors;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing categories.
///
/// `search` wins over `name`/`description`; `active` always applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryListQuery {
    /// Substring of the name.
    pub name: Option<SearchTerm>,
    /// Substring of the description.
    pub description: Option<SearchTerm>,
    /// Exact match on the active flag.
    pub active: Option<bool>,
    /// Substring of either the name or the description.
    pub search: Option<SearchTerm>,
    /// Ordering applied before paging.
    pub sort: CategorySort,
    /// Offset/limit window.
    pub window: PageWindow,
}

/// Text conditions left after resolving `search` precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextMatch<'a> {
    /// Name OR description contains the term.
    Any(&'a SearchTerm),
    /// Independent conditions combined with AND.
    Fields {
        name: Option<&'a SearchTerm>,
        description: Option<&'a SearchTerm>,
    },
}

impl CategoryListQuery {
    /// Match categories whose name contains `name`.
    pub fn name(mut self, name: SearchTerm) -> Self {
        self.name = Some(name);
        self
    }
    /// Match categories whose description contains `description`.
    pub fn description(mut self, description: SearchTerm) -> Self {
        self.description = Some(description);
        self
    }
    /// Keep only categories with the given active flag.
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
    /// Match name or description, overriding `name` and `description`.
    pub fn search(mut self, search: SearchTerm) -> Self {
        self.search = Some(search);
        self
    }
    /// Order the listing by `sort`.
    pub fn sort(mut self, sort: CategorySort) -> Self {
        self.sort = sort;
        self
    }
    /// Return the `page`-th window of `page_size` records.
    pub fn paginate(mut self, page: PageNumber, page_size: PageSize) -> Self {
        self.window = PageWindow::new(page, page_size);
        self
    }

    /// Resolve `search` precedence into the text conditions to apply.
    pub fn text_match(&self) -> TextMatch<'_> {
        match &self.search {
            Some(search) => TextMatch::Any(search),
            None => TextMatch::Fields {
                name: self.name.as_ref(),
                description: self.description.as_ref(),
            },
        }
    }

    /// Whether `category` satisfies every condition of the query.
    ///
    /// Mirrors the SQL built by [`DieselRepository`], for in-memory callers.
    pub fn matches(&self, category: &Category) -> bool {
        let contains = |value: Option<&str>, term: &SearchTerm| -> bool {
            value.is_some_and(|value| fold_for_search(value).contains(&term.folded()))
        };
        let name = Some(category.name.as_str());
        let description = category.description.as_ref().map(|d| d.as_str());

        let text_ok = match self.text_match() {
            TextMatch::Any(term) => contains(name, term) || contains(description, term),
            TextMatch::Fields {
                name: name_term,
                description: description_term,
            } => {
                name_term.is_none_or(|term| contains(name, term))
                    && description_term.is_none_or(|term| contains(description, term))
            }
        };

        text_ok && self.active.is_none_or(|active| category.active == active)
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories matching the filter, sorted and paged.
    fn list_categories(&self, query: &CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its slug.
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;

    /// Look the key up as an identifier first and as a slug second.
    fn get_category_by_id_or_slug(&self, key: &str) -> RepositoryResult<Option<Category>> {
        match self.get_category_by_id(key)? {
            Some(category) => Ok(Some(category)),
            None => self.get_category_by_slug(key),
        }
    }
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Apply a partial update; returns the number of modified records.
    ///
    /// A missing record and a patch equal to the stored values both report 0.
    fn update_category(&self, id: &CategoryId, update: &CategoryUpdate)
    -> RepositoryResult<usize>;
    /// Delete a category; returns the number of removed records.
    fn delete_category(&self, id: &CategoryId) -> RepositoryResult<usize>;
}
