use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, CategorySortField, SortDirection};
use crate::models::category::{
    Category as DbCategory, CategoryChangeset, NewCategory as DbNewCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, TextMatch,
};

const LIKE_ESCAPE: char = '\\';

/// Build a `LIKE` pattern matching `folded` anywhere, with wildcards escaped.
fn contains_pattern(folded: &str) -> String {
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for ch in folded.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl CategoryReader for DieselRepository {
    fn list_categories(&self, query: &CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        // A window past `i64::MAX` records cannot hold anything.
        let Some(offset) = query
            .window
            .offset()
            .and_then(|offset| i64::try_from(offset).ok())
        else {
            return Ok(Vec::new());
        };
        let limit = i64::try_from(query.window.limit()).unwrap_or(i64::MAX);

        let mut conn = self.conn()?;

        let mut items = categories::table
            .select(DbCategory::as_select())
            .into_boxed::<Sqlite>();

        match query.text_match() {
            TextMatch::Any(term) => {
                let pattern = contains_pattern(&term.folded());
                items = items.filter(
                    categories::name_folded
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(categories::description_folded
                            .like(pattern)
                            .escape(LIKE_ESCAPE)),
                );
            }
            TextMatch::Fields { name, description } => {
                if let Some(term) = name {
                    items = items.filter(
                        categories::name_folded
                            .like(contains_pattern(&term.folded()))
                            .escape(LIKE_ESCAPE),
                    );
                }
                if let Some(term) = description {
                    items = items.filter(
                        categories::description_folded
                            .like(contains_pattern(&term.folded()))
                            .escape(LIKE_ESCAPE),
                    );
                }
            }
        }

        if let Some(active) = query.active {
            items = items.filter(categories::active.eq(active));
        }

        items = match (query.sort.field, query.sort.direction) {
            (CategorySortField::Id, SortDirection::Asc) => items.order_by(categories::id.asc()),
            (CategorySortField::Id, SortDirection::Desc) => items.order_by(categories::id.desc()),
            (CategorySortField::Slug, SortDirection::Asc) => {
                items.order_by(categories::slug.asc())
            }
            (CategorySortField::Slug, SortDirection::Desc) => {
                items.order_by(categories::slug.desc())
            }
            (CategorySortField::Name, SortDirection::Asc) => {
                items.order_by(categories::name.asc())
            }
            (CategorySortField::Name, SortDirection::Desc) => {
                items.order_by(categories::name.desc())
            }
            (CategorySortField::Description, SortDirection::Asc) => {
                items.order_by(categories::description.asc())
            }
            (CategorySortField::Description, SortDirection::Desc) => {
                items.order_by(categories::description.desc())
            }
            (CategorySortField::Active, SortDirection::Asc) => {
                items.order_by(categories::active.asc())
            }
            (CategorySortField::Active, SortDirection::Desc) => {
                items.order_by(categories::active.desc())
            }
            (CategorySortField::CreatedDate, SortDirection::Asc) => {
                items.order_by(categories::created_date.asc())
            }
            (CategorySortField::CreatedDate, SortDirection::Desc) => {
                items.order_by(categories::created_date.desc())
            }
        };

        let items = items
            .then_order_by(categories::id.asc())
            .offset(offset)
            .limit(limit)
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_category(
        &self,
        id: &CategoryId,
        update: &CategoryUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Counts modified records: a patch that changes nothing reports 0.
        let modified = conn.transaction::<_, RepositoryError, _>(|conn| {
            let current = categories::table
                .filter(categories::id.eq(id.as_str()))
                .select(DbCategory::as_select())
                .first::<DbCategory>(conn)
                .optional()?;

            let Some(current) = current else {
                return Ok(0);
            };
            let current: Category = current.try_into()?;
            if !update.changes(&current) {
                return Ok(0);
            }

            let changeset: CategoryChangeset = update.clone().into();
            let affected =
                diesel::update(categories::table.filter(categories::id.eq(id.as_str())))
                    .set(changeset)
                    .execute(conn)?;
            Ok(affected)
        })?;

        Ok(modified)
    }

    fn delete_category(&self, id: &CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.filter(categories::id.eq(id.as_str())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
