use category_api::domain::category::CategoryUpdate;
use category_api::domain::types::{
    CategoryId, CategoryName, CategorySlug, CategorySort, PageNumber, PageSize, SearchTerm,
};
use category_api::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, RepositoryError,
};

mod common;

use common::new_category;

fn seeded_repo(test_db: &common::TestDb) -> DieselRepository {
    let repo = DieselRepository::new(test_db.pool());
    for category in [
        new_category("1", "honey", "Мёд", Some("Липовый"), true, 10),
        new_category("2", "tea", "Чай", Some("Зелёный чай"), true, 20),
        new_category("3", "coffee", "Кофе", None, false, 30),
    ] {
        repo.create_category(&category)
            .expect("should create category");
    }
    repo
}

fn ids(query: &CategoryListQuery, repo: &DieselRepository) -> Vec<String> {
    repo.list_categories(query)
        .expect("should list categories")
        .into_iter()
        .map(|c| c.id.into_inner())
        .collect()
}

fn term(value: &str) -> SearchTerm {
    SearchTerm::new(value).expect("valid search term")
}

#[test]
fn create_returns_stored_record() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_category(&new_category("1", "honey", "Мёд", None, true, 10))
        .expect("should create category");

    assert_eq!(created.id, "1");
    assert_eq!(created.name, "Мёд");
    assert!(created.description.is_none());
    assert_eq!(created.created_date, common::timestamp(10));
}

#[test]
fn duplicate_id_or_slug_is_a_unique_violation() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    repo.create_category(&new_category("1", "slug-1", "name-1", None, true, 10))
        .expect("should create category");

    let same_id = repo.create_category(&new_category("1", "slug-2", "name-1", None, true, 11));
    let same_slug = repo.create_category(&new_category("2", "slug-1", "name-1", None, true, 12));

    assert!(matches!(same_id, Err(RepositoryError::UniqueViolation(_))));
    assert!(matches!(same_slug, Err(RepositoryError::UniqueViolation(_))));
}

#[test]
fn default_listing_pages_newest_first() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    assert_eq!(ids(&CategoryListQuery::default(), &repo), vec!["3", "2"]);

    let second_page = CategoryListQuery::default().paginate(
        PageNumber::new(2).unwrap(),
        PageSize::new(2).unwrap(),
    );
    assert_eq!(ids(&second_page, &repo), vec!["1"]);
}

#[test]
fn pages_beyond_any_offset_are_empty() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    let past_i64 = CategoryListQuery::default().paginate(
        PageNumber::new(i64::MAX as usize).unwrap(),
        PageSize::new(2).unwrap(),
    );
    assert!(ids(&past_i64, &repo).is_empty());

    let past_usize = CategoryListQuery::default().paginate(
        PageNumber::new(usize::MAX).unwrap(),
        PageSize::new(usize::MAX).unwrap(),
    );
    assert!(ids(&past_usize, &repo).is_empty());
}

#[test]
fn sorts_ascending_by_requested_field() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    let sort: CategorySort = "slug".parse().unwrap();
    let query = CategoryListQuery::default()
        .sort(sort)
        .paginate(PageNumber::new(1).unwrap(), PageSize::new(10).unwrap());

    assert_eq!(ids(&query, &repo), vec!["3", "1", "2"]);
}

#[test]
fn filters_by_active_flag() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    let query = CategoryListQuery::default().active(false);
    assert_eq!(ids(&query, &repo), vec!["3"]);
}

#[test]
fn name_matching_is_case_insensitive_and_yo_tolerant() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    assert_eq!(ids(&CategoryListQuery::default().name(term("мед")), &repo), vec!["1"]);
    assert_eq!(ids(&CategoryListQuery::default().name(term("МЁД")), &repo), vec!["1"]);
    assert_eq!(ids(&CategoryListQuery::default().name(term("ЧА")), &repo), vec!["2"]);
}

#[test]
fn name_and_description_combine() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    let both = CategoryListQuery::default()
        .name(term("чай"))
        .description(term("зелен"));
    assert_eq!(ids(&both, &repo), vec!["2"]);

    let disjoint = CategoryListQuery::default()
        .name(term("мед"))
        .description(term("зелен"));
    assert!(ids(&disjoint, &repo).is_empty());
}

#[test]
fn search_matches_either_field_and_overrides_name() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    let query = CategoryListQuery::default()
        .name(term("кофе"))
        .search(term("липов"));
    assert_eq!(ids(&query, &repo), vec!["1"]);
}

#[test]
fn wildcards_in_terms_match_literally() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    assert!(ids(&CategoryListQuery::default().search(term("%")), &repo).is_empty());
    assert!(ids(&CategoryListQuery::default().search(term("_")), &repo).is_empty());
}

#[test]
fn finds_by_id_before_slug() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    repo.create_category(&new_category("1", "honey", "Мёд", None, true, 10))
        .unwrap();
    repo.create_category(&new_category("honey", "other", "Other", None, true, 20))
        .unwrap();

    let by_id = repo.get_category_by_id_or_slug("honey").unwrap().unwrap();
    assert_eq!(by_id.name, "Other");

    let by_slug = repo.get_category_by_id_or_slug("other").unwrap().unwrap();
    assert_eq!(by_slug.id, "honey");

    assert!(repo.get_category_by_id_or_slug("missing").unwrap().is_none());
}

#[test]
fn partial_update_touches_only_supplied_fields() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);
    let id = CategoryId::new("1").unwrap();

    let update = CategoryUpdate {
        name: Some(CategoryName::new("Акациевый мёд").unwrap()),
        ..Default::default()
    };
    assert_eq!(repo.update_category(&id, &update).unwrap(), 1);

    let updated = repo.get_category_by_id("1").unwrap().unwrap();
    assert_eq!(updated.name, "Акациевый мёд");
    assert_eq!(updated.slug, "honey");
    assert!(updated.active);

    // The folded column follows the new name.
    let query = CategoryListQuery::default().name(term("акациевый"));
    assert_eq!(ids(&query, &repo), vec!["1"]);
}

#[test]
fn update_reports_missing_records_and_slug_collisions() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);

    let activate = CategoryUpdate {
        active: Some(true),
        ..Default::default()
    };
    assert_eq!(
        repo.update_category(&CategoryId::new("42").unwrap(), &activate)
            .unwrap(),
        0
    );
    assert_eq!(
        repo.update_category(&CategoryId::new("42").unwrap(), &CategoryUpdate::default())
            .unwrap(),
        0
    );

    let steal_slug = CategoryUpdate {
        slug: Some(CategorySlug::new("tea").unwrap()),
        ..Default::default()
    };
    let result = repo.update_category(&CategoryId::new("1").unwrap(), &steal_slug);
    assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
}

#[test]
fn update_reports_zero_when_nothing_changes() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);
    let id = CategoryId::new("1").unwrap();

    assert_eq!(
        repo.update_category(&id, &CategoryUpdate::default()).unwrap(),
        0
    );

    let same_values = CategoryUpdate {
        slug: Some(CategorySlug::new("honey").unwrap()),
        active: Some(true),
        ..Default::default()
    };
    assert_eq!(repo.update_category(&id, &same_values).unwrap(), 0);

    let deactivate = CategoryUpdate {
        active: Some(false),
        ..Default::default()
    };
    assert_eq!(repo.update_category(&id, &deactivate).unwrap(), 1);
    assert!(!repo.get_category_by_id("1").unwrap().unwrap().active);
}

#[test]
fn delete_removes_record() {
    let test_db = common::TestDb::new();
    let repo = seeded_repo(&test_db);
    let id = CategoryId::new("2").unwrap();

    assert_eq!(repo.delete_category(&id).unwrap(), 1);
    assert!(repo.get_category_by_id("2").unwrap().is_none());
    assert_eq!(repo.delete_category(&id).unwrap(), 0);
}
