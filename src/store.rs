// ORM-backed page and tag persistence.
use std::str::FromStr;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
    prelude::DateTimeWithTimeZone,
};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::entities::{page, page_tag, tag};
use crate::error::{AdminError, AdminResult};
use crate::forms::{PageForm, TagForm};
use crate::resource::{ActionKind, FilterKind, PageResource, Resource, SortDirection, TableSchema};
use crate::status::PageStatus;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    /// Names of the toggle filters that are switched on.
    pub toggles: Vec<String>,
    pub statuses: Vec<PageStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageWithTags {
    pub page: page::Model,
    pub tags: Vec<tag::Model>,
}

#[derive(Debug, Clone)]
pub struct PageList {
    pub rows: Vec<PageWithTags>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl PageList {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }
}

#[derive(Clone)]
pub struct PageStore {
    db: DatabaseConnection,
    table: TableSchema,
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

/// Maps a declared column or filter name to the ORM column it reads.
fn column_of(field: &'static str, name: &str) -> AdminResult<page::Column> {
    page::Column::from_str(name)
        .map_err(|_| AdminError::invalid(field, format!("'{name}' is not a page column")))
}

impl PageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            table: PageResource.table(),
        }
    }

    /// Lists pages using the filters, sortable columns and default sort the
    /// table declares.
    pub async fn list(&self, query: &ListQuery) -> AdminResult<PageList> {
        let mut select = page::Entity::find();

        for name in &query.toggles {
            let filter = self.table.filter(name).ok_or_else(|| {
                warn!(filter = %name, "rejected undeclared filter");
                AdminError::invalid("filter", format!("unknown filter '{name}'"))
            })?;
            match &filter.kind {
                FilterKind::Toggle { column } => {
                    select = select.filter(column_of("filter", column)?.eq(true));
                }
                FilterKind::Select { .. } => {
                    return Err(AdminError::invalid(
                        "filter",
                        format!("'{name}' is not a toggle filter"),
                    ));
                }
            }
        }

        if !query.statuses.is_empty() {
            let Some(FilterKind::Select { column, .. }) =
                self.table.filter("status").map(|f| &f.kind)
            else {
                return Err(AdminError::invalid("filter", "status filter is not declared"));
            };
            select = select.filter(
                column_of("filter", column)?.is_in(query.statuses.iter().map(|s| s.as_str())),
            );
        }

        let (sort, direction) = match query.sort.as_deref() {
            Some(name) if self.table.is_sortable(name) => {
                (name, query.direction.unwrap_or_default())
            }
            Some(name) => {
                warn!(sort = %name, "rejected unsortable column");
                return Err(AdminError::invalid(
                    "sort",
                    format!("column '{name}' is not sortable"),
                ));
            }
            None => match &self.table.default_sort {
                Some(default) => (default.column.as_str(), default.direction),
                None => ("id", SortDirection::Asc),
            },
        };
        let order = match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        select = select
            .order_by(column_of("sort", sort)?, order)
            .order_by_asc(page::Column::Id);

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        // The row offset is bound as a signed 64-bit SQL integer.
        per_page
            .checked_mul(page - 1)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or_else(|| {
                warn!(page, per_page, "rejected out-of-range page");
                AdminError::invalid("page", format!("page {page} is out of range"))
            })?;
        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let pages = paginator.fetch_page(page - 1).await?;
        let tags = pages
            .load_many_to_many(tag::Entity, page_tag::Entity, &self.db)
            .await?;

        debug!(total, page, per_page, sort, "listed pages");
        Ok(PageList {
            rows: pages
                .into_iter()
                .zip(tags)
                .map(|(page, mut tags)| {
                    tags.sort_by(|a, b| a.name.cmp(&b.name));
                    PageWithTags { page, tags }
                })
                .collect(),
            total,
            page,
            per_page,
        })
    }

    pub async fn get(&self, id: i32) -> AdminResult<PageWithTags> {
        let page = page::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AdminError::NotFound("page"))?;
        let tags = page
            .find_related(tag::Entity)
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?;
        Ok(PageWithTags { page, tags })
    }

    pub async fn create(&self, form: PageForm) -> AdminResult<PageWithTags> {
        let form = form.normalized();
        form.validate()?;

        let txn = self.db.begin().await?;
        let tags = resolve_tags(&txn, &form.tags).await?;
        let stamp = now();
        let model = page::ActiveModel {
            name: Set(form.name),
            imagefile: Set(form.imagefile),
            title: Set(form.title),
            description: Set(form.description),
            status: Set(form.status.map(|s| s.as_str().to_string())),
            is_focus: Set(form.is_focus),
            is_pinned: Set(form.is_pinned),
            rank_focus: Set(form.rank_focus),
            rank_pinned: Set(form.rank_pinned),
            created_at: Set(stamp),
            updated_at: Set(stamp),
            ..Default::default()
        };
        let page = model.insert(&txn).await?;
        replace_tags(&txn, page.id, &tags).await?;
        txn.commit().await?;

        info!(id = page.id, title = %page.title, tags = tags.len(), "page created");
        Ok(PageWithTags { page, tags })
    }

    pub async fn update(&self, id: i32, form: PageForm) -> AdminResult<PageWithTags> {
        let form = form.normalized();
        form.validate()?;

        let txn = self.db.begin().await?;
        let found = page::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AdminError::NotFound("page"))?;
        let tags = resolve_tags(&txn, &form.tags).await?;

        let mut model: page::ActiveModel = found.into();
        model.name = Set(form.name);
        model.imagefile = Set(form.imagefile);
        model.title = Set(form.title);
        model.description = Set(form.description);
        model.status = Set(form.status.map(|s| s.as_str().to_string()));
        model.is_focus = Set(form.is_focus);
        model.is_pinned = Set(form.is_pinned);
        model.rank_focus = Set(form.rank_focus);
        model.rank_pinned = Set(form.rank_pinned);
        model.updated_at = Set(now());
        let page = model.update(&txn).await?;
        replace_tags(&txn, page.id, &tags).await?;
        txn.commit().await?;

        info!(id = page.id, title = %page.title, tags = tags.len(), "page updated");
        Ok(PageWithTags { page, tags })
    }

    /// Deletes the selected pages and their tag links; unknown ids are skipped.
    pub async fn bulk_delete(&self, ids: &[i32]) -> AdminResult<u64> {
        if !self.table.has_bulk_action(ActionKind::Delete) {
            return Err(AdminError::invalid("action", "bulk delete is not declared"));
        }
        if ids.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        page_tag::Entity::delete_many()
            .filter(page_tag::Column::PageId.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;
        let deleted = page::Entity::delete_many()
            .filter(page::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?
            .rows_affected;
        txn.commit().await?;

        info!(requested = ids.len(), deleted, "pages deleted");
        Ok(deleted)
    }

    /// Total number of page rows; shown as the navigation badge.
    pub async fn count(&self) -> AdminResult<u64> {
        Ok(page::Entity::find().count(&self.db).await?)
    }

    pub async fn tags(&self) -> AdminResult<Vec<tag::Model>> {
        Ok(tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn create_tag(&self, form: TagForm) -> AdminResult<tag::Model> {
        let name = form.name.trim().to_string();
        TagForm { name: name.clone() }.validate()?;

        // The unique index on `tags.name` decides duplicates, also between
        // concurrent inserts.
        let tag = tag::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                warn!(name = %name, "rejected duplicate tag");
                AdminError::invalid("name", format!("tag '{name}' already exists"))
            }
            _ => err.into(),
        })?;
        info!(id = tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }
}

/// Loads the tags behind `ids`, failing on the first id with no tag.
async fn resolve_tags<C: ConnectionTrait>(db: &C, ids: &[i32]) -> AdminResult<Vec<tag::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let tags = tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await?;
    if let Some(missing) = ids.iter().find(|id| !tags.iter().any(|t| t.id == **id)) {
        return Err(AdminError::invalid("tags", format!("unknown tag id {missing}")));
    }
    Ok(tags)
}

async fn replace_tags<C: ConnectionTrait>(db: &C, page_id: i32, tags: &[tag::Model]) -> AdminResult<()> {
    page_tag::Entity::delete_many()
        .filter(page_tag::Column::PageId.eq(page_id))
        .exec(db)
        .await?;
    if tags.is_empty() {
        return Ok(());
    }
    page_tag::Entity::insert_many(tags.iter().map(|t| page_tag::ActiveModel {
        page_id: Set(page_id),
        tag_id: Set(t.id),
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::sample_form;
    use crate::state::test_db;
    use rstest::rstest;

    async fn store() -> PageStore {
        PageStore::new(test_db().await)
    }

    async fn tag(store: &PageStore, name: &str) -> tag::Model {
        store
            .create_tag(TagForm {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    fn titles(list: &PageList) -> Vec<&str> {
        list.rows.iter().map(|r| r.page.title.as_str()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn test_default_sort_is_title_ascending() {
        let store = store().await;
        for title in ["B", "A", "C"] {
            store.create(sample_form(title)).await.unwrap();
        }

        let list = store.list(&ListQuery::default()).await.unwrap();

        assert_eq!(titles(&list), ["A", "B", "C"]);
        assert_eq!(list.total, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn test_explicit_sort_descending() {
        let store = store().await;
        for (title, rank) in [("A", 3), ("B", 1), ("C", 2)] {
            let form = PageForm {
                rank_focus: Some(rank),
                ..sample_form(title)
            };
            store.create(form).await.unwrap();
        }

        let list = store
            .list(&ListQuery {
                sort: Some("rank_focus".into()),
                direction: Some(SortDirection::Desc),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(titles(&list), ["A", "C", "B"]);
    }

    #[rstest]
    #[case("description")]
    #[case("tags.name")]
    #[case("nonsense")]
    #[tokio::test]
    async fn test_sort_rejects_undeclared_columns(#[case] column: &str) {
        let store = store().await;
        let err = store
            .list(&ListQuery {
                sort: Some(column.into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidField { field: "sort", .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn test_focus_toggle_keeps_only_focused_pages() {
        let store = store().await;
        store
            .create(PageForm {
                is_focus: true,
                ..sample_form("Home")
            })
            .await
            .unwrap();
        store.create(sample_form("Hidden")).await.unwrap();
        store
            .create(PageForm {
                is_pinned: true,
                ..sample_form("Top")
            })
            .await
            .unwrap();

        let focus = store
            .list(&ListQuery {
                toggles: vec!["is_focus".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&focus), ["Home"]);
        assert!(focus.rows.iter().all(|r| r.page.is_focus));

        let pinned = store
            .list(&ListQuery {
                toggles: vec!["is_pinned".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&pinned), ["Top"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_or_non_toggle_filter_is_rejected() {
        let store = store().await;
        for name in ["is_hidden", "status"] {
            let err = store
                .list(&ListQuery {
                    toggles: vec![name.into()],
                    ..Default::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(err, AdminError::InvalidField { field: "filter", .. }));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_status_filter_matches_any_selected() {
        let store = store().await;
        for (title, status) in [
            ("Draft", Some(PageStatus::Draft)),
            ("Review", Some(PageStatus::Reviewing)),
            ("Live", Some(PageStatus::Published)),
            ("None", None),
        ] {
            store
                .create(PageForm {
                    status,
                    ..sample_form(title)
                })
                .await
                .unwrap();
        }

        let list = store
            .list(&ListQuery {
                statuses: vec![PageStatus::Draft, PageStatus::Published],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(titles(&list), ["Draft", "Live"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_pagination() {
        let store = store().await;
        for title in ["A", "B", "C", "D", "E"] {
            store.create(sample_form(title)).await.unwrap();
        }

        let list = store
            .list(&ListQuery {
                page: Some(2),
                per_page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(titles(&list), ["C", "D"]);
        assert_eq!(list.total, 5);
        assert_eq!(list.total_pages(), 3);

        let clamped = store
            .list(&ListQuery {
                page: Some(0),
                per_page: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, 1);
        assert_eq!(titles(&clamped), ["A"]);
    }

    #[rstest]
    #[case(u64::MAX, None)]
    #[case(u64::MAX / 2, Some(2))]
    #[case(u64::MAX / MAX_PER_PAGE, Some(MAX_PER_PAGE))]
    #[tokio::test]
    async fn test_out_of_range_page_is_rejected(#[case] page: u64, #[case] per_page: Option<u64>) {
        let store = store().await;
        store.create(sample_form("A")).await.unwrap();

        let err = store
            .list(&ListQuery {
                page: Some(page),
                per_page,
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::InvalidField { field: "page", .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let store = store().await;
        store.create(sample_form("A")).await.unwrap();

        let list = store
            .list(&ListQuery {
                page: Some(1_000),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(list.rows.is_empty());
        assert_eq!(list.total, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_links_tags_and_lists_them() {
        let store = store().await;
        let rust = tag(&store, "rust").await;
        let news = tag(&store, "news").await;

        let created = store
            .create(PageForm {
                tags: vec![rust.id, news.id, rust.id],
                ..sample_form("Tagged")
            })
            .await
            .unwrap();
        let names: Vec<_> = created.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["news", "rust"]);

        let list = store.list(&ListQuery::default()).await.unwrap();
        assert_eq!(list.rows[0].tags, created.tags);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_tag_rolls_back_create() {
        let store = store().await;
        let err = store
            .create(PageForm {
                tags: vec![42],
                ..sample_form("Orphan")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::InvalidField { field: "tags", .. }));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_invalid_form_is_not_stored() {
        let store = store().await;
        let err = store
            .create(PageForm {
                name: "x".repeat(51),
                ..sample_form("Long")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_replaces_fields_and_tags() {
        let store = store().await;
        let rust = tag(&store, "rust").await;
        let news = tag(&store, "news").await;
        let created = store
            .create(PageForm {
                tags: vec![rust.id],
                ..sample_form("Old")
            })
            .await
            .unwrap();

        let updated = store
            .update(
                created.page.id,
                PageForm {
                    status: Some(PageStatus::Reviewing),
                    tags: vec![news.id],
                    ..sample_form("New")
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.page.title, "New");
        assert_eq!(updated.page.status(), Some(PageStatus::Reviewing));
        assert_eq!(updated.page.created_at, created.page.created_at);

        let fetched = store.get(created.page.id).await.unwrap();
        assert_eq!(fetched.tags, vec![news]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_page() {
        let store = store().await;
        assert!(matches!(
            store.get(9).await.unwrap_err(),
            AdminError::NotFound("page")
        ));
        assert!(matches!(
            store.update(9, sample_form("x")).await.unwrap_err(),
            AdminError::NotFound("page")
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_bulk_delete_and_count() {
        let store = store().await;
        let rust = tag(&store, "rust").await;
        assert_eq!(store.count().await.unwrap(), 0);

        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            let form = PageForm {
                tags: vec![rust.id],
                ..sample_form(title)
            };
            ids.push(store.create(form).await.unwrap().page.id);
        }
        assert_eq!(store.count().await.unwrap(), 3);

        let deleted = store.bulk_delete(&[ids[0], ids[2], 999]).await.unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.bulk_delete(&[]).await.unwrap(), 0);
        // Deleting pages leaves the tag itself in place.
        assert_eq!(store.tags().await.unwrap(), vec![rust]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_duplicate_tag_is_rejected() {
        let store = store().await;
        tag(&store, "rust").await;
        let err = store
            .create_tag(TagForm {
                name: " rust ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidField { field: "name", .. }));
    }
}
