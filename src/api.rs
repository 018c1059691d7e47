// api.rs
use std::sync::Arc;

use poem::{
    Endpoint, EndpointExt, Route,
    middleware::{Cors, Tracing},
};
use poem_openapi::{
    Object, OpenApi, OpenApiService,
    param::{Path, Query},
    payload::Json,
};
use serde::Serialize;

use crate::entities::tag;
use crate::error::AdminError;
use crate::forms::{PageForm, TagForm};
use crate::resource::{
    LogicalPage, PageResource, Resource, SortDirection, TableSchema,
    render::{JsonRenderer, render_resource},
};
use crate::state::AppState;
use crate::status::PageStatus;
use crate::store::{ListQuery, PageList, PageWithTags};

#[derive(Debug, Clone, PartialEq, Object, Serialize)]
struct TagOption {
    id: i32,
    name: String,
}

impl From<tag::Model> for TagOption {
    fn from(tag: tag::Model) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Object, Serialize)]
struct PageRecord {
    id: i32,
    name: String,
    imagefile: Option<String>,
    title: String,
    description: String,
    status: Option<PageStatus>,
    tags: Vec<TagOption>,
    is_focus: bool,
    is_pinned: bool,
    rank_focus: Option<i32>,
    rank_pinned: Option<i32>,
    /// Icon and colour of the status cell in the list table.
    status_icon: Option<String>,
    status_color: Option<String>,
    /// Derived public link of the page.
    full_url: String,
    updated_at: String,
}

impl PageRecord {
    fn new(row: PageWithTags, site_url: &str, table: &TableSchema) -> Self {
        let PageWithTags { page, tags } = row;
        let status = page.status();
        let (status_icon, status_color) = table
            .column("status")
            .and_then(|column| column.icon_for(&status.map(PageStatus::as_str).into()))
            .map(|(icon, color)| {
                (
                    Some(icon).filter(|i| !i.is_empty()).map(str::to_string),
                    Some(color.to_string()),
                )
            })
            .unwrap_or_default();
        Self {
            status,
            status_icon,
            status_color,
            full_url: page.full_url(site_url),
            updated_at: page.updated_at.to_rfc3339(),
            id: page.id,
            name: page.name,
            imagefile: page.imagefile,
            title: page.title,
            description: page.description,
            tags: tags.into_iter().map(TagOption::from).collect(),
            is_focus: page.is_focus,
            is_pinned: page.is_pinned,
            rank_focus: page.rank_focus,
            rank_pinned: page.rank_pinned,
        }
    }
}

#[derive(Debug, Object)]
struct PageListResponse {
    items: Vec<PageRecord>,
    total: u64,
    page: u64,
    per_page: u64,
    total_pages: u64,
}

#[derive(Debug, Object)]
struct BulkDeleteRequest {
    ids: Vec<i32>,
}

#[derive(Debug, Object)]
struct BulkDeleteResponse {
    deleted: u64,
}

#[derive(Debug, Object)]
struct NavigationItem {
    label: String,
    icon: String,
    url: String,
    /// Total record count, rendered next to the menu entry.
    badge: Option<String>,
}

#[derive(Debug, Object)]
struct ResolvedRoute {
    page: String,
    record: Option<String>,
}

struct Api {
    state: Arc<AppState>,
    table: TableSchema,
}

impl Api {
    fn site_url(&self) -> &str {
        &self.state.config.site.url
    }

    fn record(&self, row: PageWithTags) -> PageRecord {
        PageRecord::new(row, self.site_url(), &self.table)
    }

    fn records(&self, list: PageList) -> PageListResponse {
        let total_pages = list.total_pages();
        PageListResponse {
            total: list.total,
            page: list.page,
            per_page: list.per_page,
            total_pages,
            items: list
                .rows
                .into_iter()
                .map(|row| self.record(row))
                .collect(),
        }
    }
}

#[OpenApi]
impl Api {
    /// List pages (filter, sort, paginate)
    #[oai(path = "/pages", method = "get")]
    async fn list_pages(
        &self,
        Query(page): Query<Option<u64>>,
        Query(per_page): Query<Option<u64>>,
        Query(sort): Query<Option<String>>,
        Query(direction): Query<Option<SortDirection>>,
        Query(is_focus): Query<Option<bool>>,
        Query(is_pinned): Query<Option<bool>>,
        Query(status): Query<Option<Vec<PageStatus>>>,
    ) -> poem::Result<Json<PageListResponse>> {
        let toggles = [("is_focus", is_focus), ("is_pinned", is_pinned)]
            .into_iter()
            .filter(|(_, on)| on.unwrap_or(false))
            .map(|(name, _)| name.to_string())
            .collect();
        let query = ListQuery {
            page,
            per_page,
            sort,
            direction,
            toggles,
            statuses: status.unwrap_or_default(),
        };
        let list = self.state.store.list(&query).await?;
        Ok(Json(self.records(list)))
    }

    /// Create a page
    #[oai(path = "/pages", method = "post")]
    async fn create_page(&self, Json(form): Json<PageForm>) -> poem::Result<Json<PageRecord>> {
        let created = self.state.store.create(form).await?;
        Ok(Json(self.record(created)))
    }

    /// Resource descriptor (form, table, infolist, pages)
    #[oai(path = "/pages/schema", method = "get")]
    async fn page_schema(&self) -> poem::Result<Json<serde_json::Value>> {
        let rendered = render_resource(&PageResource, &JsonRenderer).map_err(internal)?;
        Ok(Json(serde_json::to_value(rendered).map_err(internal)?))
    }

    /// Match an admin page path to its logical page
    #[oai(path = "/pages/resolve", method = "get")]
    async fn resolve_page_route(
        &self,
        Query(path): Query<String>,
    ) -> poem::Result<Json<ResolvedRoute>> {
        let (page, record) = PageResource
            .pages()
            .resolve(&path)
            .ok_or(AdminError::NotFound("route"))?;
        Ok(Json(ResolvedRoute {
            page: page.as_str().to_string(),
            record,
        }))
    }

    /// Bulk delete the selected pages
    #[oai(path = "/pages/bulk-delete", method = "post")]
    async fn bulk_delete_pages(
        &self,
        Json(input): Json<BulkDeleteRequest>,
    ) -> poem::Result<Json<BulkDeleteResponse>> {
        let deleted = self.state.store.bulk_delete(&input.ids).await?;
        Ok(Json(BulkDeleteResponse { deleted }))
    }

    /// Fetch one page (edit form data)
    #[oai(path = "/pages/:id", method = "get")]
    async fn get_page(&self, Path(id): Path<i32>) -> poem::Result<Json<PageRecord>> {
        let row = self.state.store.get(id).await?;
        Ok(Json(self.record(row)))
    }

    /// Replace a page with the submitted edit form
    #[oai(path = "/pages/:id", method = "put")]
    async fn update_page(
        &self,
        Path(id): Path<i32>,
        Json(form): Json<PageForm>,
    ) -> poem::Result<Json<PageRecord>> {
        let updated = self.state.store.update(id, form).await?;
        Ok(Json(self.record(updated)))
    }

    /// Read-only detail view filled from the infolist
    #[oai(path = "/pages/:id/view", method = "get")]
    async fn view_page(&self, Path(id): Path<i32>) -> poem::Result<Json<serde_json::Value>> {
        let row = self.state.store.get(id).await?;
        let link = row.page.full_link(self.site_url());
        let mut record = serde_json::to_value(self.record(row)).map_err(internal)?;
        record["full_url"] = link.into();
        let entries = PageResource.infolist().fill(&record);
        Ok(Json(serde_json::to_value(entries).map_err(internal)?))
    }

    /// Navigation entries with record-count badges
    #[oai(path = "/navigation", method = "get")]
    async fn navigation(&self) -> poem::Result<Json<Vec<NavigationItem>>> {
        let count = self.state.store.count().await?;
        let index = PageResource
            .pages()
            .url(LogicalPage::Index, None)
            .unwrap_or_default();
        Ok(Json(vec![NavigationItem {
            label: PageResource.label().to_string(),
            icon: PageResource.navigation_icon().to_string(),
            url: format!("/{}{}", PageResource.slug(), index.trim_end_matches('/')),
            badge: Some(count.to_string()),
        }]))
    }

    /// Tag options for the page form
    #[oai(path = "/tags", method = "get")]
    async fn list_tags(&self) -> poem::Result<Json<Vec<TagOption>>> {
        let tags = self.state.store.tags().await?;
        Ok(Json(tags.into_iter().map(TagOption::from).collect()))
    }

    /// Create a tag
    #[oai(path = "/tags", method = "post")]
    async fn create_tag(&self, Json(form): Json<TagForm>) -> poem::Result<Json<TagOption>> {
        let tag = self.state.store.create_tag(form).await?;
        Ok(Json(tag.into()))
    }
}

fn internal(e: impl std::fmt::Display) -> poem::Error {
    poem::Error::from_string(e.to_string(), poem::http::StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn routes(state: Arc<AppState>) -> impl Endpoint {
    let api = OpenApiService::new(
        Api {
            state,
            table: PageResource.table(),
        },
        "Page Admin API",
        "1.0",
    )
    .server("/api");
    let ui = api.swagger_ui();

    Route::new()
        .nest("/api", api)
        .nest("/", ui)
        .with(Cors::new())
        .with(Tracing)
}
