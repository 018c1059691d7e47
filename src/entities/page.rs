// entities/page.rs
use sea_orm::entity::prelude::*;

use crate::status::PageStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Template (blade) the page is rendered with.
    pub name: String,
    pub imagefile: Option<String>,
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub is_focus: bool,
    pub is_pinned: bool,
    pub rank_focus: Option<i32>,
    pub rank_pinned: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::page_tag::Entity")]
    PageTag,
}

impl Related<super::page_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PageTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::page_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::page_tag::Relation::Page.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored status values outside the known set read back as `None`.
    pub fn status(&self) -> Option<PageStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Public link of the page, derived from the template name.
    pub fn full_url(&self, site_url: &str) -> String {
        format!("{}/{}", site_url.trim_end_matches('/'), self.name)
    }

    /// `full_url` as an HTML anchor for the detail view.
    pub fn full_link(&self, site_url: &str) -> String {
        let url = escape_html(&self.full_url(site_url));
        format!(r#"<a href="{url}" target="_blank">{url}</a>"#)
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
