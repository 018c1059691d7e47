//! Declarative admin resources.
//!
//! A resource describes how one entity is presented in the admin panel: its
//! create/edit form, its list table, its read-only detail view and the routes
//! of its pages. The descriptors are plain data; rendering them is left to a
//! [`render::SchemaRenderer`].

pub mod form;
pub mod infolist;
pub mod page;
pub mod render;
pub mod routes;
pub mod table;

use serde_json::Value;

pub use form::{FormField, FormSchema, SelectOption};
pub use infolist::{Grid, Infolist, TextEntry};
pub use page::PageResource;
pub use routes::{LogicalPage, PageRoutes};
pub use table::{
    Action, ActionKind, ActionsPosition, BulkActionGroup, Column, Filter, FilterKind, IconRule,
    SortDirection, TableSchema,
};

pub trait Resource: Send + Sync {
    /// URL segment the resource pages are mounted under.
    fn slug(&self) -> &'static str;

    /// Plural label used in navigation.
    fn label(&self) -> &'static str;

    fn navigation_icon(&self) -> &'static str;

    fn form(&self) -> FormSchema;

    fn table(&self) -> TableSchema;

    fn infolist(&self) -> Infolist;

    fn pages(&self) -> PageRoutes;
}

/// Reads a possibly dotted attribute path out of a serialized record.
///
/// Arrays are mapped element-wise, so `tags.name` on a record holding a list
/// of tag objects yields the list of tag names.
pub fn extract(record: &Value, path: &str) -> Value {
    let mut current = record.clone();
    for segment in path.split('.') {
        current = match current {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| item.get(segment).cloned().unwrap_or(Value::Null))
                    .collect(),
            ),
            Value::Object(mut map) => map.remove(segment).unwrap_or(Value::Null),
            _ => Value::Null,
        };
    }
    current
}
