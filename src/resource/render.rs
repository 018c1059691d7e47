//! Rendering adapters consuming the resource descriptors.

use serde::Serialize;
use serde_json::Value;

use super::{FormSchema, Infolist, PageRoutes, Resource, TableSchema};

/// A front-end for the declarative schema. Each projection is rendered
/// independently of the others.
pub trait SchemaRenderer {
    type Output;
    type Error;

    fn form(&self, form: &FormSchema) -> Result<Self::Output, Self::Error>;
    fn table(&self, table: &TableSchema) -> Result<Self::Output, Self::Error>;
    fn infolist(&self, infolist: &Infolist) -> Result<Self::Output, Self::Error>;
    fn pages(&self, pages: &PageRoutes) -> Result<Self::Output, Self::Error>;
}

/// Renders descriptors as JSON documents for external admin front-ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl SchemaRenderer for JsonRenderer {
    type Output = Value;
    type Error = serde_json::Error;

    fn form(&self, form: &FormSchema) -> Result<Value, serde_json::Error> {
        serde_json::to_value(form)
    }

    fn table(&self, table: &TableSchema) -> Result<Value, serde_json::Error> {
        serde_json::to_value(table)
    }

    fn infolist(&self, infolist: &Infolist) -> Result<Value, serde_json::Error> {
        serde_json::to_value(infolist)
    }

    fn pages(&self, pages: &PageRoutes) -> Result<Value, serde_json::Error> {
        serde_json::to_value(pages)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedResource<T> {
    pub slug: &'static str,
    pub label: &'static str,
    pub navigation_icon: &'static str,
    pub form: T,
    pub table: T,
    pub infolist: T,
    pub pages: T,
}

pub fn render_resource<R, S>(resource: &R, renderer: &S) -> Result<RenderedResource<S::Output>, S::Error>
where
    R: Resource + ?Sized,
    S: SchemaRenderer,
{
    Ok(RenderedResource {
        slug: resource.slug(),
        label: resource.label(),
        navigation_icon: resource.navigation_icon(),
        form: renderer.form(&resource.form())?,
        table: renderer.table(&resource.table())?,
        infolist: renderer.infolist(&resource.infolist())?,
        pages: renderer.pages(&resource.pages())?,
    })
}
