//! Admin back-end for site pages: a declarative resource schema (form, table,
//! detail view, page routes) and the ORM-backed CRUD service that serves it.

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod forms;
pub mod migration;
pub mod resource;
pub mod state;
pub mod status;
pub mod store;
