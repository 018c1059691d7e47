pub mod page;
pub mod page_tag;
pub mod tag;
