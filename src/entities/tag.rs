// entities/tag.rs
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
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

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        super::page_tag::Relation::Page.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::page_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
