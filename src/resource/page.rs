use super::{
    Action, ActionKind, ActionsPosition, BulkActionGroup, Column, Filter, FormField, FormSchema,
    Grid, IconRule, Infolist, LogicalPage, PageRoutes, Resource, SelectOption, SortDirection,
    TableSchema, TextEntry,
};
use crate::forms::{
    DESCRIPTION_MAX, IMAGEFILE_MAX, NAME_MAX, RANK_FOCUS_MAX, RANK_PINNED_MAX, TITLE_MAX,
};
use crate::status::PageStatus;

/// Admin resource of the `Page` entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageResource;

fn status_options() -> Vec<SelectOption> {
    PageStatus::ALL
        .into_iter()
        .map(|s| SelectOption::new(s.as_str(), s.as_str()))
        .collect()
}

fn rank_options(max: i32) -> Vec<SelectOption> {
    (1..=max)
        .map(|rank| SelectOption::new(rank.to_string(), rank.to_string()))
        .collect()
}

impl Resource for PageResource {
    fn slug(&self) -> &'static str {
        "pages"
    }

    fn label(&self) -> &'static str {
        "Pages"
    }

    fn navigation_icon(&self) -> &'static str {
        "heroicon-o-document-text"
    }

    fn form(&self) -> FormSchema {
        FormSchema::new(vec![
            FormField::text("name")
                .required()
                .max_length(NAME_MAX)
                .label("Blade name"),
            FormField::text("imagefile")
                .label("Image filename (incl. ext)")
                .max_length(IMAGEFILE_MAX),
            FormField::text("title").required().max_length(TITLE_MAX),
            FormField::text("description")
                .required()
                .max_length(DESCRIPTION_MAX),
            FormField::select("status", status_options()),
            FormField::select("tags", Vec::new())
                .relationship("tags", "name")
                .preload()
                .multiple(),
            FormField::toggle("is_focus").label("On home page"),
            FormField::toggle("is_pinned").label("On top"),
            FormField::radio("rank_focus", rank_options(RANK_FOCUS_MAX)).label("Rank (on Home Page)"),
            FormField::radio("rank_pinned", rank_options(RANK_PINNED_MAX)).label("Rank (on Top)"),
        ])
    }

    fn table(&self) -> TableSchema {
        let status_icons = PageStatus::ALL
            .into_iter()
            .map(|s| IconRule {
                state: s.as_str().to_string(),
                icon: s.icon().to_string(),
                color: s.color().to_string(),
            })
            .collect();

        TableSchema::new(vec![
            Column::text("title").wrap(80).sortable(),
            Column::icon("status", status_icons).default_color("gray"),
            Column::boolean("is_focus", "heroicon-o-check-badge", "heroicon-o-x-mark")
                .label("on Home Page")
                .sortable(),
            Column::text("rank_focus")
                .numeric()
                .sortable()
                .label("Rank (on Home Page)"),
            Column::boolean("is_pinned", "heroicon-m-bookmark-square", "heroicon-o-x-mark")
                .label("on Top")
                .sortable(),
            Column::text("rank_pinned")
                .numeric()
                .sortable()
                .label("Rank (on Top)"),
            Column::text("name").label("Filename").sortable(),
            Column::text("tags.name"),
            Column::text("imagefile").label("Image filename (inc ext)"),
            Column::text("description").label("Summary").wrap(100),
        ])
        .default_sort("title", SortDirection::Asc)
        .filters(vec![
            Filter::toggle("is_focus"),
            // Keeps `is_pinned = true` rows, same as the `is_focus` toggle.
            Filter::toggle("is_pinned"),
            Filter::select("status", status_options()).multiple(),
        ])
        .actions(
            vec![
                Action::new(ActionKind::Edit).button(),
                Action::new(ActionKind::View).button(),
            ],
            ActionsPosition::BeforeColumns,
        )
        .bulk_actions(vec![BulkActionGroup {
            actions: vec![Action::new(ActionKind::Delete)],
        }])
    }

    fn infolist(&self) -> Infolist {
        Infolist::new(vec![Grid {
            columns: 1,
            entries: vec![
                TextEntry::make("title").label(""),
                TextEntry::make("description").label(""),
                TextEntry::make("full_url")
                    .label("Go to Page")
                    .html()
                    .color("success"),
            ],
        }])
    }

    fn pages(&self) -> PageRoutes {
        PageRoutes::new([
            (LogicalPage::Index, "/"),
            (LogicalPage::Create, "/create"),
            (LogicalPage::Edit, "/{record}/edit"),
            (LogicalPage::View, "/{record}"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{FilterKind, form::FieldKind};
    use rstest::rstest;

    #[rstest]
    fn test_form_field_order() {
        let names: Vec<_> = PageResource
            .form()
            .fields
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            [
                "name",
                "imagefile",
                "title",
                "description",
                "status",
                "tags",
                "is_focus",
                "is_pinned",
                "rank_focus",
                "rank_pinned"
            ]
        );
    }

    #[rstest]
    fn test_required_fields() {
        let form = PageResource.form();
        let required: Vec<_> = form
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(required, ["name", "title", "description"]);
    }

    #[rstest]
    fn test_tags_select_preloads_relationship() {
        let form = PageResource.form();
        let FieldKind::Select {
            multiple,
            relationship,
            ..
        } = &form.field("tags").unwrap().kind
        else {
            panic!("tags should be a select");
        };
        let relationship = relationship.as_ref().unwrap();
        assert!(*multiple);
        assert!(relationship.preload);
        assert_eq!(relationship.title_attribute, "name");
    }

    #[rstest]
    fn test_status_choices() {
        let form = PageResource.form();
        let values: Vec<_> = form
            .field("status")
            .unwrap()
            .options()
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, ["Draft", "Reviewing", "Published"]);
    }

    #[rstest]
    #[case("title", true)]
    #[case("is_focus", true)]
    #[case("rank_focus", true)]
    #[case("is_pinned", true)]
    #[case("rank_pinned", true)]
    #[case("name", true)]
    #[case("status", false)]
    #[case("tags.name", false)]
    #[case("description", false)]
    fn test_sortable_columns(#[case] column: &str, #[case] sortable: bool) {
        assert_eq!(PageResource.table().is_sortable(column), sortable);
    }

    #[rstest]
    fn test_table_defaults_and_actions() {
        let table = PageResource.table();
        let sort = table.default_sort.as_ref().unwrap();
        assert_eq!(sort.column, "title");
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(table.actions_position, ActionsPosition::BeforeColumns);
        assert!(table.actions.iter().all(|a| a.button));
        assert!(table.has_bulk_action(ActionKind::Delete));
    }

    #[rstest]
    fn test_status_filter_is_multi_select() {
        let table = PageResource.table();
        let FilterKind::Select {
            multiple, options, ..
        } = &table.filter("status").unwrap().kind
        else {
            panic!("status filter should be a select");
        };
        assert!(*multiple);
        assert_eq!(options.len(), 3);
    }

    #[rstest]
    fn test_infolist_is_single_column() {
        let infolist = PageResource.infolist();
        assert_eq!(infolist.grids.len(), 1);
        assert_eq!(infolist.grids[0].columns, 1);
        let names: Vec<_> = infolist.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["title", "description", "full_url"]);
    }

    #[rstest]
    fn test_page_routes() {
        let pages = PageResource.pages();
        assert_eq!(pages.path(LogicalPage::Index), Some("/"));
        assert_eq!(pages.path(LogicalPage::Create), Some("/create"));
        assert_eq!(pages.path(LogicalPage::Edit), Some("/{record}/edit"));
        assert_eq!(pages.path(LogicalPage::View), Some("/{record}"));
    }
}
