//! List table descriptor: columns, default sort, filters and actions.

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use super::form::SelectOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[oai(rename = "asc")]
    Asc,
    #[oai(rename = "desc")]
    Desc,
}

/// Icon and colour shown for one state of an icon column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRule {
    pub state: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        wrap: Option<usize>,
        numeric: bool,
    },
    Icon {
        rules: Vec<IconRule>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default_color: Option<String>,
    },
    Boolean {
        true_icon: String,
        false_icon: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Record attribute; a dotted name reads through a relationship.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub sortable: bool,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl Column {
    fn make(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            sortable: false,
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::make(
            name,
            ColumnKind::Text {
                wrap: None,
                numeric: false,
            },
        )
    }

    pub fn icon(name: impl Into<String>, rules: Vec<IconRule>) -> Self {
        Self::make(
            name,
            ColumnKind::Icon {
                rules,
                default_color: None,
            },
        )
    }

    pub fn boolean(name: impl Into<String>, true_icon: &str, false_icon: &str) -> Self {
        Self::make(
            name,
            ColumnKind::Boolean {
                true_icon: true_icon.to_string(),
                false_icon: false_icon.to_string(),
            },
        )
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn wrap(mut self, width: usize) -> Self {
        if let ColumnKind::Text { wrap, .. } = &mut self.kind {
            *wrap = Some(width);
        }
        self
    }

    pub fn numeric(mut self) -> Self {
        if let ColumnKind::Text { numeric, .. } = &mut self.kind {
            *numeric = true;
        }
        self
    }

    pub fn default_color(mut self, color: &str) -> Self {
        if let ColumnKind::Icon { default_color, .. } = &mut self.kind {
            *default_color = Some(color.to_string());
        }
        self
    }

    /// Icon and colour for a cell value of an icon or boolean column.
    pub fn icon_for(&self, state: &serde_json::Value) -> Option<(&str, &str)> {
        match &self.kind {
            ColumnKind::Icon {
                rules,
                default_color,
            } => {
                let state = state.as_str()?;
                match rules.iter().find(|r| r.state == state) {
                    Some(rule) => Some((rule.icon.as_str(), rule.color.as_str())),
                    None => default_color.as_deref().map(|color| ("", color)),
                }
            }
            ColumnKind::Boolean {
                true_icon,
                false_icon,
            } => match state.as_bool()? {
                true => Some((true_icon.as_str(), "success")),
                false => Some((false_icon.as_str(), "danger")),
            },
            ColumnKind::Text { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
    /// When switched on, keeps only rows whose boolean `column` is true.
    Toggle { column: String },
    Select {
        column: String,
        options: Vec<SelectOption>,
        multiple: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub name: String,
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl Filter {
    pub fn toggle(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FilterKind::Toggle {
                column: name.to_string(),
            },
        }
    }

    pub fn select(name: &str, options: Vec<SelectOption>) -> Self {
        Self {
            name: name.to_string(),
            kind: FilterKind::Select {
                column: name.to_string(),
                options,
                multiple: false,
            },
        }
    }

    pub fn multiple(mut self) -> Self {
        if let FilterKind::Select { multiple, .. } = &mut self.kind {
            *multiple = true;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Edit,
    View,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub button: bool,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            button: false,
        }
    }

    pub fn button(mut self) -> Self {
        self.button = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionsPosition {
    BeforeColumns,
    #[default]
    AfterColumns,
}

/// Actions applied to every selected row at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkActionGroup {
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultSort {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<DefaultSort>,
    pub filters: Vec<Filter>,
    pub actions: Vec<Action>,
    pub actions_position: ActionsPosition,
    pub bulk_actions: Vec<BulkActionGroup>,
}

impl TableSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            default_sort: None,
            filters: Vec::new(),
            actions: Vec::new(),
            actions_position: ActionsPosition::default(),
            bulk_actions: Vec::new(),
        }
    }

    pub fn default_sort(mut self, column: &str, direction: SortDirection) -> Self {
        self.default_sort = Some(DefaultSort {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn actions(mut self, actions: Vec<Action>, position: ActionsPosition) -> Self {
        self.actions = actions;
        self.actions_position = position;
        self
    }

    pub fn bulk_actions(mut self, groups: Vec<BulkActionGroup>) -> Self {
        self.bulk_actions = groups;
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_sortable(&self, name: &str) -> bool {
        self.column(name).is_some_and(|c| c.sortable)
    }

    pub fn filter(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.name == name)
    }

    pub fn has_bulk_action(&self, kind: ActionKind) -> bool {
        self.bulk_actions
            .iter()
            .flat_map(|g| g.actions.iter())
            .any(|a| a.kind == kind)
    }
}
