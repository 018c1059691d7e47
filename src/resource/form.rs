//! Create/edit form descriptor.
//!
//! A form is an ordered list of input fields. Each field carries its label and
//! the constraints a renderer needs to build the control; the submitted values
//! are checked against the same limits by [`crate::forms::PageForm`].

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options of a select whose choices come from a related entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub name: String,
    /// Attribute of the related record used as the option label.
    pub title_attribute: String,
    pub preload: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    TextInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        numeric: bool,
    },
    Select {
        options: Vec<SelectOption>,
        multiple: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        relationship: Option<Relationship>,
    },
    Toggle,
    Radio {
        options: Vec<SelectOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FormField {
    fn make(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            required: false,
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::make(
            name,
            FieldKind::TextInput {
                max_length: None,
                numeric: false,
            },
        )
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::make(
            name,
            FieldKind::Select {
                options,
                multiple: false,
                relationship: None,
            },
        )
    }

    pub fn toggle(name: impl Into<String>) -> Self {
        Self::make(name, FieldKind::Toggle)
    }

    pub fn radio(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::make(name, FieldKind::Radio { options })
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// No effect on anything but text inputs.
    pub fn max_length(mut self, limit: usize) -> Self {
        if let FieldKind::TextInput { max_length, .. } = &mut self.kind {
            *max_length = Some(limit);
        }
        self
    }

    pub fn numeric(mut self) -> Self {
        if let FieldKind::TextInput { numeric, .. } = &mut self.kind {
            *numeric = true;
        }
        self
    }

    pub fn multiple(mut self) -> Self {
        if let FieldKind::Select { multiple, .. } = &mut self.kind {
            *multiple = true;
        }
        self
    }

    pub fn relationship(mut self, name: &str, title_attribute: &str) -> Self {
        if let FieldKind::Select { relationship, .. } = &mut self.kind {
            *relationship = Some(Relationship {
                name: name.to_string(),
                title_attribute: title_attribute.to_string(),
                preload: false,
            });
        }
        self
    }

    /// Load relationship options with the form instead of on search.
    pub fn preload(mut self) -> Self {
        if let FieldKind::Select {
            relationship: Some(rel),
            ..
        } = &mut self.kind
        {
            rel.preload = true;
        }
        self
    }

    pub fn max_length_limit(&self) -> Option<usize> {
        match &self.kind {
            FieldKind::TextInput { max_length, .. } => *max_length,
            _ => None,
        }
    }

    /// Fixed choices of a select or radio; empty for free input.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select { options, .. } | FieldKind::Radio { options } => options,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
