//! Read-only detail view descriptor.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEntry {
    pub name: String,
    /// `Some("")` hides the label, `None` lets the renderer derive one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub html: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextEntry {
    pub fn make(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            html: false,
            color: None,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub columns: u8,
    pub entries: Vec<TextEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Infolist {
    pub grids: Vec<Grid>,
}

/// An entry paired with the value it shows for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledEntry {
    #[serde(flatten)]
    pub entry: TextEntry,
    pub value: Value,
}

impl Infolist {
    pub fn new(grids: Vec<Grid>) -> Self {
        Self { grids }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TextEntry> {
        self.grids.iter().flat_map(|g| g.entries.iter())
    }

    /// Reads each entry's value out of a serialized record.
    pub fn fill(&self, record: &Value) -> Vec<FilledEntry> {
        self.entries()
            .map(|entry| FilledEntry {
                entry: entry.clone(),
                value: super::extract(record, &entry.name),
            })
            .collect()
    }
}
