//! Route bindings of the logical resource pages.

use serde::Serialize;

const RECORD_PLACEHOLDER: &str = "{record}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalPage {
    Index,
    Create,
    Edit,
    View,
}

impl LogicalPage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRoute {
    pub page: LogicalPage,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRoutes {
    pub routes: Vec<PageRoute>,
}

impl PageRoutes {
    pub fn new(routes: impl IntoIterator<Item = (LogicalPage, &'static str)>) -> Self {
        Self {
            routes: routes
                .into_iter()
                .map(|(page, path)| PageRoute {
                    page,
                    path: path.to_string(),
                })
                .collect(),
        }
    }

    pub fn path(&self, page: LogicalPage) -> Option<&str> {
        self.routes
            .iter()
            .find(|r| r.page == page)
            .map(|r| r.path.as_str())
    }

    /// Concrete path of `page`, with `{record}` substituted when the route needs one.
    pub fn url(&self, page: LogicalPage, record: Option<&str>) -> Option<String> {
        let pattern = self.path(page)?;
        match (pattern.contains(RECORD_PLACEHOLDER), record) {
            (true, Some(record)) => Some(pattern.replace(RECORD_PLACEHOLDER, record)),
            (true, None) => None,
            (false, _) => Some(pattern.to_string()),
        }
    }

    /// Matches a concrete path back to its logical page and record key.
    ///
    /// Literal segments win over the placeholder, so `/create` is never read as
    /// the view page of a record called "create".
    pub fn resolve(&self, path: &str) -> Option<(LogicalPage, Option<String>)> {
        let wanted = segments(path);
        self.routes
            .iter()
            .filter_map(|route| {
                let pattern = segments(&route.path);
                if pattern.len() != wanted.len() {
                    return None;
                }
                let mut record = None;
                for (p, w) in pattern.iter().zip(&wanted) {
                    if *p == RECORD_PLACEHOLDER {
                        record = Some((*w).to_string());
                    } else if p != w {
                        return None;
                    }
                }
                Some((route.page, record))
            })
            .min_by_key(|(_, record)| record.is_some())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
