use std::{fmt, str::FromStr};

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

/// Editorial status of a page. There are no transition rules between values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum PageStatus {
    #[oai(rename = "Draft")]
    Draft,
    #[oai(rename = "Reviewing")]
    Reviewing,
    #[oai(rename = "Published")]
    Published,
}

impl PageStatus {
    pub const ALL: [PageStatus; 3] = [Self::Draft, Self::Reviewing, Self::Published];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Reviewing => "Reviewing",
            Self::Published => "Published",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Draft => "heroicon-o-pencil",
            Self::Reviewing => "heroicon-o-clock",
            Self::Published => "heroicon-o-check-badge",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Draft => "info",
            Self::Reviewing => "warning",
            Self::Published => "success",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown page status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for PageStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
