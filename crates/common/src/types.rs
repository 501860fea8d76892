use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

/// Unique identifier for a conversational session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A blueprint, print provider or variant as returned by the catalog service.
///
/// Only `id` and `title` are interpreted; every other upstream field is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            extra: Map::new(),
        }
    }

    /// Attach an opaque upstream field
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID {})", self.title, self.id)
    }
}

/// The three catalog resources walked by the selection funnel
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    #[strum(serialize = "blueprint")]
    Blueprint,
    #[strum(serialize = "print provider")]
    PrintProvider,
    #[strum(serialize = "variant")]
    Variant,
}

impl CatalogKind {
    /// Plural noun used in user-facing replies
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Blueprint => "blueprints",
            Self::PrintProvider => "print providers",
            Self::Variant => "variants",
        }
    }

    /// The phrase a user types to pick entry `n` at this stage
    pub fn selection_phrase(&self, n: usize) -> String {
        format!("select {} {}", self, n)
    }
}
