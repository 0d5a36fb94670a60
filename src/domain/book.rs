//! Book records and their loan status.
//!
//! A `Book` is only ever created by the catalog (which assigns its id) or
//! rebuilt from a stored mapping during load. After creation only the
//! status can change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    /// Catalog-assigned identifier (positive, unique per catalog)
    id: u64,

    /// Display title
    title: String,

    /// Display author
    author: String,

    /// Publication year
    year: i32,

    /// Current loan status
    status: BookStatus,
}

impl Book {
    pub(crate) fn new(id: u64, title: String, author: String, year: i32) -> Self {
        Self {
            id,
            title,
            author,
            year,
            status: BookStatus::default(),
        }
    }

    /// Rebuild a book from its stored key-value form.
    ///
    /// All five keys (`id`, `title`, `author`, `year`, `status`) are
    /// required and no others are accepted.
    pub fn from_mapping(mapping: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(mapping))
    }

    /// Key-value form used for persistence, keys in field order
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut mapping = Map::new();
        mapping.insert("id".to_string(), Value::from(self.id));
        mapping.insert("title".to_string(), Value::from(self.title.clone()));
        mapping.insert("author".to_string(), Value::from(self.author.clone()));
        mapping.insert("year".to_string(), Value::from(self.year));
        mapping.insert("status".to_string(), Value::from(self.status.as_str()));
        mapping
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }

    /// Case-insensitive substring match on title, author or year
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        self.title.to_lowercase().contains(&keyword)
            || self.author.to_lowercase().contains(&keyword)
            || self.year.to_string().contains(&keyword)
    }
}

/// Loan status of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf
    #[default]
    #[serde(alias = "В наличии")]
    Available,

    /// Lent out
    #[serde(alias = "Выдана")]
    Loaned,
}

impl BookStatus {
    /// Every status, in menu order
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::Loaned];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Loaned => "loaned",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" | "в наличии" => Ok(BookStatus::Available),
            "loaned" | "выдана" => Ok(BookStatus::Loaned),
            _ => anyhow::bail!("Unknown book status: {}", s),
        }
    }
}
