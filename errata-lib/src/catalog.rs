//! The data model of the error catalog, as serialized to errors.json
use serde::{Deserialize, Serialize};

/// A complete error catalog: display categories, and one record per diagnostic
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<CategoryRecord>,
    pub errors: Vec<ErrorRecord>,
}

impl Catalog {
    /// Creates a new catalog from categories and errors
    pub fn new(categories: Vec<CategoryRecord>, errors: Vec<ErrorRecord>) -> Self {
        Catalog { categories, errors }
    }

    /// Looks up a category by its id
    pub fn category(&self, id: &str) -> Option<&CategoryRecord> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Gets all errors assigned to the given category
    pub fn errors_in<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ErrorRecord> {
        self.errors.iter().filter(move |error| error.category == id)
    }
}

/// A grouping of related error codes, used for display organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Stable identifier, e.g. `lexer`
    pub id: String,
    /// Section name as written in the upstream document
    pub name: String,
    /// Textual code range, e.g. `E1xxx`
    pub range: String,
    /// One-line description taken from the upstream document
    pub description: String,
}

/// A single diagnostic of the error catalog.
///
/// `code`, `slug`, `message` and `category` come from the upstream document;
/// the remaining fields are locally authored enrichments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Error code, `E<digits>` for errors or `W<digits>` for warnings
    pub code: String,
    /// Short identifier, e.g. `illegal-character`
    pub slug: String,
    /// Human-readable message from the upstream document
    pub message: String,
    /// Id of the category this error belongs to
    pub category: String,
    /// What the diagnostic is used for
    #[serde(default)]
    pub used_for: String,
    /// Example of offending code. Falls back to the message when not authored.
    #[serde(default)]
    pub example: String,
    /// How to resolve the diagnostic
    #[serde(default)]
    pub how_to_fix: String,
    /// Codes of related diagnostics
    #[serde(default)]
    pub related_errors: Vec<String>,
    /// Whether the diagnostic can be suppressed. Only present when authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppressible: Option<bool>,
}

impl ErrorRecord {
    /// Whether this record is a warning rather than a hard error
    pub fn is_warning(&self) -> bool {
        self.code.starts_with('W')
    }
}
