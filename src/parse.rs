//! Parser for the upstream markdown error document.
//!
//! The document is scanned line by line. Section headers of the form
//! `## <Name> (<Range>)` establish the current category; the pipe-delimited
//! table rows that follow are parsed into error records.

use once_cell::sync::Lazy;
use regex::Regex;

use errata_lib::CategoryRecord;

use crate::config::Config;

static HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^## (.+?) \(([EW]\d+x+(?:-[EW]\d+x+)?)\)").unwrap());
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|[-\s|]+\|$").unwrap());
static CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[EW]\d+$").unwrap());

/// Section names of the known upstream sections, mapped to category ids
const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    ("Lexer Errors", "lexer"),
    ("Parse Errors", "parse"),
    ("Type Errors", "type"),
    ("Reference Errors", "reference"),
    ("Runtime Errors", "runtime"),
    ("Import Errors", "import"),
    ("Stdlib Errors", "stdlib"),
    ("Math Errors", "math"),
    ("Array Errors", "array"),
    ("String Errors", "string"),
    ("Time Errors", "time"),
    ("Map Errors", "map"),
    ("JSON Errors", "json"),
    ("Code Style Warnings", "warnings-style"),
    ("Potential Bug Warnings", "warnings-bugs"),
    ("Code Quality Warnings", "warnings-quality"),
    ("Module Warnings", "warnings-module"),
];

/// An error row as parsed from the document, before enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedError {
    pub code: String,
    pub slug: String,
    pub message: String,
    pub category: String,
}

/// The result of parsing the error document
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    /// Errors in document order
    pub errors: Vec<ParsedError>,
    /// Categories in first-seen order, keyed uniquely by id
    pub categories: Vec<CategoryRecord>,
}

/// Parses the error document into errors and categories.
///
/// Rows before the first section header have no category and are ignored,
/// as are rows before the table header row of their section.
pub fn parse(input: &str, config: &Config) -> ParsedCatalog {
    let lines: Vec<&str> = input.lines().collect();

    let mut errors: Vec<ParsedError> = vec![];
    let mut categories: Vec<CategoryRecord> = vec![];

    let mut current_category: Option<String> = None;
    let mut in_table = false;

    for (line_number, line) in lines.iter().enumerate() {
        if let Some(caps) = HEADER_REGEX.captures(line) {
            let name = &caps[1];
            let range = &caps[2];

            let id = resolve_category_id(name, config);
            // Later sections resolving to an already seen id keep tagging
            // their rows, but the first category record wins.
            if !categories.iter().any(|category| category.id == id) {
                categories.push(CategoryRecord {
                    id: id.clone(),
                    name: name.to_owned(),
                    range: range.to_owned(),
                    description: find_description(&lines[line_number + 1..]),
                });
            }

            current_category = Some(id);
            in_table = false;
            continue;
        }

        if !line.starts_with('|') {
            continue;
        }
        let category = match &current_category {
            Some(category) => category,
            None => continue,
        };

        if line.contains("Code") && line.contains("Type") && line.contains("Message") {
            in_table = true;
            continue;
        }
        if SEPARATOR_REGEX.is_match(line) {
            continue;
        }

        if in_table {
            if let Some(error) = parse_row(line, category) {
                errors.push(error);
            }
        }
    }

    ParsedCatalog { errors, categories }
}

/// Resolves the category id for a section name.
///
/// Config mappings are consulted first, by exact name. Then the built-in
/// table is scanned; an entry matches when the section name contains the
/// table name, or the table name contains the section name without its
/// ` Errors`/` Warnings` suffix. Unmatched names fall back to a slug.
fn resolve_category_id(name: &str, config: &Config) -> String {
    if let Some(id) = config.categories.get(name) {
        return id.clone();
    }

    let trimmed = name
        .strip_suffix(" Errors")
        .or_else(|| name.strip_suffix(" Warnings"))
        .unwrap_or(name);

    for (key, id) in BUILTIN_CATEGORIES {
        if name.contains(key) || key.contains(trimmed) {
            return (*id).to_owned();
        }
    }

    slugify(name)
}

fn slugify(name: &str) -> String {
    let slug = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");

    slug.strip_suffix("-errors")
        .or_else(|| slug.strip_suffix("-warnings"))
        .unwrap_or(&slug)
        .to_owned()
}

/// The description is the next non-empty line that is neither a table row
/// nor a header
fn find_description(lines: &[&str]) -> String {
    for line in lines {
        let line = line.trim();
        if line.starts_with('|') || line.starts_with('#') {
            break;
        }
        if !line.is_empty() {
            return line.to_owned();
        }
    }

    String::new()
}

/// Parses a table row like `| E1001 | illegal-character | illegal character |`
fn parse_row(line: &str, category: &str) -> Option<ParsedError> {
    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();

    if cells.len() < 3 {
        return None;
    }

    let (code, slug, message) = (cells[0], cells[1], cells[2]);
    if !CODE_REGEX.is_match(code) {
        return None;
    }

    Some(ParsedError {
        code: code.to_owned(),
        slug: slug.to_owned(),
        message: message.to_owned(),
        category: category.to_owned(),
    })
}
