//! Merging of parsed errors with locally authored enrichments

use std::collections::{HashMap, HashSet};
use std::fs::read_to_string;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use errata_lib::{Catalog, CategoryRecord, ErrorRecord};

use crate::parse::{ParsedCatalog, ParsedError};
use crate::util::Fallible;

/// Id of the consolidated warnings category, and the prefix of the
/// per-section warning category ids it replaces
const WARNINGS_ID: &str = "warnings";

/// Locally authored supplemental documentation for a single error code
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    #[serde(default)]
    pub used_for: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub how_to_fix: Option<String>,
    #[serde(default)]
    pub related_errors: Option<Vec<String>>,
    #[serde(default)]
    pub suppressible: Option<bool>,
}

/// Reads the enrichment file, keyed by error code.
///
/// A missing file is tolerated and treated as empty. A present but
/// unparseable file is an error.
pub fn read_enrichments<P: AsRef<Path>>(path: P) -> Fallible<HashMap<String, Enrichment>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("No enrichment file at {}, using defaults", path.display());
        return Ok(HashMap::new());
    }

    let buf = read_to_string(path).map_err(|err| {
        format!(
            "Unable to read enrichment file \"{}\": {}",
            path.display(),
            err
        )
    })?;
    let enrichments = serde_json::from_str(&buf).map_err(|err| {
        format!(
            "Unable to parse enrichment file \"{}\": {}",
            path.display(),
            err
        )
    })?;

    Ok(enrichments)
}

/// Merges parsed errors with enrichments, and consolidates warning
/// categories into a single category.
pub fn merge(parsed: ParsedCatalog, enrichments: &HashMap<String, Enrichment>) -> Catalog {
    let ParsedCatalog { errors, categories } = parsed;

    let mut errors: Vec<ErrorRecord> = errors
        .into_iter()
        .map(|error| {
            let enrichment = enrichments.get(&error.code);
            merge_error(error, enrichment)
        })
        .collect();

    let (warning_categories, mut categories): (Vec<_>, Vec<_>) = categories
        .into_iter()
        .partition(|category| category.id.starts_with(WARNINGS_ID));

    if !warning_categories.is_empty() {
        categories.push(CategoryRecord {
            id: WARNINGS_ID.to_owned(),
            name: "Warnings".to_owned(),
            range: "W1xxx-W4xxx".to_owned(),
            description: "Warnings (non-fatal)".to_owned(),
        });

        for error in &mut errors {
            if error.category.starts_with(WARNINGS_ID) {
                error.category = WARNINGS_ID.to_owned();
            }
        }
    }

    Catalog::new(categories, errors)
}

fn merge_error(error: ParsedError, enrichment: Option<&Enrichment>) -> ErrorRecord {
    let example = enrichment
        .and_then(|e| e.example.clone())
        .unwrap_or_else(|| error.message.clone());

    ErrorRecord {
        code: error.code,
        slug: error.slug,
        message: error.message,
        category: error.category,
        used_for: enrichment.and_then(|e| e.used_for.clone()).unwrap_or_default(),
        example,
        how_to_fix: enrichment
            .and_then(|e| e.how_to_fix.clone())
            .unwrap_or_default(),
        related_errors: enrichment
            .and_then(|e| e.related_errors.clone())
            .unwrap_or_default(),
        suppressible: enrichment.and_then(|e| e.suppressible).filter(|&s| s),
    }
}

/// Parsed codes without an enrichment entry
pub fn missing_enrichments<'a>(
    errors: &'a [ParsedError],
    enrichments: &HashMap<String, Enrichment>,
) -> Vec<&'a ParsedError> {
    errors
        .iter()
        .filter(|error| !enrichments.contains_key(&error.code))
        .collect()
}

/// Enrichment codes without a matching parsed error, sorted
pub fn stale_enrichments<'a>(
    errors: &[ParsedError],
    enrichments: &'a HashMap<String, Enrichment>,
) -> Vec<&'a str> {
    let codes: HashSet<&str> = errors.iter().map(|error| error.code.as_str()).collect();

    let mut stale: Vec<&str> = enrichments
        .keys()
        .map(String::as_str)
        .filter(|code| !codes.contains(code))
        .collect();
    stale.sort_unstable();

    stale
}

/// Logs enrichment coverage of the parsed errors. Informational only.
pub fn report_coverage(errors: &[ParsedError], enrichments: &HashMap<String, Enrichment>) {
    let missing = missing_enrichments(errors, enrichments);
    if !missing.is_empty() {
        info!("New errors without enrichments ({}):", missing.len());
        for error in missing {
            info!("  - {}: {}", error.code, error.slug);
        }
    }

    let stale = stale_enrichments(errors, enrichments);
    if !stale.is_empty() {
        warn!(
            "Enrichments without a matching error ({}): {}",
            stale.len(),
            stale.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parsed_error(code: &str, category: &str) -> ParsedError {
        ParsedError {
            code: code.to_owned(),
            slug: format!("slug-{}", code.to_lowercase()),
            message: format!("message for {}", code),
            category: category.to_owned(),
        }
    }

    fn parsed(errors: Vec<ParsedError>, categories: Vec<CategoryRecord>) -> ParsedCatalog {
        ParsedCatalog { errors, categories }
    }

    fn category(id: &str, name: &str, range: &str) -> CategoryRecord {
        CategoryRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            range: range.to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn merge_with_enrichment() {
        let mut enrichments = HashMap::new();
        enrichments.insert(
            "E1001".to_owned(),
            Enrichment {
                used_for: Some("Catching invalid bytes early".to_owned()),
                example: Some("let x = §1".to_owned()),
                how_to_fix: Some("Remove the offending character".to_owned()),
                related_errors: Some(vec!["E1002".to_owned()]),
                suppressible: None,
            },
        );

        let catalog = merge(
            parsed(
                vec![parsed_error("E1001", "lexer")],
                vec![category("lexer", "Lexer Errors", "E1xxx")],
            ),
            &enrichments,
        );

        let error = &catalog.errors[0];
        assert_eq!(error.code, "E1001");
        assert_eq!(error.slug, "slug-e1001");
        assert_eq!(error.message, "message for E1001");
        assert_eq!(error.category, "lexer");
        assert_eq!(error.used_for, "Catching invalid bytes early");
        assert_eq!(error.example, "let x = §1");
        assert_eq!(error.how_to_fix, "Remove the offending character");
        assert_eq!(error.related_errors, vec!["E1002".to_owned()]);
        assert_eq!(error.suppressible, None);
    }

    #[test]
    fn merge_without_enrichment() {
        let catalog = merge(
            parsed(
                vec![parsed_error("E1001", "lexer")],
                vec![category("lexer", "Lexer Errors", "E1xxx")],
            ),
            &HashMap::new(),
        );

        let error = &catalog.errors[0];
        assert_eq!(error.used_for, "");
        assert_eq!(error.how_to_fix, "");
        assert_eq!(error.related_errors, Vec::<String>::new());
        assert_eq!(error.suppressible, None);
        // The example falls back to the parsed message
        assert_eq!(error.example, "message for E1001");
    }

    #[test]
    fn suppressible_only_when_true() {
        let mut enrichments = HashMap::new();
        enrichments.insert(
            "W1001".to_owned(),
            Enrichment {
                suppressible: Some(true),
                ..Enrichment::default()
            },
        );
        enrichments.insert(
            "W1002".to_owned(),
            Enrichment {
                suppressible: Some(false),
                ..Enrichment::default()
            },
        );

        let catalog = merge(
            parsed(
                vec![
                    parsed_error("W1001", "warnings-style"),
                    parsed_error("W1002", "warnings-style"),
                ],
                vec![category("warnings-style", "Code Style Warnings", "W1xxx")],
            ),
            &enrichments,
        );

        assert_eq!(catalog.errors[0].suppressible, Some(true));
        assert_eq!(catalog.errors[1].suppressible, None);
    }

    #[test]
    fn consolidate_warning_categories() {
        let catalog = merge(
            parsed(
                vec![
                    parsed_error("E1001", "lexer"),
                    parsed_error("W1001", "warnings-style"),
                    parsed_error("W2001", "warnings-bugs"),
                ],
                vec![
                    category("lexer", "Lexer Errors", "E1xxx"),
                    category("warnings-style", "Code Style Warnings", "W1xxx"),
                    category("warnings-bugs", "Potential Bug Warnings", "W2xxx"),
                ],
            ),
            &HashMap::new(),
        );

        let ids: Vec<&str> = catalog
            .categories
            .iter()
            .map(|category| category.id.as_str())
            .collect();
        assert_eq!(ids, vec!["lexer", "warnings"]);

        let warnings = catalog.category("warnings").unwrap();
        assert_eq!(warnings.name, "Warnings");
        assert_eq!(warnings.range, "W1xxx-W4xxx");
        assert_eq!(warnings.description, "Warnings (non-fatal)");

        assert_eq!(catalog.errors[0].category, "lexer");
        assert_eq!(catalog.errors[1].category, "warnings");
        assert_eq!(catalog.errors[2].category, "warnings");
    }

    #[test]
    fn no_synthetic_category_without_warnings() {
        let catalog = merge(
            parsed(
                vec![parsed_error("E1001", "lexer")],
                vec![category("lexer", "Lexer Errors", "E1xxx")],
            ),
            &HashMap::new(),
        );

        assert!(catalog.category("warnings").is_none());
    }

    #[test]
    fn missing_and_stale_enrichments() {
        let mut enrichments = HashMap::new();
        enrichments.insert("E1001".to_owned(), Enrichment::default());
        enrichments.insert("E9999".to_owned(), Enrichment::default());
        enrichments.insert("E0001".to_owned(), Enrichment::default());

        let errors = vec![parsed_error("E1001", "lexer"), parsed_error("E1002", "lexer")];

        let missing = missing_enrichments(&errors, &enrichments);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].code, "E1002");

        assert_eq!(stale_enrichments(&errors, &enrichments), vec!["E0001", "E9999"]);
    }

    #[test]
    fn read_missing_enrichment_file() {
        let dir = tempfile::tempdir().unwrap();

        let enrichments = read_enrichments(dir.path().join("error-enrichments.json")).unwrap();
        assert!(enrichments.is_empty());
    }

    #[test]
    fn read_enrichment_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error-enrichments.json");
        std::fs::write(
            &path,
            r#"{
                "E1001": {
                    "usedFor": "Catching invalid bytes early",
                    "howToFix": "Remove the offending character",
                    "relatedErrors": ["E1002"]
                },
                "W1001": {
                    "suppressible": true
                }
            }"#,
        )
        .unwrap();

        let enrichments = read_enrichments(&path).unwrap();

        assert_eq!(enrichments.len(), 2);
        assert_eq!(
            enrichments["E1001"].used_for.as_deref(),
            Some("Catching invalid bytes early")
        );
        assert_eq!(enrichments["E1001"].example, None);
        assert_eq!(enrichments["W1001"].suppressible, Some(true));
    }

    #[test]
    fn read_invalid_enrichment_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error-enrichments.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(read_enrichments(&path).is_err());
    }
}
