//! Config objects, to be read from Errata.toml

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::util::Fallible;

/// Default URL of the raw upstream error document
pub const DEFAULT_DOCUMENT_URL: &str =
    "https://raw.githubusercontent.com/SchoolyB/EZ/main/ERRORS.md";

/// Top-level config
#[derive(Deserialize, Default, Debug)]
pub struct Config {
    /// Config for the upstream source document
    #[serde(default)]
    pub source: Source,
    /// Config for input and output paths
    #[serde(default)]
    pub paths: Paths,
    /// Extra section-name to category-id mappings.
    /// Consulted before the built-in table, by exact section name.
    #[serde(default)]
    pub categories: HashMap<String, String>,
}

impl Config {
    /// Reads the config from the given TOML file
    pub fn read<P: AsRef<Path>>(path: P) -> Fallible<Self> {
        let buf = read_to_string(path)?;
        let val = toml::from_str::<Self>(&buf)?;

        val.check()?;

        Ok(val)
    }

    /// Check the validity of the configuration
    fn check(&self) -> Fallible {
        for (name, id) in &self.categories {
            if id.trim().is_empty() {
                return Err(format!("Empty category id for section \"{}\"", name).into());
            }
        }

        Ok(())
    }
}

/// Config for the upstream source document
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Source {
    /// URL of the raw error document
    pub url: String,
    /// File name of the error document inside a local checkout
    pub file: String,
}

impl Default for Source {
    fn default() -> Self {
        Source {
            url: DEFAULT_DOCUMENT_URL.to_owned(),
            file: "ERRORS.md".to_owned(),
        }
    }
}

/// Config for input and output paths
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Paths {
    /// Path of the enrichment file
    pub enrichments: PathBuf,
    /// Path of the JSON output file
    pub output: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            enrichments: PathBuf::from("data/error-enrichments.json"),
            output: PathBuf::from("data/errors.json"),
        }
    }
}
