mod catalog;

pub use catalog::*;

/// Version of this library
pub const ERRATA_VERSION: &str = env!(
    "CARGO_PKG_VERSION",
    "Environmental variable CARGO_PKG_VERSION not found"
);

/// Decodes a catalog from JSON
pub fn from_json(json: &str) -> serde_json::Result<Catalog> {
    serde_json::from_str(json)
}

/// Encodes a catalog as pretty-printed JSON, the format of errors.json
pub fn to_json(catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(catalog)
}
