//! Retrieval of the upstream error document

use std::fs;
use std::path::Path;

use log::info;

use crate::config::Source;
use crate::util::Fallible;

/// Retrieves the raw error document.
///
/// Reads from a local checkout if one is given, and fetches from the
/// configured URL otherwise.
pub fn document(source: &Source, local: Option<&Path>) -> Fallible<String> {
    match local {
        Some(path) => {
            let file = path.join(&source.file);
            info!("Reading from local file {}", file.display());

            fs::read_to_string(&file).map_err(|err| {
                format!("Unable to read document \"{}\": {}", file.display(), err).into()
            })
        }
        None => {
            info!("Fetching from {}", source.url);
            fetch_url(&source.url)
        }
    }
}

fn fetch_url(url: &str) -> Fallible<String> {
    let response = ureq::get(url)
        .call()
        .map_err(|err| format!("Unable to fetch document from \"{}\": {}", url, err))?;

    let text = response
        .into_string()
        .map_err(|err| format!("Unable to read response from \"{}\": {}", url, err))?;

    Ok(text)
}
