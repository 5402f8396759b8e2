use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::config::Config;
use crate::util::Fallible;
use crate::{enrich, fetch, parse};

pub fn run_with_args(matches: &ArgMatches) -> Fallible {
    let config_path = matches.value_of("config").unwrap();
    let mut config = if matches.occurrences_of("config") == 0 && !Path::new(config_path).exists() {
        Config::default()
    } else {
        Config::read(config_path)
            .map_err(|err| format!("Could not read config file \"{}\": {}", config_path, err))?
    };

    if let Some(url) = matches.value_of("url") {
        config.source.url = url.to_owned();
    }
    if let Some(path) = matches.value_of("output") {
        config.paths.output = PathBuf::from(path);
    }
    if let Some(path) = matches.value_of("enrichments") {
        config.paths.enrichments = PathBuf::from(path);
    }

    let local = matches.value_of("local").map(Path::new);
    let dry_run = matches.is_present("dry-run");

    let content = fetch::document(&config.source, local)?;

    info!("Parsing error document");
    let parsed = parse::parse(&content, &config);
    info!(
        "Found {} errors in {} categories",
        parsed.errors.len(),
        parsed.categories.len()
    );

    let enrichments = enrich::read_enrichments(&config.paths.enrichments)?;
    if !enrichments.is_empty() {
        info!("Loaded {} enrichments", enrichments.len());
    }

    enrich::report_coverage(&parsed.errors, &enrichments);

    let catalog = enrich::merge(parsed, &enrichments);

    let json = errata_lib::to_json(&catalog)
        .map_err(|err| format!("Unable to serialize catalog: {}", err))?;

    if dry_run {
        info!(
            "Dry run, skipping write to {}",
            config.paths.output.display()
        );
    } else {
        write_catalog(&config.paths.output, &json)?;
        info!("Wrote {}", config.paths.output.display());
    }

    info!(
        "Total: {} errors, {} categories",
        catalog.errors.len(),
        catalog.categories.len()
    );

    Ok(())
}

/// Writes the serialized catalog, creating parent directories as needed.
/// Overwrites without backup.
fn write_catalog(path: &Path, json: &str) -> Fallible {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Unable to create output directory \"{}\": {}",
                    parent.display(),
                    err
                )
            })?;
        }
    }

    fs::write(path, json)
        .map_err(|err| format!("Unable to write output file \"{}\": {}", path.display(), err))?;

    Ok(())
}
