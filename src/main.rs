use std::io::Write;

use clap::{crate_version, App, Arg};
use env_logger::Env;
use log::{error, Level};

mod cmd;
mod config;
mod enrich;
mod fetch;
mod parse;
mod util;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            _ => writeln!(buf, "{}: {}", record.level(), record.args()),
        })
        .init();

    std::process::exit(match run() {
        Ok(_) => 0,
        Err(err) => {
            error!("{}", err);
            1
        }
    });
}

fn run() -> util::Fallible {
    let app = App::new("Errata")
        .version(crate_version!())
        .about(
            "Error catalog sync tool\n\
             \n\
             Fetches the upstream error document, merges it with local\n\
             enrichments and writes the errors.json consumed by the docs site.",
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("config_file")
                .help("Sets the config file name")
                .takes_value(true)
                .default_value("Errata.toml"),
        )
        .arg(
            Arg::with_name("local")
                .short("l")
                .long("local")
                .value_name("path")
                .help("Reads the error document from a local checkout instead of fetching it. If none is specified, fetches 'source' -> 'url' from the config file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short("u")
                .long("url")
                .value_name("url")
                .help("URL of the upstream error document. If none is specified, uses 'source' -> 'url' from the config file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("output_file")
                .help("Writes the merged catalog to this file. If none is specified, uses 'paths' -> 'output' from the config file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("enrichments")
                .short("e")
                .long("enrichments")
                .value_name("enrichments_file")
                .help("Reads enrichments from this file. If none is specified, uses 'paths' -> 'enrichments' from the config file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dry-run")
                .short("n")
                .long("dry-run")
                .help("Runs the full pipeline, but skips writing the output file.")
                .required(false)
                .takes_value(false),
        );

    let matches = app.get_matches();

    cmd::run_with_args(&matches)
}
