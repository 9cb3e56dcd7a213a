// Command-line interface for mindnote
//
// Turns a MindNode package (a .mindnode directory) into AsciiDoc. The heavy lifting lives in
// mindnote-babel; this binary only wires arguments, configuration and logging to it.
//
// Usage:
//  mindnote dump <input> [-o <file>]                                      - Dump the raw package contents as JSON
//  mindnote generate <input> [<output>] [--prefix P] [--author A] [--date D] - Weekly digest (aliases: g, gen)
//  mindnote simple <input> [<output>] [--author A]                        - Whole-tree export (aliases: s, sim)
//
// Global flags:
//  --verbose <1|2|3>   log level (1 info, 2 warn, 3 error); defaults to logging.level from config
//  --config <path>     layered over ./mindnote.toml and the built-in defaults

use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use mindnote_babel::publish::{self, GenerationSpec, DUMP_FILE};
use mindnote_babel::{NoteError, Period};
use mindnote_config::{LogLevel, Loader, MindnoteConfig, CONFIG_FILE};
use std::path::Path;

fn build_cli() -> Command {
    let input = || {
        Arg::new("input")
            .help("Path to the .mindnode package")
            .required(true)
            .index(1)
            .value_hint(ValueHint::DirPath)
    };
    let output = || {
        Arg::new("output")
            .help("Output directory")
            .index(2)
            .default_value(".")
            .value_hint(ValueHint::DirPath)
    };
    let author = || {
        Arg::new("author")
            .long("author")
            .value_name("NAME")
            .help("Author line of the document header (default: document.author)")
    };

    Command::new("mindnote")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn MindNode mind maps into AsciiDoc documents")
        .long_about(
            "mindnote reads a MindNode package and writes AsciiDoc documents.\n\n\
            Commands:\n  \
            - generate: weekly digest, keeping only this and last week's W<n> topics\n  \
            - simple:   the whole mind map as one document\n  \
            - dump:     the raw package contents as JSON\n\n\
            Node titles starting with [S] are always left out, together with their subtree.\n\n\
            Examples:\n  \
            mindnote generate Work.mindnode out --prefix Team --author 'Ann Lee'\n  \
            mindnote simple Reading.mindnode\n  \
            mindnote dump Work.mindnode -o work.json",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .value_name("LEVEL")
                .help("Log level: 1 info, 2 warn, 3 error")
                .value_parser(["1", "2", "3"])
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mindnote.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("dump")
                .about("Write the package contents as JSON")
                .arg(input())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .help("Target file")
                        .default_value(DUMP_FILE)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate")
                .visible_aliases(["g", "gen"])
                .about("Generate the weekly digest")
                .arg(input())
                .arg(output())
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .value_name("PREFIX")
                        .help("Title and file name prefix (default: document.prefix)"),
                )
                .arg(author())
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Reference date for week and quarter (default: today)")
                        .value_parser(parse_date),
                ),
        )
        .subcommand(
            Command::new("simple")
                .visible_aliases(["s", "sim"])
                .about("Export the whole mind map as one document")
                .arg(input())
                .arg(output())
                .arg(author()),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let overrides = matches
        .subcommand()
        .map(|(_, sub_matches)| document_overrides(sub_matches))
        .unwrap_or_default();
    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &overrides,
    );
    init_logging(level_filter(
        matches.get_one::<String>("verbose").map(|s| s.as_str()),
        config.logging.level,
    ));

    let result = match matches.subcommand() {
        Some(("dump", sub_matches)) => handle_dump_command(sub_matches),
        Some(("generate", sub_matches)) => handle_generate_command(sub_matches, &config),
        Some(("simple", sub_matches)) => handle_simple_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn handle_dump_command(matches: &ArgMatches) -> Result<(), NoteError> {
    let input = required(matches, "input");
    let output = required(matches, "output");
    let path = publish::dump(input, output)?;
    println!("{}", path.display());
    Ok(())
}

fn handle_generate_command(matches: &ArgMatches, config: &MindnoteConfig) -> Result<(), NoteError> {
    let period = matches
        .get_one::<NaiveDate>("date")
        .map(|date| Period::from_date(*date))
        .unwrap_or_else(Period::today);
    let input = required(matches, "input");
    let spec = GenerationSpec::periodic(input, &config.document.prefix, period)
        .with_options(config.outline.periodic_options());
    run_generation(spec, matches, config)
}

fn handle_simple_command(matches: &ArgMatches, config: &MindnoteConfig) -> Result<(), NoteError> {
    let spec = GenerationSpec::simple(required(matches, "input"))
        .with_options(config.outline.simple_options());
    run_generation(spec, matches, config)
}

fn run_generation(
    spec: GenerationSpec,
    matches: &ArgMatches,
    config: &MindnoteConfig,
) -> Result<(), NoteError> {
    let spec = spec
        .with_output_dir(Path::new(required(matches, "output")))
        .with_author(config.document.author.clone())
        .with_images_dir(config.document.images_dir.clone());

    let result = publish::generate(&spec)?;
    for path in &result.documents {
        println!("{}", path.display());
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(|s| s.as_str())
        .unwrap_or_else(|| {
            eprintln!("Error: missing argument '{id}'");
            std::process::exit(1);
        })
}

fn optional<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches.get_one::<String>(id).map(|s| s.as_str())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected a YYYY-MM-DD date, got '{raw}': {e}"))
}

/// Header flags that take precedence over the `[document]` table.
fn document_overrides(matches: &ArgMatches) -> Vec<(&'static str, String)> {
    [("author", "document.author"), ("prefix", "document.prefix")]
        .into_iter()
        .filter(|(id, _)| matches.try_contains_id(id).unwrap_or(false))
        .filter_map(|(id, key)| optional(matches, id).map(|value| (key, value.to_string())))
        .collect()
}

fn load_cli_config(explicit_path: Option<&str>, overrides: &[(&str, String)]) -> MindnoteConfig {
    let loader = Loader::new().with_optional_file(CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    overrides
        .iter()
        .try_fold(loader, |loader, (key, value)| {
            loader.set_override(key, value.as_str())
        })
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

/// `--verbose` wins over the configured level.
fn level_filter(verbose: Option<&str>, configured: LogLevel) -> LevelFilter {
    match verbose {
        Some("1") => LevelFilter::Info,
        Some("2") => LevelFilter::Warn,
        Some("3") => LevelFilter::Error,
        _ => match configured {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        },
    }
}

fn init_logging(level: LevelFilter) {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("mindnote", level)
        .filter_module("mindnote_babel", level)
        .format_timestamp(None)
        .try_init();
}
