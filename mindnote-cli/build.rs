use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
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
            .value_hint(ValueHint::DirPath)
    };
    let author = || {
        Arg::new("author")
            .long("author")
            .value_name("NAME")
            .help("Author line of the document header")
    };

    Command::new("mindnote")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn MindNode mind maps into AsciiDoc documents")
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
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate")
                .visible_aliases(["g", "gen"])
                .about("Generate the weekly digest")
                .arg(input())
                .arg(output())
                .arg(Arg::new("prefix").long("prefix").value_name("PREFIX"))
                .arg(author())
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD")),
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

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mindnote", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mindnote", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mindnote", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
