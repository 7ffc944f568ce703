use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs.
// Build scripts can't access src/ modules, so the shape is duplicated here.
const FORMATS: &[&str] = &["html", "json", "markdown", "pdf", "treeviz"];
const INSPECT_VIEWS: &[&str] = &["treeviz", "json"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let file_arg = |name: &'static str| {
        Arg::new(name)
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("brief")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Daily biomedical news digest: RSS feeds in, Markdown and PDF out")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("no-pdf").long("no-pdf").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("no-keywords")
                        .long("no-keywords")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .arg(file_arg("input"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("cover").long("cover").action(ArgAction::SetTrue))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("inspect").arg(file_arg("path")).arg(
                Arg::new("view")
                    .index(2)
                    .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS)),
            ),
        )
        .subcommand(Command::new("generate-css"))
        .subcommand(Command::new("list-formats"));

    generate_to(Bash, &mut cmd, "brief", &outdir)?;
    generate_to(Zsh, &mut cmd, "brief", &outdir)?;
    generate_to(Fish, &mut cmd, "brief", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
