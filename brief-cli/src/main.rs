// Command-line interface for brief
//
// brief turns a list of RSS feeds into a daily news digest: a Markdown report with one
// entry per article and a PDF rendering of it. The conversion itself lives in brief-babel;
// this binary wires configuration, logging and the pipeline collaborators together.
//
// Usage:
//  brief run [--date YYYY-MM-DD] [--no-pdf] [--no-keywords]   - Fetch, summarize, report
//  brief <input> --to <format> [--from <format>] [-o <file>]  - Convert a report (default)
//  brief convert <input> --to <format> [...]                  - Same as above (explicit)
//  brief inspect <input> [treeviz|json]                       - Show the parsed document
//  brief generate-css                                         - Print the default stylesheet
//  brief list-formats                                         - List conversion formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// `theme-<field>` keys and `css-path` are folded into the configuration; everything else
// is handed to the target format (e.g. `--extra-size-mobile` for pdf).
// Example:
//  brief news_report_20240501.md --to pdf -o digest.pdf --extra-size-mobile --cover

use brief_babel::publish::{publish_with, PublishArtifact, PublishSpec};
use brief_babel::FormatRegistry;
use brief_cli::export::{configured_registry, load_report};
use brief_cli::feed::FeedClient;
use brief_cli::logging::init_logging;
use brief_cli::narrative::OpenAiNarrator;
use brief_cli::pipeline::{Pipeline, RunOptions};
use brief_config::{BriefConfig, Loader, LOCAL_CONFIG_FILE};
use chrono::{Local, NaiveDate};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

const SUBCOMMANDS: &[&str] = &[
    "run",
    "convert",
    "inspect",
    "generate-css",
    "list-formats",
    "help",
];

const INSPECT_VIEWS: &[&str] = &["treeviz", "json"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        let key = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key {
            let value = args.get(i + 1).filter(|next| !next.starts_with('-'));
            match value {
                Some(value) => {
                    extra_params.insert(key.to_string(), value.clone());
                    i += 2;
                }
                None => {
                    extra_params.insert(key.to_string(), "true".to_string());
                    i += 1;
                }
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("brief")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Daily biomedical news digest: RSS feeds in, Markdown and PDF out")
        .long_about(
            "brief fetches RSS feeds, keeps the recent and relevant articles, asks a language\n\
            model for a structured digest entry per article, and renders the day's report.\n\n\
            Commands:\n  \
            - run:      The daily pipeline (feeds → report.md → report.pdf)\n  \
            - convert:  Render a Markdown report as html, pdf, json, treeviz or markdown\n  \
            - inspect:  Show how a report is segmented into blocks\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            brief run                                       # Today's digest\n  \
            brief run --date 2024-05-01 --no-pdf            # Markdown only, fixed date\n  \
            brief report.md --to html -o report.html        # Convert (stdout without -o)\n  \
            brief report.md --to pdf -o r.pdf --extra-size-mobile\n  \
            brief inspect report.md                         # Block tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a brief.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Run the daily pipeline")
                .long_about(
                    "Fetch every feed listed in the URL file, keep the articles published\n\
                    today or yesterday that match the keyword filter, summarize each one and\n\
                    append it to news_report_YYYYMMDD.md, then render news_summary_YYYYMMDD.pdf.\n\n\
                    A failing feed or article is logged and skipped.",
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Digest date (defaults to today)")
                        .value_parser(parse_date),
                )
                .arg(
                    Arg::new("no-pdf")
                        .long("no-pdf")
                        .help("Stop after writing the Markdown report")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-keywords")
                        .long("no-keywords")
                        .help("Accept every recent article regardless of keywords")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown report (default command)")
                .long_about(
                    "Convert a digest report to another format.\n\n\
                    Supported formats:\n  \
                    - markdown: Digest Markdown (.md)\n  \
                    - html:     Styled HTML page (.html)\n  \
                    - pdf:      HTML printed by headless Chrome (.pdf, requires -o)\n  \
                    - json:     Document model as JSON\n  \
                    - treeviz:  Block tree\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("cover")
                        .long("cover")
                        .help("Add the configured cover page and page furniture")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Date printed on the cover (defaults to today)")
                        .value_parser(parse_date),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show how a Markdown report is segmented")
                .arg(
                    Arg::new("path")
                        .help("Path to the report")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to print. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS))
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML and PDF export")
                .long_about(
                    "Outputs the default theme variables and baseline stylesheet.\n\n\
                    Save it, edit it, and pass it back with --extra-css-path or\n\
                    convert.html.custom_css to extend the default styles.",
                ),
        )
        .subcommand(Command::new("list-formats").about("List available conversion formats"))
}

/// Insert `convert` before the first positional argument when that argument is not a
/// subcommand, so `brief [--config x] report.md --to html` works.
fn with_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--config" {
            i += 2;
        } else if arg.starts_with('-') {
            i += 1;
        } else if SUBCOMMANDS.contains(&arg) {
            return None;
        } else {
            let mut new_args = args.to_vec();
            new_args.insert(i, "convert".to_string());
            return Some(new_args);
        }
    }
    None
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => match with_default_subcommand(&cleaned_args) {
            Some(new_args) => match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    if let Err(err) = init_logging(matches.get_flag("verbose"), matches.get_flag("quiet")) {
        eprintln!("Failed to initialize logging: {err}");
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );

    match matches.subcommand() {
        Some(("run", sub_matches)) => {
            let date = sub_matches
                .get_one::<NaiveDate>("date")
                .copied()
                .unwrap_or_else(today);
            let options = RunOptions {
                date,
                use_keywords: !sub_matches.get_flag("no-keywords"),
                export_pdf: !sub_matches.get_flag("no-pdf"),
            };
            handle_run_command(&config, &options);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let cover_date = sub_matches.get_flag("cover").then(|| {
                sub_matches
                    .get_one::<NaiveDate>("date")
                    .copied()
                    .unwrap_or_else(today)
            });

            let registry = registry_or_exit(&config);
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            handle_convert_command(
                &registry,
                &config,
                ConvertRequest {
                    input,
                    from: &from,
                    to,
                    output,
                    cover_date,
                },
                &extra_params,
            );
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            handle_inspect_command(&config, path, view, &extra_params);
        }
        Some(("generate-css", _)) => {
            print!("{}", brief_babel::formats::get_default_css());
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command(&registry_or_exit(&config));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_run_command(config: &BriefConfig, options: &RunOptions) {
    let client = FeedClient::from_config(&config.feeds).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let narrator = OpenAiNarrator::from_config(&config.narrative).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let outcome = Pipeline::new(config, &client, &narrator)
        .run(options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let stats = &outcome.stats;
    println!(
        "{} articles summarized ({} skipped by keyword, {} by quota, {} failed) from {}/{} sources",
        stats.articles_ok,
        stats.skipped_by_keyword,
        stats.skipped_by_quota,
        stats.failures,
        stats.sources_ok,
        stats.sources_total
    );
    for path in [&outcome.report_path, &outcome.pdf_path].into_iter().flatten() {
        println!("{}", path.display());
    }
}

struct ConvertRequest<'a> {
    input: &'a str,
    from: &'a str,
    to: &'a str,
    output: Option<&'a str>,
    cover_date: Option<NaiveDate>,
}

fn handle_convert_command(
    registry: &FormatRegistry,
    config: &BriefConfig,
    request: ConvertRequest<'_>,
    extra_params: &HashMap<String, String>,
) {
    if let Err(e) = registry.get(request.from).and_then(|_| registry.get(request.to)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let doc = if request.from == "markdown" {
        load_report(registry, Path::new(request.input), config, request.cover_date)
            .map_err(|e| e.to_string())
    } else {
        fs::read_to_string(request.input)
            .map_err(|e| format!("Error reading file '{}': {e}", request.input))
            .and_then(|source| {
                registry
                    .parse(&source, request.from)
                    .map_err(|e| e.to_string())
            })
    }
    .unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let mut spec = PublishSpec::new(&doc, request.to).with_options(extra_params.clone());
    if let Some(path) = request.output {
        spec = spec.with_output_path(path);
    }

    match publish_with(registry, spec) {
        Ok(PublishArtifact::InMemory(text)) => print!("{text}"),
        Ok(PublishArtifact::File(path)) => info!(path = %path.display(), "written"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

fn handle_inspect_command(
    config: &BriefConfig,
    path: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
) {
    let registry = registry_or_exit(config);
    let doc = load_report(&registry, Path::new(path), config, None).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let output = registry
        .serialize_with_options(&doc, view, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });
    print!("{}", String::from_utf8_lossy(&output.into_bytes()));
}

fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Conversion formats:\n");
    for (name, description) in registry.describe() {
        let direction = match registry.get(name) {
            Ok(format) if format.supports_parsing() => "read/write",
            _ => "write",
        };
        println!("  {name:<10} {direction:<11} {description}");
    }
}

fn registry_or_exit(config: &BriefConfig) -> FormatRegistry {
    configured_registry(config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> BriefConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    apply_config_overrides(loader, extra_params)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

/// Fold `theme-*` and `css-path` extras into the configuration; the rest stay for the format.
fn apply_config_overrides(
    mut loader: Loader,
    extra_params: &mut HashMap<String, String>,
) -> Result<Loader, config::ConfigError> {
    let theme_keys: Vec<String> = extra_params
        .keys()
        .filter(|key| key.starts_with("theme-"))
        .cloned()
        .collect();
    for key in theme_keys {
        if let Some(value) = extra_params.remove(&key) {
            let field = key["theme-".len()..].replace('-', "_");
            loader = loader.set_override(&format!("theme.{field}"), value)?;
        }
    }

    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        loader = loader.set_override("convert.html.custom_css", path)?;
    }

    Ok(loader)
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.remove(*key))
}
