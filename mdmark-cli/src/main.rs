// Command-line interface for mdmark
//
// Every command opens the input file in a fresh session (the same state a viewer
// page holds), performs one action and prints the result. Ids are reassigned on
// every run, so annotations are addressed by their 1-based position in `list`
// output or by their text.
//
// Usage:
//  mdmark list <input> [--json]                                  - List highlights
//  mdmark render <input> [-o FILE]                               - Print the rendered view
//  mdmark highlight <input> --text T [--occurrence N] [--color C] [--comment C] [-o FILE]
//  mdmark remove <input> (--index N | --text T) [-o FILE]        - Remove one highlight
//  mdmark export <input> [--dir DIR]                             - Write highlighted-content.md
//  mdmark palette                                                - Show the highlight colors
//
// Configuration is read from mdmark.toml in the working directory when present,
// then from --config.

use clap::{Arg, ArgAction, ArgGroup, Command, ValueHint};
use log::LevelFilter;
use mdmark_config::{Loader, MdmarkConfig};
use mdmark_engine::palette::{default_swatch, SWATCHES};
use mdmark_engine::{
    Annotation, ComrakRenderer, HighlightColor, Rect, RenderOptions, Session, EXPORT_FILENAME,
};
use std::fs;

fn build_cli() -> Command {
    let input = Arg::new("input")
        .help("Markdown file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath);
    let output = Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath);

    Command::new("mdmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Highlight and annotate markdown documents")
        .long_about(
            "mdmark keeps highlights inside plain markdown as inline <mark> elements.\n\n\
            Examples:\n  \
            mdmark list notes.md                           # Show existing highlights\n  \
            mdmark highlight notes.md --text \"frost\"       # Highlight the first 'frost'\n  \
            mdmark remove notes.md --index 2 -o notes.md   # Drop the second highlight\n  \
            mdmark export notes.md --dir out/              # Write out/highlighted-content.md",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log lifecycle events to stderr (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List the highlights found in a document")
                .arg(input.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the annotation records as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Print the rendered HTML view of a document")
                .arg(input.clone())
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("highlight")
                .about("Highlight a passage and print the updated markdown")
                .long_about(
                    "Select an occurrence of TEXT in the rendered document, highlight it and\n\
                    print the exported markdown.\n\n\
                    The passage must not cut through inline formatting: a selection that\n\
                    starts in plain text and ends inside *emphasis* is rejected.",
                )
                .arg(input.clone())
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Rendered text to highlight")
                        .required(true),
                )
                .arg(
                    Arg::new("occurrence")
                        .long("occurrence")
                        .help("Which occurrence of the text to use (1-based)")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("color")
                        .long("color")
                        .help("Swatch name or CSS color (defaults to highlight.default_color)"),
                )
                .arg(
                    Arg::new("comment")
                        .long("comment")
                        .help("Comment to attach to the highlight"),
                )
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove one highlight and print the updated markdown")
                .arg(input.clone())
                .arg(
                    Arg::new("index")
                        .long("index")
                        .help("Position of the highlight in `list` output (1-based)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Text of the highlight to remove"),
                )
                .group(
                    ArgGroup::new("target")
                        .args(["index", "text"])
                        .required(true),
                )
                .arg(output),
        )
        .subcommand(
            Command::new("export")
                .about("Write highlighted-content.md for a document")
                .arg(input)
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .help("Directory to write into (defaults to the working directory)")
                        .default_value(".")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(Command::new("palette").about("Show the highlight colors"))
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));
    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("list", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_list_command(input, sub_matches.get_flag("json"), &config);
        }
        Some(("render", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_render_command(input, output, &config);
        }
        Some(("highlight", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let text = sub_matches
                .get_one::<String>("text")
                .expect("text is required");
            let occurrence = *sub_matches
                .get_one::<u64>("occurrence")
                .expect("occurrence has a default");
            let occurrence = usize::try_from(occurrence).unwrap_or(usize::MAX);
            let color = sub_matches
                .get_one::<String>("color")
                .map(|raw| HighlightColor::from_css(raw))
                .unwrap_or_else(|| config.highlight.default_color());
            let comment = sub_matches.get_one::<String>("comment").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_highlight_command(input, text, occurrence, color, comment, output, &config);
        }
        Some(("remove", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let target = match sub_matches.get_one::<u64>("index") {
                Some(index) => RemoveTarget::Index(usize::try_from(*index).unwrap_or(usize::MAX)),
                None => RemoveTarget::Text(
                    sub_matches
                        .get_one::<String>("text")
                        .expect("index or text is required")
                        .clone(),
                ),
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_remove_command(input, &target, output, &config);
        }
        Some(("export", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let dir = sub_matches
                .get_one::<String>("dir")
                .expect("dir has a default");
            handle_export_command(input, dir, &config);
        }
        Some(("palette", _)) => {
            print!("{}", format_palette());
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>) -> MdmarkConfig {
    let loader = Loader::new().with_optional_file("mdmark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Read `input` into a new session configured from `config`
fn open_session(input: &str, config: &MdmarkConfig) -> Session {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    Session::with_document(
        Box::new(ComrakRenderer::new(RenderOptions::from(&config.render))),
        config.highlight.ids.generator(),
        &source,
    )
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

fn handle_list_command(input: &str, json: bool, config: &MdmarkConfig) {
    let session = open_session(input, config);

    if json {
        let rendered = serde_json::to_string_pretty(session.annotations()).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
        println!("{rendered}");
    } else {
        print!("{}", format_annotation_list(session.annotations()));
    }
}

fn handle_render_command(input: &str, output: Option<&str>, config: &MdmarkConfig) {
    let session = open_session(input, config);
    let html = session.view().to_html().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    write_output(output, &html);
}

fn handle_highlight_command(
    input: &str,
    text: &str,
    occurrence: usize,
    color: HighlightColor,
    comment: Option<&str>,
    output: Option<&str>,
    config: &MdmarkConfig,
) {
    let mut session = open_session(input, config);

    let Some(selection) = session
        .view()
        .find_text(text, occurrence - 1)
    else {
        eprintln!("Error: occurrence {occurrence} of '{text}' not found in the rendered document");
        std::process::exit(1);
    };

    // No layout on the command line; the toolbar position is irrelevant.
    session.select(selection, Rect::default());
    let created = session.highlight(color).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    if let Some(comment) = comment {
        session.set_comment(&created.id, comment);
    }

    write_output(output, &session.export().markdown);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RemoveTarget {
    Index(usize),
    Text(String),
}

fn handle_remove_command(
    input: &str,
    target: &RemoveTarget,
    output: Option<&str>,
    config: &MdmarkConfig,
) {
    let mut session = open_session(input, config);

    let annotation = resolve_target(session.annotations(), target)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        })
        .clone();

    session.remove(&annotation.id, Some(&annotation.text));
    write_output(output, &session.export().markdown);
}

fn handle_export_command(input: &str, dir: &str, config: &MdmarkConfig) {
    let session = open_session(input, config);
    let path = session.export().write_to(dir).unwrap_or_else(|e| {
        eprintln!("Error writing {EXPORT_FILENAME} into '{dir}': {e}");
        std::process::exit(1);
    });
    println!("Wrote {}", path.display());
}

fn resolve_target<'a>(
    annotations: &'a [Annotation],
    target: &RemoveTarget,
) -> Result<&'a Annotation, String> {
    match target {
        RemoveTarget::Index(index) => index
            .checked_sub(1)
            .and_then(|i| annotations.get(i))
            .ok_or_else(|| {
                format!(
                    "no highlight at index {index} (document has {})",
                    annotations.len()
                )
            }),
        RemoveTarget::Text(text) => annotations
            .iter()
            .find(|a| &a.text == text)
            .ok_or_else(|| format!("no highlight with text '{text}'")),
    }
}

fn format_annotation_list(annotations: &[Annotation]) -> String {
    if annotations.is_empty() {
        return "No highlights\n".to_string();
    }

    let mut out = String::new();
    for (i, annotation) in annotations.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<26}  {:?}\n",
            i + 1,
            annotation.color.as_str(),
            annotation.text
        ));
        if annotation.has_comment() {
            out.push_str(&format!("     comment: {}\n", annotation.comment));
        }
    }
    out
}

fn format_palette() -> String {
    let default = default_swatch();
    let mut out = String::new();
    for swatch in &SWATCHES {
        out.push_str(&format!(
            "{:<8}{:<10}{}{}\n",
            swatch.name,
            swatch.display,
            swatch.overlay,
            if swatch.name == default.name {
                "  (default)"
            } else {
                ""
            }
        ));
    }
    out
}
