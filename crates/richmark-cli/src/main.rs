// Command-line interface for richmark
//
// Reads editor markup (an HTML fragment) from a file or stdin and writes it
// back out as Markdown or as normalized HTML.
//
// Usage:
//  richmark [<input>] [--to markdown|html] [--output <path>] [--config <path>]
//
// When --output names an existing directory the export's default file name
// (document.md / document.html) is used inside it.

mod config;
mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use richmark::{EditorSession, Export, ExportFormat, MarkdownConverter};
use tracing::debug;

use crate::config::Loader;

#[derive(Parser)]
#[command(name = "richmark")]
#[command(about = "Convert rich text editor markup to Markdown")]
#[command(version)]
struct Cli {
    /// HTML input file; reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Export format
    #[arg(long, value_enum, default_value_t = Target::Markdown)]
    to: Target,

    /// Output file, or a directory to write the export into
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to a richmark.toml configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Escape Markdown metacharacters in text
    #[arg(long)]
    escape_text: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    Markdown,
    Html,
}

impl From<Target> for ExportFormat {
    fn from(target: Target) -> Self {
        match target {
            Target::Markdown => ExportFormat::Markdown,
            Target::Html => ExportFormat::Html,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if cli.escape_text {
        loader = loader.set_override("markdown.escape_text", true)?;
    }
    let config = loader.build().context("failed to load configuration")?;

    logging::init(&config.logging, cli.verbose);

    let markup = read_input(cli.input.as_deref())?;
    debug!(bytes = markup.len(), "read markup");

    let mut session = EditorSession::from_markup(&markup);
    session.set_converter(MarkdownConverter::with_options(config.markdown.into()));

    let export = session.export(cli.to.into());
    write_output(cli.output.as_deref(), &export)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut markup = String::new();
            io::stdin()
                .read_to_string(&mut markup)
                .context("failed to read stdin")?;
            Ok(markup)
        }
    }
}

fn write_output(output: Option<&Path>, export: &Export) -> Result<()> {
    let Some(path) = output else {
        println!("{}", export.contents);
        return Ok(());
    };

    let target = if path.is_dir() {
        path.join(export.file_name)
    } else {
        path.to_path_buf()
    };

    fs::write(&target, &export.contents)
        .with_context(|| format!("failed to write {}", target.display()))?;
    debug!(path = %target.display(), mime = export.mime_type, "wrote export");
    Ok(())
}
