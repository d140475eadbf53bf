use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use css::{CompoundSelector, SelectorParseError, matches_compound, parse_selector_list};
use html::Document;
use html::debug::outline_from_dom;
use layout::{FlowLayout, MonospaceMeasurer};
use split::{SplitError, SplitOptions, SplitResult, split_text};
use thiserror::Error;

const OUTLINE_CAP: usize = 100_000;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid --exclude selector: {0}")]
    Exclude(#[from] SelectorParseError),

    #[error("--exclude `{0}` uses a combinator; only compound selectors are supported")]
    ExcludeCombinator(String),

    #[error(transparent)]
    Split(#[from] SplitError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The whole document as HTML.
    #[default]
    Html,
    /// An indented tree of the document.
    Outline,
    /// Wrapper counts and the text of each line.
    Summary,
}

/// Split the text of an element into line, word and char spans.
#[derive(Debug, Parser)]
#[command(name = "textsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// HTML file to read.
    pub file: PathBuf,

    /// Selector of the element(s) to split.
    pub selector: String,

    /// Word delimiter (default: a single space).
    #[arg(long)]
    pub split_by: Option<String>,

    #[arg(long)]
    pub word_class: Option<String>,

    #[arg(long)]
    pub char_class: Option<String>,

    #[arg(long)]
    pub line_class: Option<String>,

    /// Use `display: inline` wrappers.
    #[arg(long)]
    pub inline: bool,

    /// Split every text-only descendant of the matched elements.
    #[arg(short, long)]
    pub recursive: bool,

    /// Skip elements matching this compound selector, and everything inside them (recursive mode).
    #[arg(long, value_name = "SELECTOR")]
    pub exclude: Vec<String>,

    /// Container width in px.
    #[arg(long, default_value_t = 600.0)]
    pub width: f32,

    /// Advance of every character in px.
    #[arg(long, default_value_t = 10.0)]
    pub advance: f32,

    #[arg(long, default_value_t = 20.0)]
    pub line_height: f32,

    /// TOML file with split options; flags override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    pub format: Format,
}

pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let source = fs::read_to_string(&cli.file).map_err(|source| CliError::Read {
        path: cli.file.clone(),
        source,
    })?;
    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => SplitOptions::default(),
    };
    print!("{}", execute(&cli, &source, base)?);
    Ok(())
}

fn load_config(path: &Path) -> Result<SplitOptions, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies the command-line flags on top of `base`.
pub fn build_options(cli: &Cli, base: SplitOptions) -> Result<SplitOptions, CliError> {
    let mut options = base;
    if let Some(split_by) = &cli.split_by {
        options.split_by = split_by.clone();
    }
    if let Some(class) = &cli.word_class {
        options.class_names.word = class.clone();
    }
    if let Some(class) = &cli.char_class {
        options.class_names.char = class.clone();
    }
    if let Some(class) = &cli.line_class {
        options.class_names.line = class.clone();
    }
    options.inline |= cli.inline;
    options.recursive |= cli.recursive;

    if !cli.exclude.is_empty() {
        let excluded = exclude_compounds(&cli.exclude)?;
        options = options.with_filter(move |node| {
            !excluded.iter().any(|compound| matches_compound(node, compound))
        });
    }
    Ok(options)
}

fn exclude_compounds(selectors: &[String]) -> Result<Vec<CompoundSelector>, CliError> {
    let mut out = Vec::new();
    for selector in selectors {
        for complex in parse_selector_list(selector)?.selectors {
            if !complex.combinators.is_empty() {
                return Err(CliError::ExcludeCombinator(selector.clone()));
            }
            out.extend(complex.compounds);
        }
    }
    Ok(out)
}

pub fn execute(cli: &Cli, source: &str, base: SplitOptions) -> Result<String, CliError> {
    let options = build_options(cli, base)?;
    let mut document = Document::parse(source);
    let measurer = MonospaceMeasurer {
        advance: cli.advance,
        line_height: cli.line_height,
    };
    let mut host = FlowLayout::new(measurer, cli.width);
    let result = split_text(&mut document, &mut host, cli.selector.as_str(), &options)?;
    log::info!(
        "split {} chars, {} words, {} lines in {} layout pass(es)",
        result.chars.len(),
        result.words.len(),
        result.lines.len(),
        host.passes()
    );
    Ok(render(&document, &result, cli.format))
}

fn render(document: &Document, result: &SplitResult, format: Format) -> String {
    match format {
        Format::Html => {
            let mut out = html::to_html(document.root());
            out.push('\n');
            out
        }
        Format::Outline => {
            let mut out = outline_from_dom(document.root(), OUTLINE_CAP).join("\n");
            out.push('\n');
            out
        }
        Format::Summary => {
            let mut out = String::new();
            let _ = writeln!(out, "chars: {}", result.chars.len());
            let _ = writeln!(out, "words: {}", result.words.len());
            let _ = writeln!(out, "lines: {}", result.lines.len());
            for (i, &line) in result.lines.iter().enumerate() {
                let text = document.text_content(line).unwrap_or_default();
                let _ = writeln!(out, "{i:>4}  {}", text.trim_end());
            }
            out
        }
    }
}
