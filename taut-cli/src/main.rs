//! Taut CLI
//!
//! Minifies an HTML document read from a file, a string or stdin.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use taut_common::warning::warning_count;
use taut_html::Lexer;
use taut_minify::Minifier;
use taut_minify::registry::HTML_MEDIA_TYPE;

/// Taut: streaming, semantics-preserving HTML minifier
#[derive(Parser, Debug)]
#[command(name = "taut")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Minify a file to stdout
    taut index.html

    # Minify stdin into a file and report the savings
    cat index.html | taut -o index.min.html --stats

    # Minify an HTML string directly
    taut --html '<p>Hello   world</p>'

    # Show how the lexer splits a document
    taut --tokens --html '<a href="x">y</a>'
"#)]
struct Cli {
    /// HTML file to minify (stdin when omitted)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Minify this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print input and output sizes to stderr
    #[arg(long)]
    stats: bool,

    /// Print the lexer's token stream instead of minifying
    #[arg(long)]
    tokens: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let input = read_input(&cli)?;

    if cli.tokens {
        for token in Lexer::new(input).into_tokens() {
            println!("{token}");
        }
        return Ok(());
    }

    let minifier = Minifier::new().with_html();
    let output = minifier
        .bytes(HTML_MEDIA_TYPE, &input)
        .context("failed to minify document")?;
    write_output(cli.output.as_deref(), &output)?;

    if cli.stats {
        print_stats(input.len(), output.len());
    }
    Ok(())
}

/// Load the document from `--html`, the file argument, or stdin
fn read_input(cli: &Cli) -> Result<Vec<u8>> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone().into_bytes());
    }
    if let Some(ref path) = cli.path {
        return fs::read(path).with_context(|| format!("failed to read {}", path.display()));
    }
    let mut input = Vec::new();
    let _ = io::stdin()
        .read_to_end(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

fn write_output(path: Option<&Path>, output: &[u8]) -> Result<()> {
    if let Some(path) = path {
        return fs::write(path, output).with_context(|| format!("failed to write {}", path.display()));
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(output).context("failed to write stdout")?;
    stdout.flush().context("failed to write stdout")
}

/// Print sizes and the compression ratio to stderr
fn print_stats(original: usize, minified: usize) {
    #[allow(clippy::cast_precision_loss)]
    let ratio = if original == 0 {
        100.0
    } else {
        minified as f64 / original as f64 * 100.0
    };
    eprintln!(
        "{} {original} -> {} bytes ({ratio:.1}%)",
        "taut".green().bold(),
        minified.cyan()
    );
    let warnings = warning_count();
    if warnings > 0 {
        eprintln!("{} {warnings} warning(s)", "taut".yellow().bold());
    }
}
