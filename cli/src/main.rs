use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use charview::{
    date::to_datetime,
    CharView, Error, Parser as JsonParser, ParserOptions, Records, SplitOptions,
};
use clap::{Parser as ClapParser, Subcommand};
use tracing::*;

mod logging;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log what the parsers are doing.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a JSON file and print it back.
    Json {
        path: PathBuf,
        /// Deepest nesting accepted.
        #[arg(long, default_value_t = ParserOptions::default().max_depth)]
        max_depth: usize,
        /// Pretty print instead of compact output.
        #[arg(long)]
        pretty: bool,
    },
    /// Split a file into records and fields, one field per line.
    Split {
        path: PathBuf,
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
        #[arg(short, long, default_value_t = '\n')]
        records: char,
        #[arg(long, requires = "close")]
        open: Option<char>,
        #[arg(long, requires = "open")]
        close: Option<char>,
        /// Same character opening and closing a region.
        #[arg(short, long, conflicts_with = "open")]
        quote: Option<char>,
        #[arg(short, long)]
        escape: Option<char>,
    },
    /// Parse an ISO 8601 style date and time.
    Date { text: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();

    logging::setup_logging(cli.verbose);

    debug!(command = ?cli.command);

    match cli.command {
        Command::Json {
            path,
            max_depth,
            pretty,
        } => json(&path, max_depth, pretty),
        Command::Split {
            path,
            delimiter,
            records,
            open,
            close,
            quote,
            escape,
        } => {
            let mut options = SplitOptions::new(byte(delimiter)?);
            if let (Some(open), Some(close)) = (open, close) {
                options = options.brackets(byte(open)?, byte(close)?);
            }
            if let Some(quote) = quote {
                options = options.quoted(byte(quote)?);
            }
            if let Some(escape) = escape {
                options = options.escape(byte(escape)?);
            }

            split(&path, byte(records)?, options)
        }
        Command::Date { text } => date(&text),
    }
}

fn byte(c: char) -> anyhow::Result<u8> {
    if !c.is_ascii() {
        bail!("`{c}` is not an ASCII character");
    }

    Ok(c as u8)
}

fn read(path: &Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(file) => Ok(file),
        Err(e) => {
            error!(path = ?path, "failed to read input");
            Err(e).with_context(|| format!("failed to read file `{}`", path.display()))
        }
    }
}

/// `path:line:col: message`
fn report(path: &Path, source: &str, e: &Error<'_>) -> anyhow::Error {
    match e.position_in(source.as_bytes()) {
        Some(at) => anyhow::anyhow!("{}:{}:{}: {}", path.display(), at.line, at.col, e),
        None => anyhow::anyhow!("{}: {}", path.display(), e),
    }
}

fn json(path: &Path, max_depth: usize, pretty: bool) -> anyhow::Result<()> {
    let source = read(path)?;

    let value = JsonParser::new(ParserOptions { max_depth })
        .parse(CharView::from(&source))
        .map_err(|e| report(path, &source, &e))?;

    if pretty {
        println!("{:#}", value);
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn split(path: &Path, record: u8, options: SplitOptions) -> anyhow::Result<()> {
    let source = read(path)?;

    for (i, record) in Records::new(&source, record, options).enumerate() {
        let fields = record.map_err(|e| report(path, &source, &e))?;

        for field in fields {
            let field = field.map_err(|e| report(path, &source, &e))?;
            println!("{}\t{}", i, field);
        }
    }

    Ok(())
}

fn date(text: &str) -> anyhow::Result<()> {
    let mut v = CharView::from(text);

    let datetime = match to_datetime(&mut v) {
        Ok(dt) => dt,
        Err(e) => bail!("invalid date `{}`: {}", text, e),
    };

    if !v.trim().is_empty() {
        bail!("unexpected `{}` after date", v);
    }

    println!("{}", datetime);

    Ok(())
}
