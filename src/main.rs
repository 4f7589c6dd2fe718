//! Mapped CSV CLI
//!
//! Parses a CSV file and re-emits its rows as normalized, LF-terminated CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --header --line-ending unix input.csv > normalized.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::info;
use mapped_csv::{CsvError, LineEnding, ParserBuilder, Result};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

struct Args {
    input: String,
    builder: ParserBuilder,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut builder = ParserBuilder::new();
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--header" => builder = builder.has_header(true),
            "--pad" => builder = builder.pad_short_rows(true),
            "--line-ending" => {
                let value = args.next().ok_or_else(|| {
                    CsvError::InvalidArgument("--line-ending needs a value".to_string())
                })?;
                builder = builder.line_ending(value.parse::<LineEnding>()?);
            }
            flag if flag.starts_with("--") => {
                return Err(CsvError::InvalidArgument(format!("unknown flag '{}'", flag)));
            }
            path => {
                if input.is_some() {
                    return Err(CsvError::InvalidArgument(format!(
                        "unexpected extra argument '{}'",
                        path
                    )));
                }
                input = Some(path.to_string());
            }
        }
    }

    let input = input.ok_or(CsvError::MissingArgument)?;
    Ok(Args { input, builder })
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let mut parser = args.builder.open_path(&args.input)?;

    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    while let Some(row) = parser.next_row()? {
        writer.serialize(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    info!(
        "{}: {} row(s) of {} column(s)",
        args.input,
        parser.rows_read(),
        parser.num_columns()
    );
    parser.close();

    Ok(())
}
