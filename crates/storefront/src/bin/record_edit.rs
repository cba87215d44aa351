//! `record-edit` — apply form edits to a JSON record.
//!
//! Usage:
//!   record-edit [--checkbox] <path>=<value>...
//!
//! The record is read from stdin and the edited record is written to stdout.
//! Numeric fields come from the file named by `STOREFRONT_CONFIG`, if set.

use std::io::{self, Read, Write};

use storefront::cli::{apply_edits, parse_edits, CliError};
use storefront::{logging, FormConfig};

fn run() -> Result<String, CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let edits = parse_edits(args.as_slice())?;
    let config = FormConfig::from_env()?;

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;

    apply_edits(buf.trim(), &edits, &config.mutator())
}

fn main() {
    logging::init();

    match run() {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
