//! Reads a JSON document from stdin and prints it back normalised.
//!
//! With `--tree`, prints the raw parse tree instead of the folded value.
//! Set `RUST_LOG=debug` (or `trace`) to watch the parser at work.

use std::io::{self, Read};
use std::process::ExitCode;

use parser_example::{parser, to_value};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let show_tree = std::env::args().skip(1).any(|arg| arg == "--tree");

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    match run(&input, show_tree) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &str, show_tree: bool) -> Result<String, Box<dyn std::error::Error>> {
    let tree = parser()?.parse_all("value", input)?;
    let output = if show_tree {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string_pretty(&to_value(&tree)?)?
    };
    Ok(output)
}
