//! fx-hedge CLI
//!
//! Price a batch of client forward exposures from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Blended price and trade instructions from a CSV
//! fx-hedge hedge --input exposures.csv --spot 1.0850
//!
//! # Output as JSON, or trade instructions as CSV
//! fx-hedge hedge --input exposures.csv --spot 1.0850 --format json
//! fx-hedge hedge --input exposures.csv --spot 1.0850 --format csv
//!
//! # Generate a random exposure book for testing
//! fx-hedge generate --rows 12 --output exposures.csv
//! ```

use fx_hedge::core::spot::SpotRate;
use fx_hedge::hedge::calculator::HedgeCalculator;
use fx_hedge::ingest::csv_loader::{load_exposures_from_path, CsvOptions, REQUIRED_COLUMNS};
use fx_hedge::report::presenter::{render_json, render_text, render_trades_csv, OutputFormat};
use fx_hedge::simulation::generator::{
    generate_random_exposures, write_exposures_csv, ExposureConfig,
};
use log::info;
use std::fs::File;
use std::io;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fx-hedge — blended forward hedge pricing for client FX exposures

USAGE:
    fx-hedge <COMMAND> [OPTIONS]

COMMANDS:
    hedge       Compute the blended hedge price and bank trade instructions
    generate    Generate a random exposure CSV (for testing)
    help        Show this message

OPTIONS (hedge):
    --input <FILE>        Path to exposures CSV with columns: {}
    --spot <RATE>         Spot rate (default: 1.000000)
    --format <FORMAT>     Output format: text (default), json, or csv
    --delimiter <CHAR>    CSV field delimiter (default: ,)

OPTIONS (generate):
    --rows <N>            Number of exposure lines (default: 12)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    fx-hedge hedge --input exposures.csv --spot 1.0850
    fx-hedge hedge --input exposures.csv --spot 1.0850 --format json
    fx-hedge generate --rows 24 --output exposures.csv

Set RUST_LOG=debug for diagnostic logging."#,
        REQUIRED_COLUMNS.join(", ")
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn next_value(args: &[String], i: usize, flag: &str, expected: &str) -> String {
    args.get(i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, expected)))
}

fn cmd_hedge(args: &[String]) {
    let mut input_path = None;
    let mut spot = SpotRate::default();
    let mut format = OutputFormat::default();
    let mut options = CsvOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(next_value(args, i, "--input", "a file path"));
            }
            "--spot" => {
                i += 1;
                spot = next_value(args, i, "--spot", "a rate")
                    .parse()
                    .unwrap_or_else(|e| fail(e));
            }
            "--format" => {
                i += 1;
                format = next_value(args, i, "--format", "'text', 'json' or 'csv'")
                    .parse()
                    .unwrap_or_else(|e| fail(e));
            }
            "--delimiter" => {
                i += 1;
                let value = next_value(args, i, "--delimiter", "a single character");
                options.delimiter = match value.as_bytes() {
                    [b] => *b,
                    _ => fail("--delimiter requires a single character"),
                };
            }
            _ => fail(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        fail(format!(
            "Please supply --input <FILE>: a CSV with columns: {}",
            REQUIRED_COLUMNS.join(", ")
        ))
    });

    let exposures = load_exposures_from_path(&path, &options).unwrap_or_else(|e| fail(e));
    info!("pricing {} exposures at spot {}", exposures.len(), spot);

    let result = HedgeCalculator::compute(exposures.rows(), spot)
        .unwrap_or_else(|e| fail(format!("Calculation error: {}", e)));

    match format {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => {
            let json = render_json(&result).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        OutputFormat::Csv => {
            render_trades_csv(&result, io::stdout().lock()).unwrap_or_else(|e| fail(e));
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = ExposureConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                config.row_count = next_value(args, i, "--rows", "a number")
                    .parse()
                    .unwrap_or_else(|_| fail("--rows requires a number"));
            }
            "--output" => {
                i += 1;
                output_path = Some(next_value(args, i, "--output", "a file path"));
            }
            _ => fail(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    let set = generate_random_exposures(&config);

    if let Some(path) = output_path {
        let file = File::create(&path)
            .unwrap_or_else(|e| fail(format!("Error writing to '{}': {}", path, e)));
        write_exposures_csv(&set, file)
            .unwrap_or_else(|e| fail(format!("Error writing to '{}': {}", path, e)));
        eprintln!("Generated {} exposures → {}", set.len(), path);
    } else {
        write_exposures_csv(&set, io::stdout().lock()).unwrap_or_else(|e| fail(e));
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "hedge" => cmd_hedge(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
