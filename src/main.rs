// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use tracing::warn;

// Use library instead of local modules
use location_check::config::init_logging;
use location_check::{filter_input, ClassificationResult, LocationCode, RuleEngine};

struct Options {
    json: bool,
    strict: bool,
    codes: Vec<String>,
}

fn main() -> Result<()> {
    init_logging("warn");

    let mut options = Options { json: false, strict: false, codes: Vec::new() };
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => options.json = true,
            "--strict" => options.strict = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ => options.codes.push(arg),
        }
    }

    if options.codes.is_empty() {
        // Interactive mode (default)
        run_ui_mode()?;
    } else {
        run_codes(&options)?;
    }

    Ok(())
}

fn run_codes(options: &Options) -> Result<()> {
    let engine = RuleEngine::standard();
    let mut results: Vec<(String, ClassificationResult)> = Vec::new();

    for raw in &options.codes {
        let code = if options.strict {
            LocationCode::parse(raw)?.to_string()
        } else {
            let filtered = filter_input(raw);
            if !filtered.eq_ignore_ascii_case(raw) {
                warn!(input = %raw, code = %filtered, "input filtered");
            }
            filtered
        };

        let result = engine.interpret(&code);
        results.push((code, result));
    }

    if options.json {
        let output: Vec<&ClassificationResult> = results.iter().map(|(_, r)| r).collect();
        let json = serde_json::to_string_pretty(&output).context("Failed to encode results")?;
        println!("{}", json);
    } else {
        for (code, result) in &results {
            println!("{:<4}  {}  [{}]", code, result.phonetic, result.check);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("location-check {}", location_check::VERSION);
    println!();
    println!("Usage: location-check [--json] [--strict] [CODE...]");
    println!();
    println!("  CODE      up to 4 letters/digits, optionally ending in + or -");
    println!("  --json    print results as JSON");
    println!("  --strict  reject codes instead of filtering them");
    println!();
    println!("Without codes, starts the interactive screen.");
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let mut app = ui::App::new(RuleEngine::standard());
    ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ Interactive mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or pass codes: location-check CA12 S1A+");
    print_usage();
    std::process::exit(1);
}
