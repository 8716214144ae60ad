//! Reckon CLI - interactive formula calculator
//!
//! Reads formulas from the command line or a REPL, evaluates them, and
//! prints `Result = <number>` or `Error: <message>`. Cell values are held
//! in an in-memory sheet populated with `:set`; data blobs and stock
//! quotes resolve against files under the data directory.

mod loader;

use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

use loader::{FileQuoteSource, FileTableLoader};
use reckon_core::CellAddress;
use reckon_formula::{parse_formula, Evaluator, SheetSource};

#[derive(Parser)]
#[command(name = "reckon")]
#[command(author, version, about = "Spreadsheet-style formula calculator")]
struct Cli {
    /// Formula to evaluate; starts the REPL when omitted
    formula: Option<String>,

    /// Directory searched for data blobs and quotes.csv
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let loader = FileTableLoader::new(cli.data_dir.clone());
    let quotes = FileQuoteSource::new(cli.data_dir.join("quotes.csv"));
    let mut sheet = SheetSource::new();

    match cli.formula {
        Some(formula) => {
            evaluate_line(&formula, &sheet, &quotes, &loader);
            Ok(())
        }
        None => repl(&mut sheet, &quotes, &loader),
    }
}

/// The read-eval-print loop
fn repl(sheet: &mut SheetSource, quotes: &FileQuoteSource, loader: &FileTableLoader) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("reckon {} - :help for commands, :quit to exit", env!("CARGO_PKG_VERSION"));

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if let Some(command) = line.strip_prefix(':') {
                    if !run_command(command, sheet) {
                        break;
                    }
                    continue;
                }

                evaluate_line(&line, sheet, quotes, loader);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    debug!("repl finished");
    Ok(())
}

/// Parse and evaluate one formula, printing the outcome
fn evaluate_line(
    formula: &str,
    sheet: &SheetSource,
    quotes: &FileQuoteSource,
    loader: &FileTableLoader,
) {
    let expr = match parse_formula(formula) {
        Ok(expr) => expr,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };
    debug!(%expr, "parsed");

    let mut evaluator = Evaluator::new()
        .with_cells(sheet)
        .with_quotes(quotes)
        .with_loader(loader);

    match evaluator.evaluate(&expr) {
        Ok(result) => {
            println!("Result = {result}");
            if let Some(io_error) = evaluator.take_io_error() {
                println!("  note: {io_error}");
            }
        }
        Err(e) => println!("Error: {e}"),
    }
}

/// Handle a `:command`; returns false when the REPL should exit
fn run_command(command: &str, sheet: &mut SheetSource) -> bool {
    let mut words = command.split_whitespace();

    match words.next() {
        Some("q") | Some("quit") | Some("exit") => return false,

        Some("set") => match (words.next(), words.next()) {
            (Some(addr), Some(value)) => {
                match (CellAddress::parse(addr), value.parse::<f64>()) {
                    (Ok(addr), Ok(value)) => {
                        sheet.set(addr, value);
                        println!("{addr} = {value}");
                    }
                    (Err(e), _) => println!("Error: {e}"),
                    (_, Err(_)) => println!("Error: '{value}' is not a number"),
                }
            }
            _ => println!("usage: :set <cell> <number>"),
        },

        Some("clear") => match words.next() {
            Some(addr) => match CellAddress::parse(addr) {
                Ok(addr) => {
                    sheet.clear(addr);
                    println!("{addr} cleared");
                }
                Err(e) => println!("Error: {e}"),
            },
            None => println!("usage: :clear <cell>"),
        },

        Some("ast") => {
            let rest = command
                .trim_start()
                .strip_prefix("ast")
                .unwrap_or("")
                .trim();
            match parse_formula(rest) {
                Ok(expr) => println!("{expr}"),
                Err(e) => println!("Error: {e}"),
            }
        }

        Some("help") => {
            println!("  <formula>            evaluate, e.g. =Sum(1,2,3)");
            println!("  :set <cell> <value>  set a cell, e.g. :set A1 3.5");
            println!("  :clear <cell>        unset a cell");
            println!("  :ast <formula>       print the parsed form");
            println!("  :quit                exit");
        }

        _ => println!("unknown command :{command} (try :help)"),
    }

    true
}
