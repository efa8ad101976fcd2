use std::fs;
use std::io;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use loxscan::error::EX_USAGE;
use loxscan::runner::{prompt, run};
use loxscan::LoxError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Print the tokens of a Lox script, or of each line typed at the prompt")]
struct Args {
    filename: Option<String>,

    /// Log scanner activity to stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = usage_exit_code(&err);
            let _ = err.print();
            process::exit(code);
        }
    };
    init_tracing(args.debug);

    let result = match args.filename {
        Some(filename) => run_script(&filename),
        None => repl(),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_script(filename: &str) -> Result<(), LoxError> {
    debug!(filename, "running script");
    let source = String::from_utf8(fs::read(filename)?)?;
    run(&source, &mut io::stdout().lock())
}

fn repl() -> Result<(), LoxError> {
    prompt(
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr(),
    )
}

/// Help exits cleanly; any other argument problem is a usage error.
fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EX_USAGE,
    }
}
