use std::fs;

use clap::Parser;
use quackscript::{interpreter::host::Host, run_script};

/// quackscript is a small, duck-themed scripting language with typed
/// declarations, first-class functions and module imports.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells quackscript to look at a file instead of an inline script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = run_script(&script, Host::process()) {
        eprintln!("{e}");
    }
}
