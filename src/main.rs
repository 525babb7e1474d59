#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! irsx — retrieve and render IRS e-file (Form 990) filings.

mod cli;
mod commands;
mod filing;
mod types;

use clap::Parser;

use cli::{Cli, Writers, write_error};
use commands::RunOptions;
use filing::XmlRunner;
use types::ErrorOutput;

fn main() {
    let opts = RunOptions::from(Cli::parse());

    let runner = XmlRunner::new(opts.filing_dir.clone());
    let mut stdout = std::io::stdout();

    match commands::run_batch(&opts, &runner, &Writers, &mut stdout) {
        Ok(summary) => {
            if opts.debug {
                let mode = if summary.listed { " (list_schedules)" } else { "" };
                eprintln!("[debug] processed {} filing(s){mode}", summary.processed);
            }
            println!();
        }
        Err(err) => {
            let error_output = ErrorOutput::from_filing_error(&err);
            write_error(&error_output, opts.format);
            std::process::exit(err.exit_code());
        }
    }
}
