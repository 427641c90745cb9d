extern crate config;
#[macro_use]
extern crate logger;
extern crate rankedset;
extern crate util;

use std::env::args;
use std::io::{stdin, stdout, BufRead, Write};
use std::process::exit;

use config::Config;
use logger::{Level, Logger};
use rankedset::command::{command, List};
use rankedset::response::Response;
use rankedset::Options;
use util::split_args;

fn main() {
    let mut config = Config::new(Logger::new_err(Level::Notice));
    if let Some(f) = args().nth(1) {
        if let Err(err) = config.parsefile(f.clone()) {
            log!(config.logger, Warning, "Failed to read configuration {}: {}", f, err);
            eprintln!("Failed to read configuration {}: {}", f, err);
            exit(1);
        }
    }

    let mut list = match List::with_options(Options::from_config(&config)) {
        Ok(list) => list,
        Err(err) => {
            eprintln!("Invalid options: {}", err);
            exit(1);
        }
    };
    log!(config.logger, Notice, "Ready to accept commands, {} levels", list.max_level());

    let input = stdin();
    let output = stdout();
    let mut output = output.lock();
    for line in input.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log!(config.logger, Warning, "Failed to read input: {}", err);
                break;
            }
        };
        let argv = match split_args(&line) {
            Ok(argv) => argv,
            Err(err) => {
                let _ = writeln!(output, "{}", Response::Error(err.to_string()));
                continue;
            }
        };
        if argv.is_empty() {
            continue;
        }
        if argv[0].eq_ignore_ascii_case("quit") {
            break;
        }
        let response = command(&argv, &mut list);
        if writeln!(output, "{}", response).is_err() {
            break;
        }
    }
    log!(config.logger, Verbose, "Shutting down with {} entries", list.len());
}
