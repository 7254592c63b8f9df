//! tabmode - modal, keyboard-driven tab session in the terminal

mod config;
mod error;
mod log;
mod term;

use anyhow::Context;
use std::env;
use std::path::PathBuf;

use tabmode_core::{InputRouter, help::help_lines};

fn print_usage() {
    eprintln!("Usage: tabmode [OPTIONS] [FILE]...");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]...                 Files handed out by open-file, in order");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --commands <path>         Load the command table from a TOML or JSON file");
    eprintln!("  --list-commands           Print the command table and exit");
    eprintln!("  --log-file <path>         Write the log to this file or directory");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default)]
struct Options {
    commands: Option<PathBuf>,
    list_commands: bool,
    log_file: Option<PathBuf>,
    files: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--commands" => {
                i += 1;
                let path = args.get(i).ok_or("--commands requires a file path")?;
                options.commands = Some(PathBuf::from(path));
            }
            "--list-commands" => options.list_commands = true,
            "--log-file" => {
                i += 1;
                let path = args.get(i).ok_or("--log-file requires a path")?;
                options.log_file = Some(PathBuf::from(path));
            }
            arg if arg.starts_with('-') => return Err(format!("Unknown option: {arg}")),
            arg => options.files.push(PathBuf::from(arg)),
        }
        i += 1;
    }
    Ok(Some(options))
}

fn run(options: Options) -> anyhow::Result<()> {
    let (table, warnings) =
        config::load_table(options.commands.as_deref()).context("loading commands")?;
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }

    if options.list_commands {
        for line in help_lines(&table) {
            println!("{line}");
        }
        return Ok(());
    }

    let mut app = term::App::new(InputRouter::new(table), term::QueuedFiles::new(options.files));
    term::run(&mut app).context("terminal session")?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            std::process::exit(1);
        }
    };

    let _log_guard = match log::init(log::LogConfig {
        log_file_path: options.log_file.clone(),
    }) {
        Ok(guard) => {
            tracing::info!(log_file = %guard.log_file.display(), "tabmode starting");
            Some(guard)
        }
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    };

    if let Err(e) = run(options) {
        tracing::error!("fatal: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
