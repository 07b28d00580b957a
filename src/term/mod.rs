/*!
## Terminal Module

Command-line front end: reads a program from a file, runs it against
an inbox and a floor given as flags, then prints the outbox.

*/

extern crate ansi_term;
extern crate ctrlc;
use crate::lang::Error;
use crate::mach::{Event, Runtime, Val};
use crate::error;
use ansi_term::Style;
use clap::Parser;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const BATCH_CYCLES: usize = 5000;
const EXIT_INTERRUPTED: i32 = 130;

/// Human Resource Machine assembly
#[derive(Parser, Debug)]
#[command(name = "hrm")]
#[command(about = "Compile and run a mailroom assembly program", long_about = None)]
struct Args {
    /// Values waiting in the inbox, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    inbox: Vec<String>,

    /// Initial floor tiles, comma separated; `.` is an empty tile
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    floor: Vec<String>,

    /// Number of floor tiles (defaults to the length of --floor)
    #[arg(long)]
    tiles: Option<usize>,

    /// Print the compiled bytecode before running
    #[arg(long)]
    listing: bool,

    /// Stop with an error after this many instructions
    #[arg(long)]
    max_cycles: Option<usize>,

    /// Program source file
    source: PathBuf,
}

pub fn main() {
    let args = Args::parse();

    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        print_errors(&[error!(InternalError; format!("Error setting Ctrl-C handler: {}", e))]);
        std::process::exit(1);
    }

    let code = match main_loop(&args, &interrupted) {
        Ok(code) => code,
        Err(errors) => {
            print_errors(&errors);
            1
        }
    };
    std::process::exit(code);
}

fn main_loop(args: &Args, interrupted: &AtomicBool) -> Result<i32, Vec<Error>> {
    let source = read_source(&args.source).map_err(|e| vec![e])?;
    let inbox = parse_values(&args.inbox).map_err(|e| vec![e])?;
    let floor = build_floor(&args.floor, args.tiles).map_err(|e| vec![e])?;

    let mut runtime = Runtime::new(inbox, floor);
    if !runtime.enter(&source) {
        return Err(runtime.errors().to_vec());
    }
    if args.listing {
        print!("{}", runtime.chunk().disassemble(&args.source.display().to_string()));
    }

    let mut cycles = 0;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            print_outbox(runtime.outbox());
            eprintln!("{}", Style::new().bold().paint("BREAK"));
            return Ok(EXIT_INTERRUPTED);
        }
        let batch = match args.max_cycles {
            Some(max) if cycles >= max => {
                print_outbox(runtime.outbox());
                return Err(vec![error!(CyclesExceeded;
                    format!("Stopped after {} instructions.", max))]);
            }
            Some(max) => BATCH_CYCLES.min(max - cycles),
            None => BATCH_CYCLES,
        };
        match runtime.execute(batch) {
            Event::Running => cycles += batch,
            Event::Stopped => break,
            Event::Errors(errors) => {
                print_outbox(runtime.outbox());
                return Err(errors);
            }
        }
    }

    print_outbox(runtime.outbox());
    let metrics = runtime.metrics();
    println!("Steps: {} Size: {}", metrics.steps, metrics.size);
    Ok(0)
}

fn read_source(path: &Path) -> Result<String, Error> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(error!(FileNotFound; path.display().to_string()));
        }
        Err(e) => return Err(error!(InternalError; format!("{}: {}", path.display(), e))),
    };
    if source.trim().is_empty() {
        return Err(error!(SyntaxError; format!("{} is empty.", path.display())));
    }
    Ok(source)
}

fn parse_values(values: &[String]) -> Result<Vec<Val>, Error> {
    values.iter().map(|s| s.trim().parse()).collect()
}

fn build_floor(values: &[String], tiles: Option<usize>) -> Result<Vec<Val>, Error> {
    let mut floor = parse_values(values)?;
    if let Some(tiles) = tiles {
        if floor.len() > tiles {
            return Err(error!(TileOutOfRange;
                format!("There are only {} slots available on this floor!", tiles)));
        }
        floor.resize(tiles, Val::Empty);
    }
    Ok(floor)
}

fn print_outbox(outbox: &[Val]) {
    for val in outbox {
        println!("{}", val);
    }
}

fn print_errors(errors: &[Error]) {
    for error in errors {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    }
}
