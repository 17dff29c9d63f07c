//! CLI entry point for the Z16 simulator and disassembler.
//!
//! Loads a raw binary image, then writes the full disassembly, execution
//! trace, register dump and memory listing to `<input>.dis`.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use z16_core::{Simulator, StringSink};

#[cfg(test)]
use tempfile as _;

const HELP_TEXT: &str = "Usage: z16-sim <machine_code_file_name>";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    input: PathBuf,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut input: Option<PathBuf> = None;

    for arg in args {
        if arg == "--help" {
            return Ok(ParseResult::Help);
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err(String::from("multiple input paths provided"));
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| String::from("missing input path"))?;
    Ok(ParseResult::Args(CliArgs { input }))
}

/// Report path: the input path with `.dis` appended.
fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".dis");
    PathBuf::from(name)
}

fn run(args: &CliArgs) -> Result<(), String> {
    let image = fs::read(&args.input)
        .map_err(|_| format!("Error opening binary file: {}", args.input.display()))?;

    let mut sim = Simulator::new();
    sim.load_image(&image).map_err(|error| error.to_string())?;
    println!(
        "Loaded {} bytes into memory from {}",
        image.len(),
        args.input.display()
    );

    let mut sink = StringSink::new();
    let session = sim.run_session(&mut sink);

    // A fatal fault mid-run still leaves the sections produced so far;
    // write them before reporting the error.
    let out_path = output_path(&args.input);
    fs::write(&out_path, sink.as_str())
        .map_err(|_| format!("Error opening output file: {}", out_path.display()))?;
    session.map_err(|error| error.to_string())?;

    println!(
        "Disassembly and simulation trace written to {}",
        out_path.display()
    );
    Ok(())
}

fn main() {
    match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{HELP_TEXT}");
        }
        Ok(ParseResult::Args(args)) => {
            if let Err(error) = run(&args) {
                eprintln!("{error}");
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{HELP_TEXT}");
            std::process::exit(1);
        }
    }
}
