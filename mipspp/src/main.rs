use crate::debugger::Debugger;
use mips_assembler::Assembler;
use mips_emulator::Emulator;
use mips_types::MipsError;
use std::path::{Path, PathBuf};
use std::process;
use structopt::clap::ErrorKind;
use structopt::StructOpt;

mod debugger;

const VERSION: &str = "0.0.1";

/// The MIPS++ toolchain: assembles MIPS source files into object files and
/// runs them
#[derive(StructOpt)]
#[structopt(
    name = "mips++",
    setting = structopt::clap::AppSettings::DisableVersion
)]
struct CliArgs {
    /// Compiles the given file
    #[structopt(short = "c", long = "compile")]
    compile: bool,

    /// Runs the given file
    #[structopt(short = "r", long = "run")]
    run: bool,

    /// Debugs the given file
    #[structopt(short = "d", long = "debug")]
    debug: bool,

    /// Prints the version
    #[structopt(short = "v", long = "version")]
    version: bool,

    #[structopt(parse(from_os_str))]
    files: Vec<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = match CliArgs::from_iter_safe(std::env::args()) {
        Ok(args) => args,
        Err(error) => {
            if error.kind == ErrorKind::HelpDisplayed {
                println!("{}", error.message);
                return;
            }

            eprintln!("Error: Invalid option");
            process::exit(1);
        }
    };

    if args.version {
        println!("MIPS++ version {}", VERSION);
        return;
    }

    let result = if args.compile {
        match args.files.as_slice() {
            [source, output, ..] => compile(source, output),
            _ => missing_file(),
        }
    } else if args.run {
        match args.files.as_slice() {
            [object, ..] => run(object),
            _ => missing_file(),
        }
    } else if args.debug {
        match args.files.as_slice() {
            [object, ..] => debug(object),
            _ => missing_file(),
        }
    } else if args.files.is_empty() {
        // Bare invocation prints the help text
        let _ = CliArgs::clap().print_long_help();
        println!();
        return;
    } else {
        eprintln!("Error: Invalid option");
        process::exit(1);
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(error) => {
            report(&error);
            process::exit(1);
        }
    }
}

fn compile(source: &Path, output: &Path) -> Result<i32, MipsError> {
    Assembler::new().assemble(source, output)?;
    log::info!("Assembled {} into {}", source.display(), output.display());

    Ok(0)
}

fn run(object: &Path) -> Result<i32, MipsError> {
    let mut emulator = Emulator::new();
    emulator.prepare_and_hold(object)?;
    emulator.run()?;

    Ok(emulator.cpu.return_code as i32)
}

fn debug(object: &Path) -> Result<i32, MipsError> {
    let mut emulator = Emulator::new();
    emulator.prepare_and_hold(object)?;

    let mut debugger = Debugger::new(emulator);
    debugger.run()?;

    Ok(0)
}

fn missing_file() -> ! {
    eprintln!("Error: No file specified");
    process::exit(1);
}

/// Map each error kind to its stderr prefix
fn report(error: &MipsError) {
    match error {
        MipsError::Syntax { .. } => eprintln!("Syntax error: {}", error),
        MipsError::Runtime { .. } => eprintln!("Runtime error: {}", error),
        MipsError::File(_) => eprintln!("Error: {}", error),
    }
}
