use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use wacro::{WacroError, StampedLibrary};

const EXIT_MISMATCH: i32 = 2;
const EXIT_MISSING: i32 = 3;

/// Inspect wacro ABI stamps in compiled plugin modules
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More logging; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// ABI version the plugin is expected to carry
    #[arg(long, value_name = "VERSION", default_value_t = wacro::ABI_VERSION, global = true)]
    expect: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ABI stamp compiled into this tool
    Abi,
    /// Read the ABI stamp of a WebAssembly module
    Inspect {
        file: PathBuf,
    },
    /// List custom sections of a WebAssembly module
    Sections {
        file: PathBuf,
    },
    /// Read the WACRO_ABI_VERSION symbol of a native library
    Symbol {
        lib: PathBuf,
    },
}

fn main() {
    match run() {
        Ok(0) => {}
        Ok(code) => {
            log::error!("Exiting with code={code}");
            std::process::exit(code);
        }
        Err(e) => {
            log::error!("ERROR: {e:?}");
            std::process::exit(1)
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    pretty_env_logger::formatted_timed_builder()
        .format_timestamp_millis()
        .filter_level(level)
        .init();

    match cli.command {
        Commands::Abi => show_abi(),
        Commands::Inspect { file } => inspect(&file, cli.expect),
        Commands::Sections { file } => list_sections(&file),
        Commands::Symbol { lib } => show_symbol(&lib, cli.expect),
    }
}

fn show_abi() -> anyhow::Result<i32> {
    let hex = wacro::STAMP_BYTES.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<String>>()
        .join(" ");
    println!("ABI version: {}", wacro::ABI_VERSION);
    println!("* section: {}", wacro::SECTION_NAME);
    println!("* stamp bytes: {hex}");
    println!("* linked symbol: {}", wacro::linked_abi_version());
    Ok(0)
}

fn inspect(file: &Path, expect: u32) -> anyhow::Result<i32> {
    let stamp = match wacro::read_stamp_file(file)? {
        Some(stamp) => stamp,
        None => {
            println!("{}: no '{}' section", file.display(), wacro::SECTION_NAME);
            return Ok(EXIT_MISSING);
        }
    };
    println!("{}: ABI version {} (offset {})", file.display(), stamp.version, stamp.offset);
    mismatch_to_exit_code(stamp.check(expect))
}

fn list_sections(file: &Path) -> anyhow::Result<i32> {
    let wasm = std::fs::read(file)?;
    let sections = wacro::custom_sections(&wasm)?;
    println!("Custom sections[{}]:", sections.len());
    for section in sections {
        println!("* '{}': offset={} size={}", section.name, section.offset, section.size);
    }
    Ok(0)
}

fn show_symbol(lib: &Path, expect: u32) -> anyhow::Result<i32> {
    let lib = StampedLibrary::open(lib)?;
    println!("{}: WACRO_ABI_VERSION = {}", lib.path().display(), lib.abi_version());
    mismatch_to_exit_code(lib.check(expect))
}

fn mismatch_to_exit_code(check: wacro::Result<()>) -> anyhow::Result<i32> {
    match check {
        Ok(()) => Ok(0),
        Err(WacroError::AbiMismatch { expected, found }) => {
            log::warn!("expected ABI version {expected}, found {found}");
            Ok(EXIT_MISMATCH)
        }
        Err(e) => Err(e.into()),
    }
}
