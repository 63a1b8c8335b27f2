use clap::Parser;
use std::fs;
use std::path::PathBuf;

use pblite_compiler::error::CodegenError;
use pblite_compiler::{generate, load_schema, verify_schema};

#[derive(Parser)]
#[command(name = "pblitec")]
#[command(about = "Generate Rust pblite decoders from a .proto schema", long_about = None)]
struct Cli {
    /// Input `.proto` schema file (compiled with `protoc`, which must be on PATH)
    proto_file: PathBuf,

    /// Output `.rs` file (if omitted, prints to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (repeatable; logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), CodegenError> {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    // Load and check everything before the first byte of output, so a
    // failing run emits nothing rather than a truncated module.
    let schema = load_schema(&cli.proto_file)?;
    verify_schema(&schema)?;
    let rust_code = generate(&schema, &cli.proto_file.display().to_string());

    match &cli.output {
        Some(out_path) => fs::write(out_path, rust_code).map_err(CodegenError::Io)?,
        None => println!("{}", rust_code),
    }
    Ok(())
}

fn setup_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    // Generated code goes to stdout; diagnostics must stay on stderr.
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .ok();
}
