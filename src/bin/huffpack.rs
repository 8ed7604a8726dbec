//! huffpack Command Line Interface
//!
//! Usage:
//!   huffpack compress <input> [-o output]      # writes <input>.huf by default
//!   huffpack decompress <input.huf> [-o output]
//!   huffpack inspect <input.huf>
//!   huffpack -v ...                            # more log output (-vv, -vvv)

#![allow(clippy::cast_precision_loss)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use huffpack::{compress, decompress, EncodedArtifact};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Extension appended to compressed files.
const EXTENSION: &str = "huf";

#[derive(Parser)]
#[command(name = "huffpack", version)]
#[command(about = "Lossless Huffman compression", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a file
    Compress {
        input: PathBuf,
        /// Output file (default: <input>.huf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decompress a file
    Decompress {
        input: PathBuf,
        /// Output file (default: <input> without .huf, or <input>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the code table of a compressed file
    Inspect { input: PathBuf },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {e}");
    }
}

/// Create output filename for compression.
fn make_compress_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// Create output filename for decompression.
///
/// Removes the .huf extension if present, otherwise appends .out.
fn make_decompress_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(EXTENSION) => input.with_extension(""),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("Cannot read {}: {e}", path.display()))
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), String> {
    fs::write(path, data).map_err(|e| format!("Cannot write {}: {e}", path.display()))
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn do_compress(input: &Path, output: Option<PathBuf>) -> Result<(), String> {
    let input_data = read_file(input)?;
    let output = output.unwrap_or_else(|| make_compress_path(input));

    let output_data = compress(&input_data)
        .map_err(|e| format!("Compression failed [{}]: {e}", e.code()))?;
    write_file(&output, &output_data)?;

    println!("Input:   {} ({} bytes)", input.display(), input_data.len());
    println!("Output:  {} ({} bytes)", output.display(), output_data.len());
    println!(
        "Ratio:   {:.2}x",
        ratio(input_data.len(), output_data.len())
    );
    Ok(())
}

fn do_decompress(input: &Path, output: Option<PathBuf>) -> Result<(), String> {
    let input_data = read_file(input)?;
    let output = output.unwrap_or_else(|| make_decompress_path(input));

    let output_data = decompress(&input_data)
        .map_err(|e| format!("Decompression failed [{}]: {e}", e.code()))?;
    write_file(&output, &output_data)?;

    println!("Input:     {} ({} bytes)", input.display(), input_data.len());
    println!("Output:    {} ({} bytes)", output.display(), output_data.len());
    println!(
        "Expansion: {:.2}x",
        ratio(output_data.len(), input_data.len())
    );
    Ok(())
}

fn do_inspect(input: &Path) -> Result<(), String> {
    let input_data = read_file(input)?;
    let artifact = EncodedArtifact::parse(&input_data)
        .map_err(|e| format!("Invalid artifact [{}]: {e}", e.code()))?;

    println!("Symbols:   {}", artifact.table.len());
    println!("Bits:      {}", artifact.bit_count);
    println!("Payload:   {} bytes", artifact.payload.len());
    println!();
    println!("Symbol  Len  Code");
    for (symbol, code) in artifact.table.iter() {
        let shown = if symbol.is_ascii_graphic() {
            format!("'{}'", char::from(symbol))
        } else {
            format!("0x{symbol:02x}")
        };
        println!("{shown:<6}  {:>3}  {code}", code.len());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Compress { input, output } => do_compress(&input, output),
        Command::Decompress { input, output } => do_decompress(&input, output),
        Command::Inspect { input } => do_inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
