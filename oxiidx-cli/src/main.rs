//! OxiIdx CLI - bitmap index compression
//!
//! Compresses and decompresses bitmap indexes with the BBC, WAH and VAL
//! codecs, and checks codec output against fixture files.

mod codec;
mod commands;
mod logging;
mod utils;

use clap::{Parser, Subcommand};
use codec::{Algorithm, Codec, LayoutArgs};
use commands::{cmd_check, cmd_columns, cmd_compress, cmd_decompress, cmd_diff};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxiidx")]
#[command(author, version, about = "Pure Rust bitmap index compression")]
#[command(long_about = "
OxiIdx compresses bitmap indexes with three run-length codecs:
BBC (byte-aligned), WAH (word-aligned hybrid) and VAL (multi-segment words).

Examples:
  oxiidx compress wah 10100011111111111111 -w 8
  oxiidx compress val -i column.txt -w 16 -s 2 --trace
  oxiidx decompress wah 0101000111000010 -w 8 -n 21
  oxiidx check bbc data/animals data/animals_BBC_8
  oxiidx diff expected.txt actual.txt -c 32
  oxiidx columns data/animals
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a bit string
    #[command(alias = "c")]
    Compress {
        /// Compression algorithm
        #[arg(value_enum)]
        algorithm: Algorithm,

        /// Bits to compress (read from --input or stdin if omitted)
        bits: Option<String>,

        /// Read bits from a file
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print every encoder step as JSON
        #[arg(short, long)]
        trace: bool,

        /// Print size statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Decompress an encoded bit string
    #[command(alias = "d")]
    Decompress {
        /// Compression algorithm
        #[arg(value_enum)]
        algorithm: Algorithm,

        /// Encoded bits (read from --input or stdin if omitted)
        bits: Option<String>,

        /// Read encoded bits from a file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Length of the original bitmap in bits
        #[arg(short = 'n', long)]
        length: usize,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Check codec output for every column of a table file
    Check {
        /// Compression algorithm
        #[arg(value_enum)]
        algorithm: Algorithm,

        /// Table file, one row per line
        table: PathBuf,

        /// Expected output, one encoded line per column
        expected: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Compare two encodings word by word
    Diff {
        /// Expected encoding
        expected: PathBuf,

        /// Actual encoding
        actual: PathBuf,

        /// Word width in characters
        #[arg(short, long, default_value_t = 8)]
        chunk: usize,
    },

    /// Print the column bitmaps of a table file
    Columns {
        /// Table file, one row per line
        table: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = run(cli.command, cli.verbose > 0);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Compress {
            algorithm,
            bits,
            input,
            layout,
            trace,
            stats,
        } => cmd_compress(
            Codec::new(algorithm, layout)?,
            bits,
            input.as_deref(),
            trace,
            stats,
        ),
        Commands::Decompress {
            algorithm,
            bits,
            input,
            length,
            layout,
        } => cmd_decompress(
            Codec::new(algorithm, layout)?,
            bits,
            input.as_deref(),
            length,
        ),
        Commands::Check {
            algorithm,
            table,
            expected,
            layout,
        } => cmd_check(
            Codec::new(algorithm, layout)?,
            &table,
            expected.as_deref(),
            verbose,
        ),
        Commands::Diff {
            expected,
            actual,
            chunk,
        } => cmd_diff(&expected, &actual, chunk),
        Commands::Columns { table } => cmd_columns(&table),
    }
}
