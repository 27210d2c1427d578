//! duopack CLI
//!
//! Compress, decompress and benchmark files with the duopack LZ77 and
//! Shannon-Fano codecs.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{BenchOptions, cmd_bench, cmd_compress, cmd_decompress};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "duopack")]
#[command(author, version, about = "LZ77 and Shannon-Fano file codecs")]
#[command(long_about = "
duopack compresses single files with an LZ77 or a Shannon-Fano codec.

Codecs: lz77 (lz77-5), lz77-10, lz77-20, lz77:<history>:<view>, shan

Examples:
  duopack compress notes.txt
  duopack compress notes.txt -c shan
  duopack compress notes.txt -c lz77:8192:2048 -o notes.packed
  duopack decompress notes.txt.lz77-5
  duopack decompress notes.packed -c lz77:8192:2048
  duopack bench corpus/ -I '*.txt'
  duopack bench a.bin b.bin -c lz77-20 -c shan --json
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <input>.<codec>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Codec name
        #[arg(short, long, default_value = "lz77")]
        codec: String,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (default: <input>.un<codec>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Codec name (default: taken from the input extension)
        #[arg(short, long)]
        codec: Option<String>,
    },

    /// Compress, decompress and verify files with several codecs
    #[command(alias = "b")]
    Bench {
        /// Files or directories to benchmark
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Codecs to run (default: lz77-5, shan, lz77-10, lz77-20)
        #[arg(short, long)]
        codec: Vec<String>,

        /// Include only files matching pattern (glob syntax: *.txt, src/**/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude files matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Write the compressed and decompressed files next to each input
        #[arg(short, long)]
        keep: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    let level = log_level(cli.verbose, cli.quiet);
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: could not install logger: {}", e);
    }

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
        } => cmd_compress(&input, output.as_deref(), &codec),
        Commands::Decompress {
            input,
            output,
            codec,
        } => cmd_decompress(&input, output.as_deref(), codec.as_deref()),
        Commands::Bench {
            paths,
            codec,
            include,
            exclude,
            json,
            keep,
            progress,
        } => cmd_bench(
            &paths,
            &BenchOptions {
                codecs: codec,
                include,
                exclude,
                json,
                keep,
                progress,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
