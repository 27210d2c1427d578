//! Compress command implementation.

use crate::utils::format_size;
use duopack::{CodecKind, compress_file, compressed_path, stats};
use std::path::Path;
use std::time::Instant;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    codec: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec: CodecKind = codec.parse()?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => compressed_path(input, &codec),
    };

    let start = Instant::now();
    let report = compress_file(input, &output, &codec)?;
    let elapsed = start.elapsed();

    println!(
        "{} -> {} [{}]",
        report.input.display(),
        report.output.display(),
        codec
    );
    println!(
        "  {} -> {} (ratio {:.3}) in {:.2?}",
        format_size(report.bytes_in),
        format_size(report.bytes_out),
        stats::compression_ratio(report.bytes_in, report.bytes_out),
        elapsed
    );
    Ok(())
}
