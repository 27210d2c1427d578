//! Decompress command implementation.

use crate::utils::format_size;
use duopack::{CodecKind, decompress_file, decompressed_path};
use std::path::Path;
use std::time::Instant;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    codec: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = resolve_codec(input, codec)?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => decompressed_path(input, &codec),
    };

    let start = Instant::now();
    let report = decompress_file(input, &output, &codec)?;
    let elapsed = start.elapsed();

    println!(
        "{} -> {} [{}]",
        report.input.display(),
        report.output.display(),
        codec
    );
    println!(
        "  {} -> {} in {:.2?}",
        format_size(report.bytes_in),
        format_size(report.bytes_out),
        elapsed
    );
    Ok(())
}

/// The explicit codec, or the one named by the input's extension.
fn resolve_codec(
    input: &Path,
    codec: Option<&str>,
) -> Result<CodecKind, Box<dyn std::error::Error>> {
    match codec {
        Some(name) => Ok(name.parse()?),
        None => CodecKind::from_extension(input).ok_or_else(|| {
            format!(
                "cannot tell the codec of {} from its extension; pass --codec",
                input.display()
            )
            .into()
        }),
    }
}
