//! Bench command implementation.
//!
//! Every codec runs on every file: encode, decode, compare. Files are
//! processed in parallel; codecs within a file run in order.

use crate::utils::{collect_files, create_progress_bar, format_size, matches_filters};
use duopack::{Codec, CodecKind, compressed_path, decompressed_path, stats};
use duopack_core::io::{ByteWriter, read_all};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Flags of the bench command.
pub struct BenchOptions {
    pub codecs: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub json: bool,
    pub keep: bool,
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct BenchReport {
    files: usize,
    codecs: Vec<String>,
    results: Vec<BenchResult>,
    failures: usize,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    file: String,
    codec: String,
    input_bytes: u64,
    compressed_bytes: u64,
    ratio: f64,
    entropy: f64,
    encode_ms: f64,
    decode_ms: f64,
    verification: Verification,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Verification {
    Identical,
    Differs { first_difference: usize },
    Failed { error: String },
}

impl Verification {
    fn passed(&self) -> bool {
        *self == Verification::Identical
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verification::Identical => write!(f, "identical"),
            Verification::Differs { first_difference } => {
                write!(f, "differs at byte {}", first_difference)
            }
            Verification::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

pub fn cmd_bench(
    paths: &[PathBuf],
    options: &BenchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let codecs = if options.codecs.is_empty() {
        CodecKind::default_set()?
    } else {
        options
            .codecs
            .iter()
            .map(|name| name.parse())
            .collect::<duopack::Result<Vec<CodecKind>>>()?
    };

    let files: Vec<PathBuf> = collect_files(paths)?
        .into_iter()
        .filter(|path| matches_filters(path, &options.include, &options.exclude))
        .collect();
    if files.is_empty() {
        return Err("no input files".into());
    }
    info!("benchmarking {} files with {} codecs", files.len(), codecs.len());

    let pb = create_progress_bar((files.len() * codecs.len()) as u64, options.progress);
    let per_file = files
        .par_iter()
        .map(|file| {
            bench_file(file, &codecs, options.keep, &|codec: &CodecKind| {
                pb.set_message(format!("{} [{}]", file.display(), codec));
                pb.inc(1);
            })
        })
        .collect::<duopack::Result<Vec<_>>>();
    pb.finish_and_clear();
    let results: Vec<BenchResult> = per_file?.into_iter().flatten().collect();

    let report = BenchReport {
        files: files.len(),
        codecs: codecs.iter().map(Codec::short_name).collect(),
        failures: results.iter().filter(|r| !r.verification.passed()).count(),
        results,
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.failures > 0 {
        return Err(format!("{} verification(s) failed", report.failures).into());
    }
    Ok(())
}

fn bench_file(
    file: &Path,
    codecs: &[CodecKind],
    keep: bool,
    on_done: &(dyn Fn(&CodecKind) + Sync),
) -> duopack::Result<Vec<BenchResult>> {
    let data = read_all(file)?;
    let entropy = stats::entropy(&data);

    let mut results = Vec::with_capacity(codecs.len());
    for codec in codecs {
        let result = bench_one(file, &data, entropy, codec, keep)?;
        debug!("{} [{}]: {}", file.display(), codec, result.verification);
        results.push(result);
        on_done(codec);
    }
    Ok(results)
}

/// Codec failures are recorded in the result; only I/O for `--keep`
/// artifacts is an error.
fn bench_one(
    file: &Path,
    data: &[u8],
    entropy: f64,
    codec: &CodecKind,
    keep: bool,
) -> duopack::Result<BenchResult> {
    let mut result = BenchResult {
        file: file.display().to_string(),
        codec: codec.short_name(),
        input_bytes: data.len() as u64,
        compressed_bytes: 0,
        ratio: 0.0,
        entropy,
        encode_ms: 0.0,
        decode_ms: 0.0,
        verification: Verification::Identical,
    };

    let start = Instant::now();
    let packed = match codec.encode(data) {
        Ok(packed) => packed,
        Err(e) => {
            result.verification = Verification::Failed {
                error: e.to_string(),
            };
            return Ok(result);
        }
    };
    result.encode_ms = start.elapsed().as_secs_f64() * 1000.0;
    result.compressed_bytes = packed.len() as u64;
    result.ratio = stats::compression_ratio(result.input_bytes, result.compressed_bytes);

    let start = Instant::now();
    let decoded = codec.decode(&packed);
    result.decode_ms = start.elapsed().as_secs_f64() * 1000.0;

    match decoded {
        Ok(decoded) => {
            if let Some(index) = stats::first_difference(data, &decoded) {
                result.verification = Verification::Differs {
                    first_difference: index,
                };
            }
            if keep {
                let packed_path = compressed_path(file, codec);
                write_file(&packed_path, &packed)?;
                write_file(&decompressed_path(&packed_path, codec), &decoded)?;
            }
        }
        Err(e) => {
            result.verification = Verification::Failed {
                error: e.to_string(),
            };
        }
    }
    Ok(result)
}

fn write_file(path: &Path, bytes: &[u8]) -> duopack::Result<()> {
    let mut writer = ByteWriter::create(path)?;
    writer.write_bytes(bytes)?;
    writer.finish()?;
    Ok(())
}

fn print_report(report: &BenchReport) {
    println!(
        "{:<10} {:>10} {:>10} {:>6} {:>7} {:>10} {:>10}  {:<10} File",
        "Codec", "Size", "Packed", "Ratio", "Entropy", "Encode", "Decode", "Check",
    );
    println!("{}", "-".repeat(100));

    for r in &report.results {
        println!(
            "{:<10} {:>10} {:>10} {:>6.3} {:>7.3} {:>8.2}ms {:>8.2}ms  {:<10} {}",
            r.codec,
            format_size(r.input_bytes),
            format_size(r.compressed_bytes),
            r.ratio,
            r.entropy,
            r.encode_ms,
            r.decode_ms,
            r.verification.to_string(),
            r.file
        );
    }

    println!("{}", "-".repeat(100));
    println!(
        "{} files, {} codecs, {} results, {} failed",
        report.files,
        report.codecs.len(),
        report.results.len(),
        report.failures
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(codecs: &[&str]) -> BenchOptions {
        BenchOptions {
            codecs: codecs.iter().map(|c| c.to_string()).collect(),
            include: Vec::new(),
            exclude: Vec::new(),
            json: true,
            keep: false,
            progress: false,
        }
    }

    #[test]
    fn test_bench_one_identical() {
        let data = b"abcabcabcabcabcabc".to_vec();
        let codec: CodecKind = "lz77-5".parse().unwrap();
        let result = bench_one(Path::new("mem"), &data, 1.5, &codec, false).unwrap();
        assert_eq!(result.verification, Verification::Identical);
        assert_eq!(result.input_bytes, 18);
        assert!(result.compressed_bytes > 0);
        assert_eq!(result.codec, "lz77-5");
    }

    #[test]
    fn test_bench_keep_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.bin");
        std::fs::write(&file, b"keep keep keep keep").unwrap();

        let files =
            bench_file(&file, &[CodecKind::shannon()], true, &|_: &CodecKind| {}).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].verification.passed());
        assert!(dir.path().join("data.bin.shan").exists());
        assert_eq!(
            std::fs::read(dir.path().join("data.bin.unshan")).unwrap(),
            b"keep keep keep keep"
        );
    }

    #[test]
    fn test_cmd_bench_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello hello hello").unwrap();
        std::fs::write(dir.path().join("b.log"), b"skipped").unwrap();

        let mut opts = options(&["shan", "lz77:8:4"]);
        opts.include = vec!["*.txt".to_string()];
        cmd_bench(&[dir.path().to_path_buf()], &opts).unwrap();
    }

    #[test]
    fn test_cmd_bench_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_bench(&[dir.path().to_path_buf()], &options(&[])).is_err());

        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
        assert!(cmd_bench(&[dir.path().to_path_buf()], &options(&["zip"])).is_err());
    }

    #[test]
    fn test_verification_json() {
        let json = serde_json::to_value(Verification::Differs {
            first_difference: 3,
        })
        .unwrap();
        assert_eq!(json["status"], "differs");
        assert_eq!(json["first_difference"], 3);
        assert_eq!(Verification::Identical.to_string(), "identical");
    }
}
