//! Command implementations for the duopack CLI.

pub mod bench;
pub mod compress;
pub mod decompress;

pub use bench::{BenchOptions, cmd_bench};
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
