//! `json2doc` CLI: convert one JSON object on stdin into a typed document on stdout.
//!
//! ## Usage
//!
//! ```sh
//! echo '{"name":"Alice","age":30}' | json2doc
//! # {"fields":{"age":{"integerValue":"30"},"name":{"stringValue":"Alice"}}}
//!
//! # Diagnostics go to stderr, filtered by RUST_LOG (default: warn)
//! RUST_LOG=debug json2doc < input.json
//! ```

use std::io::{self, Read, Write};
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "json2doc",
    version,
    about = "Convert a JSON object on stdin into a typed document on stdout"
)]
struct Cli {}

/// Stack for the conversion thread. Decoding and conversion recurse once per
/// nesting level, and input up to `json2doc_core::MAX_DEPTH` levels deep must
/// fit.
const WORKER_STACK_SIZE: usize = 256 * 1024 * 1024;

fn main() -> Result<()> {
    Cli::parse();
    init_tracing();

    let json = read_stdin()?;
    let line = thread::Builder::new()
        .name("convert".to_string())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || convert(&json))
        .context("Failed to start conversion thread")?
        .join()
        .map_err(|_| anyhow!("Conversion thread panicked"))??;

    // Only a fully rendered document reaches stdout.
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", line).context("Failed to write to stdout")?;
    stdout.flush().context("Failed to write to stdout")?;
    Ok(())
}

fn convert(json: &str) -> Result<String> {
    let doc = json2doc_core::parse_document(json).context("Failed to convert JSON to document")?;
    tracing::debug!(fields = doc.len(), "converted document");
    json2doc_core::render(&doc).context("Failed to render document")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}
