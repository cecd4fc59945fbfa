//! Subcommand implementations.
//!
//! Each command reads from a file or stdin and writes to a file or stdout.
//! Encoded data is handled as raw 8-bit units so nothing is lost to UTF-8
//! validation on the way in.

use anyhow::{Context, Result};
use sigcodec_core::{
    decode, decode_units, encode, encode_units, is_valid_units, unescape_zero, EncodingStats,
};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{Config, IoArgs, SelftestArgs};
use crate::input_gen::generate_payloads;
use crate::report::SelftestReport;

/// Read all bytes from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            Ok(bytes)
        }
    }
}

/// Write `bytes` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("failed to write stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}

/// CRC32 fingerprint of a payload.
pub fn fingerprint(bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// `sigcodec encode`
pub fn run_encode(io: &IoArgs) -> Result<()> {
    let raw = read_input(io.input.as_deref())?;
    let units = encode_units(&raw);
    info!(
        raw_len = raw.len(),
        encoded_len = units.len(),
        crc32 = %format!("{:#010x}", fingerprint(&raw)),
        "encoded payload"
    );
    write_output(io.output.as_deref(), &units)
}

/// `sigcodec decode`
pub fn run_decode(io: &IoArgs, modified_utf8: bool) -> Result<()> {
    let mut units = read_input(io.input.as_deref())?;
    if modified_utf8 {
        let before = units.len();
        units = unescape_zero(&units);
        debug!(folded = before - units.len(), "folded escaped zeros");
    }

    let raw = decode_units(&units).context("input is not a valid encoding")?;
    info!(
        encoded_len = units.len(),
        raw_len = raw.len(),
        crc32 = %format!("{:#010x}", fingerprint(&raw)),
        "decoded payload"
    );
    write_output(io.output.as_deref(), &raw)
}

/// `sigcodec check`. Returns whether the input decodes.
pub fn run_check(input: Option<&Path>) -> Result<bool> {
    let units = read_input(input)?;

    if !is_valid_units(&units) {
        warn!("input contains units outside the 7-bit range");
    }

    match decode_units(&units) {
        Ok(raw) => {
            println!("valid: {} units carry {} bytes", units.len(), raw.len());
            Ok(true)
        }
        Err(err) => {
            println!("invalid: {err}");
            Ok(false)
        }
    }
}

/// `sigcodec stats`
pub fn run_stats(len: Option<usize>, input: Option<&Path>) -> Result<()> {
    let raw_len = match (len, input) {
        (Some(len), _) => len,
        (None, Some(path)) => std::fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len() as usize,
        (None, None) => read_input(None)?.len(),
    };
    println!("{}", EncodingStats::for_raw_len(raw_len));
    Ok(())
}

/// `sigcodec selftest`. Returns whether every payload round-tripped.
pub fn run_selftest(args: &SelftestArgs) -> Result<bool> {
    let config = Config::from_args(args).map_err(anyhow::Error::msg)?;
    if config.print_config {
        config.print();
    }
    info!(seed = config.seed, iterations = config.iterations, "starting self-test");

    let report = selftest(&config);
    debug!("self-test report:\n{}", report.export_text());

    if config.print_summary {
        report.print_summary();
    }
    report.print_result();
    Ok(report.passed())
}

/// Round-trip generated payloads through both the text and unit APIs.
pub fn selftest(config: &Config) -> SelftestReport {
    let mut report = SelftestReport::new();

    for (index, raw) in generate_payloads(config.seed, config.iterations, config.max_len)
        .into_iter()
        .enumerate()
    {
        let units = encode_units(&raw);
        report.record(raw.len(), &units);

        let text = encode(&raw);
        if text.as_bytes() != units.as_slice() {
            report.record_failure(index, raw.len(), "text and unit encodings differ");
            continue;
        }

        match decode(&text) {
            Ok(decoded) => {
                let expected = fingerprint(&raw);
                let actual = fingerprint(&decoded);
                if decoded.len() != raw.len() || expected != actual {
                    report.record_failure(
                        index,
                        raw.len(),
                        format!("crc mismatch: expected {expected:#010x}, got {actual:#010x}"),
                    );
                }
            }
            Err(err) => report.record_failure(index, raw.len(), err.to_string()),
        }
    }

    report.complete();
    report
}
