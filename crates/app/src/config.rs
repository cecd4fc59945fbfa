//! Command-line configuration for the sigcodec tool.
//!
//! Parses arguments with clap and resolves the self-test settings, including
//! randomized defaults that are reproducible with a seed.
//!
//! # Philosophy
//!
//! `sigcodec selftest` should work with ZERO arguments, using sensible
//! defaults. All resolved defaults can be printed so runs are reproducible.

use clap::{ArgAction, Args, Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// sigcodec: store binary metadata as 7-bit text
///
/// Encodes arbitrary bytes into a string of 7-bit units (8 units per 7 bytes)
/// and decodes such strings back to the original bytes.
#[derive(Parser, Debug)]
#[command(name = "sigcodec")]
#[command(author, version, about = "7-bit zero-avoiding codec for binary metadata", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode raw bytes into 7-bit units.
    ///
    /// No trailing newline is written.
    Encode(IoArgs),

    /// Decode 7-bit units back into raw bytes.
    Decode {
        #[command(flatten)]
        io: IoArgs,

        /// Fold the two-byte 0xC0 0x80 zero escape before decoding
        ///
        /// Use this for bytes lifted straight out of a modified UTF-8 container.
        #[arg(long)]
        modified_utf8: bool,
    },

    /// Check whether input is a decodable encoding.
    Check {
        /// Input file (default: stdin)
        #[arg(long = "in", value_name = "PATH")]
        input: Option<PathBuf>,
    },

    /// Show how a payload of a given size encodes.
    Stats {
        /// Raw payload length in bytes
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        len: Option<usize>,

        /// Raw payload file to measure
        #[arg(long = "in", value_name = "PATH")]
        input: Option<PathBuf>,
    },

    /// Round-trip generated payloads and verify them.
    Selftest(SelftestArgs),
}

/// Input/output locations shared by `encode` and `decode`.
#[derive(Args, Debug, Clone, Default)]
pub struct IoArgs {
    /// Input file (default: stdin)
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Raw `selftest` flags before defaults are resolved.
#[derive(Args, Debug, Clone, Default)]
pub struct SelftestArgs {
    /// Random seed for determinism (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of payloads to round-trip (default: 256)
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Largest payload in bytes (default: random 256-4096)
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the summary, only the result line
    #[arg(long)]
    pub no_summary: bool,
}

/// Resolved configuration for a self-test run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seed for payload generation
    pub seed: u64,

    /// Number of payloads to round-trip
    pub iterations: usize,

    /// Largest payload in bytes
    pub max_len: usize,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the summary
    pub print_summary: bool,
}

impl Config {
    /// Resolve self-test flags into a configuration.
    ///
    /// If no seed is given, one is derived from the clock. Every other default
    /// is drawn from that seed, so printing it is enough to replay the run.
    pub fn from_args(args: &SelftestArgs) -> Result<Self, String> {
        if args.iterations == Some(0) {
            return Err("--iterations must be at least 1".to_string());
        }

        let seed = args.seed.unwrap_or_else(time_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        Ok(Config {
            seed,
            iterations: args.iterations.unwrap_or(256),
            max_len: args.max_len.unwrap_or_else(|| rng.gen_range(256..=4096)),
            print_config: args.print_config,
            print_summary: !args.no_summary,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Seed: {}", self.seed);
        println!("Iterations: {}", self.iterations);
        println!("Max payload: {} bytes", self.max_len);
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|t| t.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from(["sigcodec", "encode", "--in", "a.bin", "--out", "a.txt"]).unwrap();
        match cli.command {
            Command::Encode(io) => {
                assert_eq!(io.input, Some(PathBuf::from("a.bin")));
                assert_eq!(io.output, Some(PathBuf::from("a.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_decode_flags() {
        let cli = Cli::try_parse_from(["sigcodec", "-vv", "decode", "--modified-utf8"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Decode { modified_utf8: true, .. }
        ));
    }

    #[test]
    fn test_stats_requires_one_source() {
        assert!(Cli::try_parse_from(["sigcodec", "stats"]).is_err());
        assert!(Cli::try_parse_from(["sigcodec", "stats", "--len", "3", "--in", "x"]).is_err());
        assert!(Cli::try_parse_from(["sigcodec", "stats", "--len", "3"]).is_ok());
    }

    #[test]
    fn test_unknown_argument() {
        assert!(Cli::try_parse_from(["sigcodec", "encode", "--bogus"]).is_err());
    }

    #[test]
    fn test_defaults_reproducible() {
        let args = SelftestArgs {
            seed: Some(42),
            ..Default::default()
        };
        let first = Config::from_args(&args).unwrap();
        let second = Config::from_args(&args).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.iterations, 256);
        assert!((256..=4096).contains(&first.max_len));
        assert!(first.print_summary);
    }

    #[test]
    fn test_explicit_values_win() {
        let args = SelftestArgs {
            seed: Some(1),
            iterations: Some(10),
            max_len: Some(20),
            print_config: true,
            no_summary: true,
        };
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.max_len, 20);
        assert!(config.print_config);
        assert!(!config.print_summary);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let args = SelftestArgs {
            iterations: Some(0),
            ..Default::default()
        };
        assert!(Config::from_args(&args).is_err());
    }
}
