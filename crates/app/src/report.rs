//! Self-test bookkeeping and reporting.
//!
//! Collects what happened to every payload pushed through the codec:
//! sizes, zero units left for the container, and any mismatch between the
//! original and the decoded bytes (compared by length and CRC32).
//!
//! # Thread Safety
//!
//! `SelftestReport` is updated from a single thread.

use std::time::{Duration, Instant};

/// One payload that did not survive the round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Index of the payload in the run
    pub index: usize,
    /// Raw payload length
    pub raw_len: usize,
    /// What went wrong
    pub reason: String,
}

/// Outcome of a self-test run.
#[derive(Debug, Clone)]
pub struct SelftestReport {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Volume ===
    /// Payloads round-tripped
    pub payloads: u64,

    /// Total raw bytes encoded
    pub raw_bytes: u64,

    /// Total encoded units produced
    pub encoded_units: u64,

    /// Encoded units equal to zero (left for the container to escape)
    pub zero_units: u64,

    // === Verification ===
    /// Payloads that failed to decode or decoded to different bytes
    pub failures: Vec<Failure>,
}

impl SelftestReport {
    /// Create an empty report with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            payloads: 0,
            raw_bytes: 0,
            encoded_units: 0,
            zero_units: 0,
            failures: Vec::new(),
        }
    }

    /// Record one successfully encoded payload.
    pub fn record(&mut self, raw_len: usize, units: &[u8]) {
        self.payloads += 1;
        self.raw_bytes += raw_len as u64;
        self.encoded_units += units.len() as u64;
        self.zero_units += units.iter().filter(|&&unit| unit == 0).count() as u64;
    }

    /// Record a payload that did not round-trip.
    pub fn record_failure(&mut self, index: usize, raw_len: usize, reason: impl Into<String>) {
        self.failures.push(Failure {
            index,
            raw_len,
            reason: reason.into(),
        });
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Whether every payload round-tripped.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Compute expansion ratio (encoded / raw).
    ///
    /// Returns 0.0 if no data was encoded.
    pub fn expansion_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.encoded_units as f64 / self.raw_bytes as f64
        }
    }

    /// Compute throughput in raw bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.raw_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Self-test Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();
        println!("Payloads: {}", self.payloads);
        println!("Raw bytes: {}", self.raw_bytes);
        println!("Encoded units: {}", self.encoded_units);
        println!("Expansion: {:.1}%", self.expansion_ratio() * 100.0);
        println!("Zero units: {}", self.zero_units);
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();

        for failure in &self.failures {
            println!(
                "  payload {} ({} bytes): {}",
                failure.index, failure.raw_len, failure.reason
            );
        }
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.passed() {
            println!("✓ Self-test passed");
            println!(
                "  {} payloads, {} bytes round-tripped in {} ms",
                self.payloads,
                self.raw_bytes,
                self.duration().as_millis()
            );
        } else {
            println!(
                "✗ Self-test failed: {} of {} payloads did not round-trip",
                self.failures.len(),
                self.payloads
            );
        }
    }

    /// Export the report as a simple key=value text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             payloads={}\n\
             raw_bytes={}\n\
             encoded_units={}\n\
             expansion_ratio={:.4}\n\
             zero_units={}\n\
             failures={}\n",
            self.duration().as_millis(),
            self.payloads,
            self.raw_bytes,
            self.encoded_units,
            self.expansion_ratio(),
            self.zero_units,
            self.failures.len(),
        )
    }
}

impl Default for SelftestReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_creation() {
        let report = SelftestReport::new();
        assert!(report.end_time.is_none());
        assert!(report.passed());
        assert_eq!(report.expansion_ratio(), 0.0);
    }

    #[test]
    fn test_record() {
        let mut report = SelftestReport::new();
        report.record(7, &[0x02, 0x00, 0x03, 0x00, 0x05, 0x06, 0x07, 0x08]);
        report.record(0, &[]);

        assert_eq!(report.payloads, 2);
        assert_eq!(report.raw_bytes, 7);
        assert_eq!(report.encoded_units, 8);
        assert_eq!(report.zero_units, 2);
    }

    #[test]
    fn test_expansion_ratio() {
        let mut report = SelftestReport::new();
        report.raw_bytes = 700;
        report.encoded_units = 800;
        assert!((report.expansion_ratio() - 8.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_failure_marks_run_failed() {
        let mut report = SelftestReport::new();
        report.record_failure(3, 9, "crc mismatch");
        assert!(!report.passed());
        assert_eq!(report.failures[0].index, 3);
        assert_eq!(report.failures[0].reason, "crc mismatch");
    }

    #[test]
    fn test_complete_freezes_duration() {
        let mut report = SelftestReport::new();
        report.complete();
        let first = report.duration();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(report.duration(), first);
    }

    #[test]
    fn test_export_text() {
        let mut report = SelftestReport::new();
        report.record(14, &[1; 16]);
        report.complete();

        let text = report.export_text();
        assert!(text.contains("payloads=1"));
        assert!(text.contains("raw_bytes=14"));
        assert!(text.contains("encoded_units=16"));
        assert!(text.contains("failures=0"));
    }
}
