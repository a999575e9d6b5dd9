//! Determinism checks for conversion artifacts.
//!
//! Conversion is a pure function of the source and the parameters, so
//! repeated runs must produce byte-identical artifacts.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First differing byte offset and the run that produced it.
    pub first_diff: Option<(usize, usize)>,
}

impl fmt::Display for DeterminismResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_diff {
            None => write!(
                f,
                "{} runs, {} bytes, hash {}",
                self.runs, self.output_size, self.hash
            ),
            Some((offset, run)) => write!(
                f,
                "run {} differs from run 0 at byte {} ({} bytes, hash {})",
                run, offset, self.output_size, self.hash
            ),
        }
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        assert!(self.is_deterministic, "Non-deterministic output: {}", self);
    }
}

/// Computes the BLAKE3 hash of `data` as lowercase hex.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `generate` `runs` times and compares every output to the first.
pub fn verify_determinism<F: FnMut() -> Vec<u8>>(mut generate: F, runs: usize) -> DeterminismResult {
    let first = generate();
    let hash = compute_hash(&first);
    let mut first_diff = None;

    for run in 1..runs.max(1) {
        let output = generate();
        if output != first {
            let offset = first
                .iter()
                .zip(&output)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| first.len().min(output.len()));
            first_diff = Some((offset, run));
            break;
        }
    }

    DeterminismResult {
        is_deterministic: first_diff.is_none(),
        runs: runs.max(1),
        output_size: first.len(),
        hash,
        first_diff,
    }
}
