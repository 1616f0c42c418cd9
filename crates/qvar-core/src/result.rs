//! Measurement results and job lifecycle types for the remote runtime.
//!
//! A completed sampler job exposes one result per submitted circuit ("pub"),
//! each holding measurement counts keyed by classical register name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Register name samplers use when a circuit measures all qubits.
pub const PREFERRED_REGISTER: &str = "meas";

// ---------------------------------------------------------------------------
// Job status
// ---------------------------------------------------------------------------

/// Lifecycle state reported by the runtime for a submitted job.
///
/// Decoding is case-insensitive; states this crate does not model are kept
/// verbatim in [`JobStatus::Other`] so the poller can still print them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Error,
    Cancelled,
    Other(String),
}

impl JobStatus {
    /// The job completed successfully and results can be fetched.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The job will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Cancelled)
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "QUEUED" => Self::Queued,
            "RUNNING" => Self::Running,
            "DONE" => Self::Done,
            "ERROR" => Self::Error,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queued => write!(f, "QUEUED"),
            Self::Running => write!(f, "RUNNING"),
            Self::Done => write!(f, "DONE"),
            Self::Error => write!(f, "ERROR"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Measurement counts: bitstring → observed frequency over all shots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(pub BTreeMap<String, u64>);

impl Counts {
    /// Total shots observed across all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Observed frequency of one bitstring, zero if never seen.
    pub fn count_of(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Empirical probability that the target bit reads "1".
    ///
    /// Convention: the target bit is the leftmost character of each
    /// bitstring. This mirrors how samplers order classical registers and
    /// is assumed, not validated against the register layout.
    pub fn leftmost_one_probability(&self) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        let ones: u64 = self
            .0
            .iter()
            .filter(|(bitstring, _)| bitstring.starts_with('1'))
            .map(|(_, count)| count)
            .sum();
        ones as f64 / total as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Sampler results
// ---------------------------------------------------------------------------

/// Per-circuit result: counts keyed by classical register name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubResult {
    pub data: BTreeMap<String, Counts>,
}

/// Full result payload of a completed sampler job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerResult {
    pub pubs: Vec<PubResult>,
}

impl SamplerResult {
    /// Counts of the first circuit's measurement register.
    ///
    /// Prefers the conventional [`PREFERRED_REGISTER`] name; otherwise falls
    /// back to the first register in key order. `None` when the result holds
    /// no pubs or no registers.
    pub fn first_register(&self) -> Option<(&str, &Counts)> {
        let pub_result = self.pubs.first()?;
        if let Some(counts) = pub_result.data.get(PREFERRED_REGISTER) {
            return Some((PREFERRED_REGISTER, counts));
        }
        pub_result
            .data
            .iter()
            .next()
            .map(|(name, counts)| (name.as_str(), counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Counts {
        pairs
            .iter()
            .map(|(bits, count)| (bits.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_leftmost_one_probability() {
        let counts = counts(&[("0000", 9406), ("1000", 594)]);
        assert_eq!(counts.total_shots(), 10_000);
        assert_eq!(counts.leftmost_one_probability(), 594.0 / 10_000.0);
    }

    #[test]
    fn test_single_bit_counts() {
        let counts = counts(&[("0", 604), ("1", 9396)]);
        assert!((counts.leftmost_one_probability() - 0.9396).abs() < 1e-12);
    }

    #[test]
    fn test_empty_counts() {
        let counts = Counts::default();
        assert_eq!(counts.total_shots(), 0);
        assert_eq!(counts.leftmost_one_probability(), 0.0);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_count_of_missing_outcome() {
        let counts = counts(&[("1", 10)]);
        assert_eq!(counts.count_of("0"), 0);
        assert_eq!(counts.count_of("1"), 10);
    }

    #[test]
    fn test_status_decode() {
        assert_eq!(JobStatus::from("DONE".to_string()), JobStatus::Done);
        assert_eq!(JobStatus::from("done".to_string()), JobStatus::Done);
        assert_eq!(JobStatus::from("Queued".to_string()), JobStatus::Queued);
        assert_eq!(
            JobStatus::from("VALIDATING".to_string()),
            JobStatus::Other("VALIDATING".to_string())
        );
    }

    #[test]
    fn test_status_display_round_trip() {
        for raw in ["QUEUED", "RUNNING", "DONE", "ERROR", "CANCELLED"] {
            let status = JobStatus::from(raw.to_string());
            assert_eq!(status.to_string(), raw);
        }
        let odd = JobStatus::from("Initializing".to_string());
        assert_eq!(odd.to_string(), "Initializing");
    }

    #[test]
    fn test_status_terminal() {
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Error.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_done());
    }

    #[test]
    fn test_first_register_prefers_meas() {
        let mut data = BTreeMap::new();
        data.insert("c".to_string(), counts(&[("0", 1)]));
        data.insert(PREFERRED_REGISTER.to_string(), counts(&[("1", 2)]));
        let result = SamplerResult {
            pubs: vec![PubResult { data }],
        };
        let (name, register) = result.first_register().unwrap();
        assert_eq!(name, PREFERRED_REGISTER);
        assert_eq!(register.count_of("1"), 2);
    }

    #[test]
    fn test_first_register_falls_back_to_first_key() {
        let mut data = BTreeMap::new();
        data.insert("c".to_string(), counts(&[("0", 3)]));
        let result = SamplerResult {
            pubs: vec![PubResult { data }],
        };
        let (name, register) = result.first_register().unwrap();
        assert_eq!(name, "c");
        assert_eq!(register.count_of("0"), 3);
    }

    #[test]
    fn test_first_register_empty_result() {
        let result = SamplerResult { pubs: Vec::new() };
        assert!(result.first_register().is_none());
    }

    #[test]
    fn test_result_wire_decode() {
        let raw = r#"{"pubs":[{"data":{"c":{"0000":9406,"1000":594}}}]}"#;
        let result: SamplerResult = serde_json::from_str(raw).unwrap();
        let (name, register) = result.first_register().unwrap();
        assert_eq!(name, "c");
        assert_eq!(register.leftmost_one_probability(), 0.0594);
    }
}
