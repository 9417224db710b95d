use serde::Serialize;

/// Aggregate health metrics for one ecosystem snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthSummary {
    pub one_major: usize,
    pub two_major: usize,
    pub three_plus_major: usize,
    pub minor_only: usize,
    pub patch_only: usize,
    pub total_libraries: usize,
    pub total_age: f64,
    pub total_vulnerabilities: usize,
    /// Unowned libraries that crossed an attention threshold
    pub unowned_needs_attention: usize,
    pub score: f64,
}

impl HealthSummary {
    pub const THREE_PLUS_MAJOR_WEIGHT: f64 = 50.0;
    pub const TWO_MAJOR_WEIGHT: f64 = 20.0;
    pub const ONE_MAJOR_WEIGHT: f64 = 10.0;
    pub const MINOR_ONLY_WEIGHT: f64 = 1.0;
    pub const PATCH_ONLY_WEIGHT: f64 = 0.5;

    /// Weighted drift score from the bucket counts
    pub fn weighted_score(&self) -> f64 {
        Self::THREE_PLUS_MAJOR_WEIGHT * self.three_plus_major as f64
            + Self::TWO_MAJOR_WEIGHT * self.two_major as f64
            + Self::ONE_MAJOR_WEIGHT * self.one_major as f64
            + Self::MINOR_ONLY_WEIGHT * self.minor_only as f64
            + Self::PATCH_ONLY_WEIGHT * self.patch_only as f64
    }

    pub fn needs_attention(&self) -> bool {
        self.unowned_needs_attention > 0
    }
}
