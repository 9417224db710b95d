use crate::version_analysis::domain::LibraryRecord;

/// AttentionPolicy decides when an unowned library must be surfaced
///
/// A library with an unresolved owner needs attention when any of these hold:
/// 1. it is at least one major version behind
/// 2. it is on the latest major but more than 20 minor versions behind
/// 3. its age exceeds 3.0 library-years
/// 4. it has any vulnerability on record, fixed ones included
///
/// Libraries with no drift classification are still checked against 3 and 4.
pub struct AttentionPolicy;

impl AttentionPolicy {
    pub const MINOR_DRIFT_THRESHOLD: u32 = 20;
    pub const AGE_THRESHOLD: f64 = 3.0;

    pub fn needs_attention(record: &LibraryRecord) -> bool {
        if !record.owner().is_unresolved() {
            return false;
        }

        if let Some(drift) = record.drift() {
            if drift.major > 0 {
                return true;
            }
            if drift.minor > Self::MINOR_DRIFT_THRESHOLD {
                return true;
            }
        }

        if record.age().is_some_and(|age| age > Self::AGE_THRESHOLD) {
            return true;
        }

        !record.vulnerabilities().is_empty()
    }
}
