use std::cmp::Ordering;

/// VersionSpan policy for folding every observed version of a library into one label
///
/// A single version stays as-is; several versions become `low..high`.
/// Versions compare segment by segment, numerically where both segments are
/// numbers and lexically otherwise, so `10.0.0` sorts after `9.1.0`.
pub struct VersionSpan;

const SEPARATOR: &str = "..";

impl VersionSpan {
    /// Folds `observed` into the existing span label
    pub fn fold(current: Option<&str>, observed: &str) -> String {
        let current = match current {
            Some(c) if !c.is_empty() => c,
            _ => return observed.to_string(),
        };
        if observed.is_empty() {
            return current.to_string();
        }

        let (low, high) = match current.split_once(SEPARATOR) {
            Some((low, high)) => (low, high),
            None => (current, current),
        };

        if Self::compare(observed, low) == Ordering::Less {
            format!("{}{}{}", observed, SEPARATOR, high)
        } else if Self::compare(observed, high) == Ordering::Greater {
            format!("{}{}{}", low, SEPARATOR, observed)
        } else {
            current.to_string()
        }
    }

    /// Orders two version strings
    pub fn compare(a: &str, b: &str) -> Ordering {
        let mut left = a.split(['.', '-', '+']);
        let mut right = b.split(['.', '-', '+']);
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(l), Some(r)) => {
                    let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                        (Ok(l), Ok(r)) => l.cmp(&r),
                        _ => l.cmp(r),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }
}
