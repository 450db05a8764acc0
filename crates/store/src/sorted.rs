//! Sorted-set entries for the in-memory store.

/// Sorted multiset of (score, member) pairs.
///
/// Unlike a member-unique sorted set, a member may appear under several
/// scores at once: list-field indexes add one pair per element for the
/// same record id. Exact (score, member) duplicates collapse to a
/// single pair. Pairs are kept ordered by score (ties by member), so a
/// range query is a contiguous scan.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SortedSet {
    // ordered by (score, member) under f64::total_cmp
    entries: Vec<(f64, String)>,
}

impl SortedSet {
    /// Empty set.
    pub fn new() -> Self {
        SortedSet::default()
    }

    /// Insert a (score, member) pair; an exact duplicate is a no-op.
    pub fn add(&mut self, score: f64, member: &str) {
        let at = self.entries.partition_point(|(s, m)| {
            match s.total_cmp(&score) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => m.as_str() < member,
                std::cmp::Ordering::Greater => false,
            }
        });
        if let Some((s, m)) = self.entries.get(at) {
            if s.total_cmp(&score).is_eq() && m == member {
                return;
            }
        }
        self.entries.insert(at, (score, member.to_string()));
    }

    /// Remove every pair for `member`, returning how many were dropped.
    pub fn remove_member(&mut self, member: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, m)| m != member);
        before - self.entries.len()
    }

    /// Members whose score lies in the closed range `[min, max]`, in
    /// score order.
    pub fn range(&self, min: f64, max: f64) -> Vec<String> {
        let lo = self.entries.partition_point(|(s, _)| s.total_cmp(&min).is_lt());
        let hi = self.entries.partition_point(|(s, _)| s.total_cmp(&max).is_le());
        self.entries[lo..hi].iter().map(|(_, m)| m.clone()).collect()
    }

    /// Scores currently held for `member`, in order.
    pub fn scores_of(&self, member: &str) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|(_, m)| m == member)
            .map(|(s, _)| *s)
            .collect()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
