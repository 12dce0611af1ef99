use std::collections::HashMap;

/// Statuses a PEP page may show for each abbreviated index code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusExpectations {
    table: HashMap<String, Vec<String>>,
}

/// A page status outside the expected set for its index code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch<'a> {
    pub status_code: &'a str,
    pub observed: &'a str,
    pub expected: &'a [String],
}

impl Mismatch<'_> {
    pub fn expected_list(&self) -> String {
        self.expected.join(", ")
    }
}

impl StatusExpectations {
    pub fn new<I, C, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<S>)>,
        C: Into<String>,
        S: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(code, statuses)| {
                    (code.into(), statuses.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    pub fn expected(&self, status_code: &str) -> Option<&[String]> {
        self.table.get(status_code).map(Vec::as_slice)
    }

    /// `None` when the code is unmapped or the status is acceptable.
    pub fn mismatch<'a>(&'a self, status_code: &'a str, observed: &'a str) -> Option<Mismatch<'a>> {
        let expected = self.expected(status_code)?;
        if expected.iter().any(|s| s == observed) {
            return None;
        }
        Some(Mismatch {
            status_code,
            observed,
            expected,
        })
    }
}

impl Default for StatusExpectations {
    fn default() -> Self {
        Self::new([
            ("A", vec!["Active", "Accepted"]),
            ("D", vec!["Deferred"]),
            ("F", vec!["Final"]),
            ("P", vec!["Provisional"]),
            ("R", vec!["Rejected"]),
            ("S", vec!["Superseded"]),
            ("W", vec!["Withdrawn"]),
            ("", vec!["Draft", "Active"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = StatusExpectations::default();
        assert_eq!(
            table.expected("A"),
            Some(&["Active".to_string(), "Accepted".to_string()][..])
        );
        assert_eq!(table.expected("").map(|s| s.len()), Some(2));
        assert!(table.expected("X").is_none());
    }

    #[test]
    fn test_acceptable_status_is_not_a_mismatch() {
        let table = StatusExpectations::default();
        assert!(table.mismatch("A", "Accepted").is_none());
        assert!(table.mismatch("", "Draft").is_none());
    }

    #[test]
    fn test_unmapped_code_never_mismatches() {
        let table = StatusExpectations::default();
        assert!(table.mismatch("X", "Anything at all").is_none());
        assert!(table.mismatch("Z", "").is_none());
    }

    #[test]
    fn test_mismatch_lists_expected_statuses() {
        let table = StatusExpectations::default();
        let mismatch = table.mismatch("A", "Deprecated").unwrap();
        assert_eq!(mismatch.status_code, "A");
        assert_eq!(mismatch.observed, "Deprecated");
        assert_eq!(mismatch.expected_list(), "Active, Accepted");
    }

    #[test]
    fn test_comparison_is_exact() {
        let table = StatusExpectations::default();
        assert!(table.mismatch("F", "Final\n").is_some());
        assert!(table.mismatch("F", "final").is_some());
    }
}
