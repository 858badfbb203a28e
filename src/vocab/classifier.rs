//! Cluster classification from a static keyword table
//!
//! Handles:
//! - Keyword table definition (cluster name → lowercase keyword set)
//! - Case-insensitive exact-match lookup
//! - "Uncategorized" fallback for unknown words

use rustc_hash::FxHashSet;

/// Cluster name used when no keyword set contains the word
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One cluster and the keywords that map into it
#[derive(Clone, Debug)]
pub struct ClusterKeywords {
    /// Cluster display name
    pub name: String,
    /// Lowercase keywords (exact match, not substring)
    pub keywords: FxHashSet<String>,
}

/// Ordered keyword table: definition order is the tie-break order
///
/// Built once at startup and injected into the classifier, so tests can
/// substitute a table of their own.
#[derive(Clone, Debug)]
pub struct ClusterKeywordTable {
    clusters: Vec<ClusterKeywords>,
}

impl ClusterKeywordTable {
    /// Build a table from (name, keywords) pairs, lowercasing every keyword
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        let clusters = entries
            .iter()
            .map(|(name, words)| ClusterKeywords {
                name: name.to_string(),
                keywords: words.iter().map(|w| w.to_lowercase()).collect(),
            })
            .collect();
        ClusterKeywordTable { clusters }
    }

    /// Built-in keyword table for the default word sheet
    pub fn builtin() -> Self {
        Self::new(&[
            (
                "Business & Finance",
                &[
                    "leverage", "merger", "equity", "asset", "liability", "audit", "invoice",
                    "revenue", "dividend", "procurement", "stakeholder", "arrears",
                ],
            ),
            (
                "Historical & Temporal",
                &[
                    "hiatus", "era", "epoch", "chronicle", "medieval", "antiquity", "decade",
                    "interim", "precursor", "obsolete", "archaic",
                ],
            ),
            (
                "Science & Nature",
                &[
                    "catalyst", "osmosis", "photosynthesis", "sediment", "genome", "inertia",
                    "entropy", "habitat", "nocturnal", "germinate",
                ],
            ),
            (
                "Emotions & Character",
                &[
                    "candid", "resilient", "apathy", "zealous", "melancholy", "earnest",
                    "frugal", "gregarious", "stoic", "petulant",
                ],
            ),
            (
                "Law & Governance",
                &[
                    "statute", "verdict", "plaintiff", "amnesty", "jurisdiction", "referendum",
                    "ratify", "injunction", "arbitration",
                ],
            ),
        ])
    }

    /// Iterate clusters in definition order
    pub fn iter(&self) -> impl Iterator<Item = &ClusterKeywords> {
        self.clusters.iter()
    }

    /// Number of clusters defined
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether the table has no clusters
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl Default for ClusterKeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Maps words to cluster names using an injected keyword table
pub struct ClusterClassifier {
    table: ClusterKeywordTable,
}

impl ClusterClassifier {
    /// Create a classifier over the given table
    pub fn new(table: ClusterKeywordTable) -> Self {
        ClusterClassifier { table }
    }

    /// Classify a word into a cluster name
    ///
    /// Lookup is case-insensitive exact match. The first matching cluster in
    /// table definition order wins. Words in no keyword set classify as
    /// [`UNCATEGORIZED`]. Pure function, always returns a name.
    pub fn classify(&self, word: &str) -> String {
        let normalized = word.trim().to_lowercase();

        for cluster in self.table.iter() {
            if cluster.keywords.contains(&normalized) {
                return cluster.name.clone();
            }
        }

        UNCATEGORIZED.to_string()
    }
}

impl Default for ClusterClassifier {
    fn default() -> Self {
        Self::new(ClusterKeywordTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keyword() {
        let classifier = ClusterClassifier::default();
        assert_eq!(classifier.classify("hiatus"), "Historical & Temporal");
        assert_eq!(classifier.classify("leverage"), "Business & Finance");
    }

    #[test]
    fn test_unknown_word_falls_back() {
        let classifier = ClusterClassifier::default();
        assert_eq!(classifier.classify("xyz123"), UNCATEGORIZED);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = ClusterClassifier::default();
        assert_eq!(
            classifier.classify("Leverage"),
            classifier.classify("leverage")
        );
        assert_eq!(classifier.classify("HIATUS"), "Historical & Temporal");
    }

    #[test]
    fn test_definition_order_tie_break() {
        // "shared" appears in both sets; the first-defined cluster wins
        let table = ClusterKeywordTable::new(&[
            ("First", &["shared", "alpha"]),
            ("Second", &["shared", "beta"]),
        ]);
        let classifier = ClusterClassifier::new(table);
        assert_eq!(classifier.classify("shared"), "First");
        assert_eq!(classifier.classify("beta"), "Second");
    }

    #[test]
    fn test_injected_table_replaces_builtin() {
        let table = ClusterKeywordTable::new(&[("Only", &["word"])]);
        let classifier = ClusterClassifier::new(table);
        assert_eq!(classifier.classify("word"), "Only");
        // Builtin keywords no longer classify
        assert_eq!(classifier.classify("hiatus"), UNCATEGORIZED);
    }
}
