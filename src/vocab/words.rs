//! Word list model: parsing, queries, enrichment, export
//!
//! Handles:
//! - CSV sheet parsing with case-insensitive header matching
//! - Distinct-cluster listing for the rotation scheduler
//! - Cluster filtering and substring search
//! - Cluster/IPA backfill (enrichment pass)
//! - CSV export of filtered subsets

use crate::csv;
use crate::vocab::classifier::ClusterClassifier;
use rustc_hash::FxHashMap;
use std::error::Error;

/// Canonical cache/export column order
pub const COLUMNS: [&str; 4] = ["word", "ipa", "translation", "cluster"];

/// One vocabulary word
///
/// `word` and `translation` are non-empty after load; `ipa` may be empty;
/// `cluster` is populated by the enrichment pass when the sheet omits it.
#[derive(Clone, Debug, PartialEq)]
pub struct WordEntry {
    pub word: String,
    pub ipa: String,
    pub translation: String,
    pub cluster: String,
}

/// The loaded word list
#[derive(Clone, Debug, Default)]
pub struct WordList {
    pub entries: Vec<WordEntry>,
}

impl WordList {
    /// Empty placeholder list (used when loading fails)
    pub fn empty() -> Self {
        WordList {
            entries: Vec::new(),
        }
    }

    /// Parse a word list from CSV text
    ///
    /// Header names are matched case-insensitively after trimming. `word` and
    /// `translation` are required; a sheet missing either is an error naming
    /// the columns actually found. `ipa` and `cluster` are optional and
    /// default to empty. Rows with an empty word or translation are dropped.
    pub fn from_csv_text(text: &str) -> Result<Self, Box<dyn Error>> {
        let (header, rows) = csv::parse_document(text)?;

        let index: FxHashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();

        let word_col = index.get("word").copied();
        let translation_col = index.get("translation").copied();

        let (word_col, translation_col) = match (word_col, translation_col) {
            (Some(w), Some(t)) => (w, t),
            _ => {
                let found: Vec<&str> = header.iter().map(|h| h.trim()).collect();
                return Err(format!(
                    "sheet is missing required columns 'word'/'translation' (found: {})",
                    found.join(", ")
                )
                .into());
            }
        };

        let ipa_col = index.get("ipa").copied();
        let cluster_col = index.get("cluster").copied();

        let field = |row: &[String], col: Option<usize>| -> String {
            col.and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let entries = rows
            .iter()
            .map(|row| WordEntry {
                word: field(row, Some(word_col)),
                ipa: field(row, ipa_col),
                translation: field(row, Some(translation_col)),
                cluster: field(row, cluster_col),
            })
            .filter(|e| !e.word.is_empty() && !e.translation.is_empty())
            .collect();

        Ok(WordList { entries })
    }

    /// Number of words loaded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no words
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted-ascending distinct cluster names (empty clusters excluded)
    pub fn distinct_clusters(&self) -> Vec<String> {
        let mut clusters: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.cluster.clone())
            .filter(|c| !c.is_empty())
            .collect();
        clusters.sort();
        clusters.dedup();
        clusters
    }

    /// Words belonging to one cluster
    pub fn in_cluster(&self, cluster: &str) -> Vec<&WordEntry> {
        self.entries
            .iter()
            .filter(|e| e.cluster == cluster)
            .collect()
    }

    /// Case-insensitive substring search over word and translation
    pub fn search(&self, query: &str) -> Vec<&WordEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.word.to_lowercase().contains(&needle)
                    || e.translation.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Fill empty `cluster` fields via the classifier
    pub fn backfill_clusters(&mut self, classifier: &ClusterClassifier) {
        for entry in &mut self.entries {
            if entry.cluster.is_empty() {
                entry.cluster = classifier.classify(&entry.word);
            }
        }
    }

    /// Fill empty `ipa` fields via a phonetic lookup
    ///
    /// `Ok(None)` (word has no phonetic) and `Err` (lookup failed) both leave
    /// the field empty; failures are logged but never surfaced.
    pub fn backfill_ipa<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Result<Option<String>, Box<dyn Error>>,
    {
        for entry in &mut self.entries {
            if !entry.ipa.is_empty() {
                continue;
            }
            match lookup(&entry.word) {
                Ok(Some(ipa)) => entry.ipa = ipa,
                Ok(None) => {}
                Err(e) => log::warn!("phonetic lookup failed for '{}': {}", entry.word, e),
            }
        }
    }

    /// Serialize entries to CSV in canonical column order
    pub fn to_csv(entries: &[&WordEntry]) -> String {
        let mut out = csv::write_line(&COLUMNS);
        out.push('\n');
        for e in entries {
            out.push_str(&csv::write_line(&[&e.word, &e.ipa, &e.translation, &e.cluster]));
            out.push('\n');
        }
        out
    }

    /// Serialize the whole list to CSV
    pub fn to_csv_all(&self) -> String {
        Self::to_csv(&self.entries.iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::classifier::{ClusterClassifier, UNCATEGORIZED};

    const SHEET: &str = "\
word,ipa,translation,cluster
hiatus,/haɪˈeɪtəs/,pause,Historical & Temporal
leverage,,influence,
candid,,frank,Emotions & Character
";

    #[test]
    fn test_parse_sheet() {
        let list = WordList::from_csv_text(SHEET).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.entries[0].word, "hiatus");
        assert_eq!(list.entries[0].ipa, "/haɪˈeɪtəs/");
        assert_eq!(list.entries[1].cluster, "");
    }

    #[test]
    fn test_header_case_and_whitespace() {
        let text = " Word , Translation \nhiatus,pause\n";
        let list = WordList::from_csv_text(text).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries[0].translation, "pause");
        assert_eq!(list.entries[0].ipa, "");
    }

    #[test]
    fn test_missing_required_column_lists_found() {
        let text = "term,meaning\nhiatus,pause\n";
        let err = WordList::from_csv_text(text).unwrap_err().to_string();
        assert!(err.contains("term"));
        assert!(err.contains("meaning"));
    }

    #[test]
    fn test_incomplete_rows_dropped() {
        let text = "word,translation\nhiatus,pause\n,orphan\nsolo,\n";
        let list = WordList::from_csv_text(text).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_backfill_clusters() {
        let mut list = WordList::from_csv_text(SHEET).unwrap();
        list.backfill_clusters(&ClusterClassifier::default());
        assert_eq!(list.entries[1].cluster, "Business & Finance");
        // Sheet-provided cluster is left untouched
        assert_eq!(list.entries[0].cluster, "Historical & Temporal");
    }

    #[test]
    fn test_backfill_clusters_unknown_word() {
        let mut list = WordList::from_csv_text("word,translation\nxyz123,nothing\n").unwrap();
        list.backfill_clusters(&ClusterClassifier::default());
        assert_eq!(list.entries[0].cluster, UNCATEGORIZED);
    }

    #[test]
    fn test_backfill_ipa_swallows_failure() {
        let mut list =
            WordList::from_csv_text("word,ipa,translation\na,,x\nb,,y\nc,/si/,z\n").unwrap();
        list.backfill_ipa(|word| match word {
            "a" => Ok(Some("/eɪ/".to_string())),
            "b" => Err("connection refused".into()),
            _ => Ok(None),
        });
        assert_eq!(list.entries[0].ipa, "/eɪ/");
        assert_eq!(list.entries[1].ipa, "");
        // Already-present IPA is not overwritten
        assert_eq!(list.entries[2].ipa, "/si/");
    }

    #[test]
    fn test_distinct_clusters_sorted() {
        let text = "word,translation,cluster\na,x,Zeta\nb,y,Alpha\nc,z,Zeta\nd,w,\n";
        let list = WordList::from_csv_text(text).unwrap();
        assert_eq!(list.distinct_clusters(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let list = WordList::from_csv_text(SHEET).unwrap();
        assert_eq!(list.search("LEVER").len(), 1);
        assert_eq!(list.search("Pause").len(), 1); // matches translation
        assert_eq!(list.search("zzz").len(), 0);
    }

    #[test]
    fn test_csv_round_trip() {
        let list = WordList::from_csv_text(SHEET).unwrap();
        let reparsed = WordList::from_csv_text(&list.to_csv_all()).unwrap();
        assert_eq!(reparsed.entries, list.entries);
    }
}
