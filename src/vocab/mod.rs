//! Vocabulary: word model, classification, scheduling, and sources
//!
//! # Components
//! - `words.rs`: WordEntry/WordList parsing, queries, enrichment, export
//! - `classifier.rs`: keyword-table cluster classification
//! - `schedule.rs`: date-rotation cluster picker
//! - `source.rs`: remote sheet fetch and local cache
//! - `phonetics.rs`: dictionary-API IPA lookup

pub mod classifier;
pub mod phonetics;
pub mod schedule;
pub mod source;
pub mod words;

pub use classifier::{ClusterClassifier, ClusterKeywordTable};
pub use schedule::cluster_for_date;
pub use source::WordSource;
pub use words::{WordEntry, WordList};

#[allow(unused_imports)]
pub use phonetics::PhoneticClient;
