//! Word sheet source: remote fetch plus local cache
//!
//! Load policy:
//! - Read the local cache file when it exists
//! - Otherwise fetch the sheet over HTTP and save it to the cache
//!
//! A fetch failure is surfaced to the caller, which degrades to an empty
//! placeholder list so rendering never crashes.

use crate::vocab::words::WordList;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Sheet export URL used when none is given on the command line
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1IIjvTR_UAeWFCO8Cp_LqlXoegetyMy4Nxxgk74L03G0/export?format=csv";

/// Default local cache filename
pub const DEFAULT_CACHE_FILE: &str = "words_local.csv";

/// HTTP timeout for the sheet fetch
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Loads the word list from cache or the remote sheet
pub struct WordSource {
    sheet_url: String,
    cache_path: PathBuf,
}

impl WordSource {
    /// Create a source for a sheet URL and cache path
    pub fn new(sheet_url: &str, cache_path: &Path) -> Self {
        WordSource {
            sheet_url: sheet_url.to_string(),
            cache_path: cache_path.to_path_buf(),
        }
    }

    /// Load words: local cache if present, otherwise fetch-and-save
    pub fn load(&self) -> Result<WordList, Box<dyn Error>> {
        if self.cache_path.exists() {
            let text = fs::read_to_string(&self.cache_path)?;
            return WordList::from_csv_text(&text);
        }
        self.fetch_and_save()
    }

    /// Fetch the sheet, parse it, and persist the cache
    ///
    /// The cache is only written after a successful parse, so a bad fetch
    /// never clobbers a good cache.
    pub fn fetch_and_save(&self) -> Result<WordList, Box<dyn Error>> {
        log::info!("fetching word sheet from {}", self.sheet_url);

        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let text = client
            .get(&self.sheet_url)
            .send()?
            .error_for_status()?
            .text()?;

        let list = WordList::from_csv_text(&text)?;
        fs::write(&self.cache_path, list.to_csv_all())?;

        log::info!("fetched {} words, cached to {}", list.len(), self.cache_path.display());
        Ok(list)
    }

    /// Cache file modification time, if a cache exists
    pub fn cache_modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.cache_path)
            .and_then(|m| m.modified())
            .ok()
    }

    /// One-line local cache status for display, `None` when no cache exists
    pub fn cache_status(&self) -> Option<String> {
        let modified = self.cache_modified()?;
        let stamp = chrono::DateTime::<chrono::Local>::from(modified).format("%Y-%m-%d %H:%M");
        Some(format!(
            "Using local cache {} (updated {})",
            self.cache_path.display(),
            stamp
        ))
    }

    /// Path of the local cache file
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_prefers_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("words_local.csv");
        fs::write(&cache, "word,ipa,translation,cluster\nhiatus,,pause,\n").unwrap();

        // Unroutable URL: load must not touch the network when a cache exists
        let source = WordSource::new("http://127.0.0.1:9/sheet.csv", &cache);
        let list = source.load().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries[0].word, "hiatus");
    }

    #[test]
    fn test_fetch_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("words_local.csv");

        let source = WordSource::new("http://127.0.0.1:9/sheet.csv", &cache);
        assert!(source.load().is_err());
        // Failed fetch must not create a cache file
        assert!(!cache.exists());
    }

    #[test]
    fn test_cache_modified_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = WordSource::new(DEFAULT_SHEET_URL, &dir.path().join("none.csv"));
        assert!(source.cache_modified().is_none());
        assert!(source.cache_status().is_none());
    }

    #[test]
    fn test_cache_status_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("words_local.csv");
        fs::write(&cache, "word,ipa,translation,cluster\n").unwrap();

        let source = WordSource::new(DEFAULT_SHEET_URL, &cache);
        let status = source.cache_status().unwrap();
        assert!(status.contains("words_local.csv"));
        assert!(status.contains("updated"));
    }
}
