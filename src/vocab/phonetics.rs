//! Phonetic lookup against a dictionary API
//!
//! The API returns a JSON array of entries; each entry may carry a top-level
//! `phonetic` string or a `phonetics` array whose elements have a `text`
//! field. Either shape yields the IPA transcription.
//!
//! The client distinguishes "lookup succeeded but the word has no phonetic"
//! (`Ok(None)`) from transport or parse failure (`Err`), so callers can log
//! failures instead of conflating both into an empty string.

use serde_json::Value;
use std::error::Error;
use std::time::Duration;

/// Dictionary API endpoint; the word is appended to the path
pub const DEFAULT_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Per-request timeout (lookups are best-effort, keep them short)
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking dictionary-API client
///
/// The HTTP client (and its connection pool) is built once and reused across
/// lookups, so backfilling a whole word list shares one pool.
pub struct PhoneticClient {
    api_url: String,
    client: reqwest::blocking::Client,
}

impl PhoneticClient {
    /// Create a client for an endpoint base URL
    pub fn new(api_url: &str) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;
        Ok(PhoneticClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Look up the IPA transcription for a word
    ///
    /// `Ok(Some(ipa))` when found, `Ok(None)` when the response carries no
    /// phonetic, `Err` on timeout, non-success status, or malformed JSON.
    pub fn lookup(&self, word: &str) -> Result<Option<String>, Box<dyn Error>> {
        let url = format!("{}/{}", self.api_url, word);
        let text = self.client.get(&url).send()?.error_for_status()?.text()?;

        let json: Value = serde_json::from_str(&text)?;
        Ok(extract_phonetic(&json))
    }
}

/// Pull the first usable phonetic string out of a dictionary API response
pub fn extract_phonetic(json: &Value) -> Option<String> {
    let entries = json.as_array()?;

    for entry in entries {
        // Preferred: top-level "phonetic" string
        if let Some(text) = entry.get("phonetic").and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }

        // Fallback: first "phonetics" element with a non-empty "text"
        if let Some(phonetics) = entry.get("phonetics").and_then(|v| v.as_array()) {
            for item in phonetics {
                if let Some(text) = item.get("text").and_then(|v| v.as_str()) {
                    if !text.is_empty() {
                        return Some(text.to_string());
                    }
                }
            }
        }
    }

    None
}
