//! Session-scoped cache of the last successful search results.
//!
//! Keyed by a digest of the GitHub username and the resume reference, so a
//! repeat search with identical inputs skips the network entirely. Entries
//! live for the process lifetime only and are purged by "search again".

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::models::Job;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub jobs: Vec<Job>,
    pub fetched_at: DateTime<Utc>,
}

/// Digest over the serialized search intent; field boundaries survive
/// serialization, so `("ab", "c")` and `("a", "bc")` key differently.
fn cache_key(github_username: &str, resume_ref: &str) -> String {
    let input = serde_json::to_string(&(github_username, resume_ref))
        .expect("key material is always serializable");
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, github_username: &str, resume_ref: &str) -> Option<&CacheEntry> {
        self.entries.get(&cache_key(github_username, resume_ref))
    }

    /// Stores the latest successful result set for this intent. Empty result
    /// sets are cached like any other: "no matches" is a complete answer.
    pub fn insert(&mut self, github_username: &str, resume_ref: &str, jobs: Vec<Job>) {
        self.entries.insert(
            cache_key(github_username, resume_ref),
            CacheEntry {
                jobs,
                fetched_at: Utc::now(),
            },
        );
    }

    pub fn remove(&mut self, github_username: &str, resume_ref: &str) {
        self.entries.remove(&cache_key(github_username, resume_ref));
    }
}
