//! Session lookup indexes derived from the loaded store.

use std::collections::{BTreeSet, HashSet};

use postmortems_shared::{Record, Store};

/// Every distinct keyword across the store's records.
pub fn collect_keywords(store: &Store) -> BTreeSet<String> {
    store
        .records()
        .iter()
        .flat_map(|record| record.keywords())
        .map(str::to_owned)
        .collect()
}

/// Every distinct URL across the store's records.
pub fn collect_urls(store: &Store) -> HashSet<String> {
    store
        .records()
        .iter()
        .map(|record| record.url().to_owned())
        .collect()
}

/// Known keywords and URLs for one session.
///
/// Built once from the loaded store, then passed through each record prompt
/// and grown with every accepted record. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIndex {
    keywords: BTreeSet<String>,
    urls: HashSet<String>,
}

impl SessionIndex {
    /// Build the indexes from a loaded store.
    pub fn from_store(store: &Store) -> Self {
        let index = Self {
            keywords: collect_keywords(store),
            urls: collect_urls(store),
        };
        tracing::debug!(
            keywords = index.keywords.len(),
            urls = index.urls.len(),
            "built session index"
        );
        index
    }

    /// Known keywords, sorted.
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn url_count(&self) -> usize {
        self.urls.len()
    }

    /// Return the indexes extended with `record`'s URL and keywords.
    pub fn with_record(mut self, record: &Record) -> Self {
        self.urls.insert(record.url.clone());
        self.keywords.extend(record.keywords.iter().cloned());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        serde_json::from_str(
            r#"[
  {"url": "https://a.example/1", "keywords": ["dns", "outage"]},
  {"url": "https://b.example/2", "keywords": ["outage", "cache"]},
  {"url": "https://a.example/1", "keywords": []}
]"#,
        )
        .expect("deserialize")
    }

    #[test]
    fn keywords_are_distinct_and_sorted() {
        let keywords: Vec<String> = collect_keywords(&store()).into_iter().collect();
        assert_eq!(keywords, vec!["cache", "dns", "outage"]);
    }

    #[test]
    fn urls_are_distinct() {
        let urls = collect_urls(&store());
        assert_eq!(urls.len(), 2);
        assert!(urls.contains("https://b.example/2"));
    }

    #[test]
    fn with_record_grows_both_sets() {
        let index = SessionIndex::from_store(&store());
        let record = Record {
            url: "https://c.example/3".into(),
            domain: "c.example".into(),
            keywords: vec!["dns".into(), "bgp".into()],
            date: "2022-01-01".into(),
        };

        let index = index.with_record(&record);
        assert!(index.contains_url("https://c.example/3"));
        assert_eq!(index.url_count(), 3);
        assert!(index.keywords().contains("bgp"));
        assert_eq!(index.keywords().len(), 4);
    }

    #[test]
    fn empty_store_gives_empty_index() {
        let index = SessionIndex::from_store(&Store::new());
        assert_eq!(index, SessionIndex::default());
    }
}
