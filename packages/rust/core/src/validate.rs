//! Field validation and normalization for postmortem records.
//!
//! Every check here is pure: it takes the trimmed answer to a prompt (plus
//! the session index where duplicates matter) and classifies it as a
//! [`Validation`]. The collector decides what to print and whether to ask
//! again.

use std::fmt;
use std::sync::LazyLock;

use postmortems_store::SessionIndex;
use regex::Regex;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of validating one prompt answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    /// Accepted with a value.
    Valid(T),
    /// Accepted as intentionally empty.
    Blank,
    /// Rejected; the prompt must be asked again.
    Invalid(Rejection),
}

/// Why an answer was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The URL answer was empty.
    EmptyUrl,
    /// The URL is already in the store.
    KnownUrl(String),
    /// The URL plus a trailing `/` is already in the store.
    KnownWithSlash(String),
    /// The URL minus its last path segment is already in the store.
    KnownParent { url: String, parent: String },
    /// The date is not a plausible `YYYY-MM-DD`.
    BadDate(String),
}

impl Rejection {
    /// Diagnostic line for stderr. Only duplicate URLs are reported; other
    /// rejections just ask again.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::KnownUrl(_) | Self::KnownWithSlash(_) | Self::KnownParent { .. } => {
                Some(self.to_string())
            }
            Self::EmptyUrl | Self::BadDate(_) => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL is empty"),
            Self::KnownUrl(url) => write!(f, "{url} is already recorded"),
            Self::KnownWithSlash(url) => write!(f, "{url}/ is already recorded"),
            Self::KnownParent { url, parent } => {
                write!(f, "{url}: parent {parent} is already recorded")
            }
            Self::BadDate(date) => write!(f, "{date} is not a YYYY-MM-DD date"),
        }
    }
}

/// An accepted answer to the URL prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlEntry {
    /// The user asked to finish the session.
    Quit,
    /// A new, unseen URL.
    Url(String),
}

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `scheme://host/` and captures the host.
static SCHEME_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+://([^/]+)/").expect("scheme/host regex")
});

/// Years 1951-2199, months 01-12, days 01-31. Month lengths are not checked.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:195[1-9]|19[6-9]\d|2[01]\d\d)-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12]\d|3[01])$")
        .expect("date regex")
});

/// Keyword separators: any run of commas and whitespace.
static KEYWORD_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("keyword split regex"));

// ---------------------------------------------------------------------------
// URL
// ---------------------------------------------------------------------------

/// Answers that end the session at the URL prompt.
const QUIT_WORDS: [&str; 2] = ["quit", "q"];

/// Validate a URL answer against the known URLs.
pub fn validate_url(input: &str, index: &SessionIndex) -> Validation<UrlEntry> {
    let url = input.trim();
    if url.is_empty() {
        return Validation::Invalid(Rejection::EmptyUrl);
    }
    if QUIT_WORDS.contains(&url) {
        return Validation::Valid(UrlEntry::Quit);
    }

    if index.contains_url(url) {
        return Validation::Invalid(Rejection::KnownUrl(url.to_string()));
    }
    if index.contains_url(&format!("{url}/")) {
        return Validation::Invalid(Rejection::KnownWithSlash(url.to_string()));
    }
    if let Some(parent) = strip_last_segment(url) {
        if index.contains_url(parent) {
            return Validation::Invalid(Rejection::KnownParent {
                url: url.to_string(),
                parent: parent.to_string(),
            });
        }
    }

    Validation::Valid(UrlEntry::Url(url.to_string()))
}

/// Drop the final `/` and everything after it.
fn strip_last_segment(url: &str) -> Option<&str> {
    url.rfind('/').map(|idx| &url[..idx])
}

/// Derive the source domain of a URL.
///
/// `scheme://host/...` yields `host`; anything else yields the first
/// `/`-delimited segment (the whole string if there is no `/`).
pub fn extract_domain(url: &str) -> String {
    if let Some(caps) = SCHEME_HOST_RE.captures(url) {
        return caps[1].to_string();
    }
    url.split('/').next().unwrap_or(url).to_string()
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Split a keyword answer into tokens. An empty answer is [`Validation::Blank`].
pub fn validate_keywords(input: &str) -> Validation<Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Validation::Blank;
    }

    let keywords = KEYWORD_SPLIT_RE
        .split(input)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    Validation::Valid(keywords)
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

/// True when `input` is a range-plausible `YYYY-MM-DD` date.
pub fn match_date(input: &str) -> bool {
    DATE_RE.is_match(input)
}

/// Validate a date answer.
pub fn validate_date(input: &str) -> Validation<String> {
    let date = input.trim();
    if match_date(date) {
        Validation::Valid(date.to_string())
    } else {
        Validation::Invalid(Rejection::BadDate(date.to_string()))
    }
}
