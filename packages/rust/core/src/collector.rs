//! Interactive record collection: URL → domain → keywords → date, repeated
//! until the user quits.
//!
//! The [`Collector`] owns the three console streams so the same loop runs
//! against a terminal in the binary and against in-memory buffers in tests.
//! The [`SessionIndex`] is passed in by value and handed back at the end,
//! grown by every accepted record.

use std::io::{BufRead, Write};

use postmortems_shared::{PostmortemError, Record, Result};
use postmortems_store::SessionIndex;
use tracing::{debug, info};

use crate::validate::{
    UrlEntry, Validation, extract_domain, validate_date, validate_keywords, validate_url,
};

/// Prompt for the URL field.
pub const URL_PROMPT: &str = "URL:  ";
/// Prompt for the keywords field.
pub const KEYWORDS_PROMPT: &str = "Keywords (? lists known):  ";
/// Prompt for the date field.
pub const DATE_PROMPT: &str = "Date (YYYY-MM-DD):  ";

/// Answer at the keywords prompt that lists the known keywords.
const LIST_KEYWORDS: &str = "?";

/// Result of prompting for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted {
    /// All four fields were collected.
    Record(Record),
    /// The user quit at the URL prompt.
    Quit,
}

/// Drives the prompts over an input stream, a prompt/output stream, and a
/// diagnostics stream.
pub struct Collector<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Collector<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Collect records until the user quits.
    ///
    /// Returns the new records in entry order together with the grown index.
    /// Running out of input on any prompt is [`PostmortemError::Aborted`] and
    /// discards everything collected so far.
    pub fn collect_records(
        &mut self,
        mut index: SessionIndex,
    ) -> Result<(Vec<Record>, SessionIndex)> {
        let mut records = Vec::new();

        loop {
            match self.prompt_record(&index)? {
                Prompted::Record(record) => {
                    info!(url = %record.url, domain = %record.domain, "record collected");
                    index = index.with_record(&record);
                    records.push(record);
                }
                Prompted::Quit => break,
            }
        }

        info!(count = records.len(), "session finished");
        Ok((records, index))
    }

    /// Prompt for the fields of one record.
    pub fn prompt_record(&mut self, index: &SessionIndex) -> Result<Prompted> {
        let url = match self.prompt_url(index)? {
            UrlEntry::Quit => return Ok(Prompted::Quit),
            UrlEntry::Url(url) => url,
        };
        let domain = extract_domain(&url);
        let keywords = self.prompt_keywords(index)?;
        let date = self.prompt_date()?;

        Ok(Prompted::Record(Record {
            url,
            domain,
            keywords,
            date,
        }))
    }

    fn prompt_url(&mut self, index: &SessionIndex) -> Result<UrlEntry> {
        loop {
            let answer = self.ask(URL_PROMPT)?;
            match validate_url(&answer, index) {
                Validation::Valid(entry) => return Ok(entry),
                Validation::Blank => continue,
                Validation::Invalid(rejection) => {
                    debug!(%rejection, "url rejected");
                    if let Some(line) = rejection.diagnostic() {
                        writeln!(self.err, "{line}")?;
                    }
                }
            }
        }
    }

    fn prompt_keywords(&mut self, index: &SessionIndex) -> Result<Vec<String>> {
        loop {
            let answer = self.ask(KEYWORDS_PROMPT)?;
            if answer == LIST_KEYWORDS {
                self.list_keywords(index)?;
                continue;
            }
            match validate_keywords(&answer) {
                Validation::Valid(keywords) => return Ok(keywords),
                Validation::Blank => return Ok(Vec::new()),
                Validation::Invalid(rejection) => debug!(%rejection, "keywords rejected"),
            }
        }
    }

    fn prompt_date(&mut self) -> Result<String> {
        loop {
            let answer = self.ask(DATE_PROMPT)?;
            match validate_date(&answer) {
                Validation::Valid(date) => return Ok(date),
                Validation::Blank => continue,
                Validation::Invalid(rejection) => debug!(%rejection, "date rejected"),
            }
        }
    }

    fn list_keywords(&mut self, index: &SessionIndex) -> Result<()> {
        if index.keywords().is_empty() {
            writeln!(self.out, "  (no keywords recorded yet)")?;
        }
        for keyword in index.keywords() {
            writeln!(self.out, "  * {keyword}")?;
        }
        Ok(())
    }

    /// Print `prompt` and read one trimmed line of input.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PostmortemError::Aborted);
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    struct Run {
        result: Result<(Vec<Record>, SessionIndex)>,
        out: String,
        err: String,
    }

    fn run(index: SessionIndex, input: &str) -> Run {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result =
            Collector::new(Cursor::new(input.as_bytes()), &mut out, &mut err).collect_records(index);
        Run {
            result,
            out: String::from_utf8(out).expect("utf8 stdout"),
            err: String::from_utf8(err).expect("utf8 stderr"),
        }
    }

    fn known(url: &str, keywords: &[&str]) -> SessionIndex {
        SessionIndex::default().with_record(&Record {
            url: url.into(),
            domain: extract_domain(url),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            date: "2019-01-01".into(),
        })
    }

    #[test]
    fn single_record_then_quit() {
        let run = run(
            SessionIndex::default(),
            "http://a.example/x\noutage, db\n2021-05-01\nquit\n",
        );
        let (records, index) = run.result.expect("collect");

        assert_eq!(
            records,
            vec![Record {
                url: "http://a.example/x".into(),
                domain: "a.example".into(),
                keywords: vec!["outage".into(), "db".into()],
                date: "2021-05-01".into(),
            }]
        );
        assert!(index.contains_url("http://a.example/x"));
        assert!(index.keywords().contains("db"));
        assert!(run.out.starts_with(URL_PROMPT));
        assert!(run.err.is_empty());
    }

    #[test]
    fn immediate_quit_collects_nothing() {
        let (records, _) = run(SessionIndex::default(), "q\n").result.expect("collect");
        assert!(records.is_empty());
    }

    #[test]
    fn eof_aborts_on_every_prompt() {
        for input in ["", "http://a.example/x\n", "http://a.example/x\nk\n", "http://a.example/x\nk\nnot-a-date\n"] {
            let run = run(SessionIndex::default(), input);
            assert!(
                matches!(run.result, Err(PostmortemError::Aborted)),
                "input {input:?} should abort"
            );
        }
    }

    #[test]
    fn eof_after_complete_record_discards_it() {
        let run = run(SessionIndex::default(), "http://a.example/x\nk\n2021-05-01\n");
        assert!(matches!(run.result, Err(PostmortemError::Aborted)));
    }

    #[test]
    fn duplicates_are_reported_and_reprompted() {
        let index = known("https://a.example/post", &[]);
        let run = run(
            index,
            "https://a.example/post\nhttps://a.example/post/more\n\nhttps://b.example/new\n\n2020-02-30\nq\n",
        );
        let (records, _) = run.result.expect("collect");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://b.example/new");
        assert!(records[0].keywords.is_empty());
        assert_eq!(records[0].date, "2020-02-30");

        let diagnostics: Vec<&str> = run.err.lines().collect();
        assert_eq!(diagnostics.len(), 2, "stderr was {:?}", run.err);
        assert_eq!(run.out.matches(URL_PROMPT).count(), 5);
    }

    #[test]
    fn urls_entered_this_session_become_known() {
        let run = run(
            SessionIndex::default(),
            "http://a.example/x\n\n2021-05-01\nhttp://a.example/x/\nhttp://a.example/x\nhttp://a.example/y\n\n2021-05-02\nquit\n",
        );
        let (records, index) = run.result.expect("collect");

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["http://a.example/x", "http://a.example/y"]);
        assert_eq!(index.url_count(), 2);
        assert_eq!(run.err.lines().count(), 2);
    }

    #[test]
    fn question_mark_lists_keywords_without_consuming() {
        let index = known("https://a.example/1", &["zeta", "alpha"]);
        let run = run(index, "https://b.example/2\n?\nnew\n2021-01-01\nq\n");
        let (records, _) = run.result.expect("collect");

        assert_eq!(records[0].keywords, vec!["new".to_string()]);
        assert!(run.out.contains("  * alpha\n  * zeta\n"));
        assert_eq!(run.out.matches(KEYWORDS_PROMPT).count(), 2);
    }

    #[test]
    fn invalid_dates_reprompt_silently() {
        let run = run(
            SessionIndex::default(),
            "x.example/a\n\n1949-01-01\n2020-13-01\n2020-12-01\nq\n",
        );
        let (records, _) = run.result.expect("collect");

        assert_eq!(records[0].date, "2020-12-01");
        assert_eq!(records[0].domain, "x.example");
        assert_eq!(run.out.matches(DATE_PROMPT).count(), 3);
        assert!(run.err.is_empty());
    }
}
