//! Attribution of shared links to the people who posted them.
//!
//! Input is either a chat export where every message sits on one line shaped
//! as `[timestamp] author: content`, or a JSON chat history whose messages
//! carry an `author`. Lines of any other shape (continuations of multi-line
//! messages, system notices, blank lines) and messages without an author are
//! skipped.

use std::{collections::HashMap, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::SyncError,
    links,
    sources,
    types::{ChatMessage, Contribution, ContributionReport, ContributionTableRow, ParsedMessage},
};

pub const CSV_FILE_NAME: &str = "user_contributions.csv";
pub const DETAILED_FILE_NAME: &str = "detailed_contributions.txt";

const CSV_HEADER: [&str; 2] = ["Username", "Track Count"];
const RULE_WIDTH: usize = 50;

static MESSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]]+)\] ([^:]+): (.+)$").expect("message pattern is a valid regular expression")
});

/// Splits a chat line into its parts, `None` if the line is not a message.
pub fn parse_message(line: &str) -> Option<ParsedMessage> {
    let caps = MESSAGE_PATTERN.captures(line)?;
    let content = caps[3].trim().to_string();

    Some(ParsedMessage {
        timestamp: caps[1].to_string(),
        author: caps[2].trim().to_string(),
        has_link: links::has_link(&content),
        content,
    })
}

/// Accumulates links per author across any number of lines or messages.
#[derive(Debug, Default)]
pub struct ContributionParser {
    contributions: Vec<Contribution>,
    index: HashMap<String, usize>,
}

impl ContributionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chat line; returns the number of links credited from it.
    ///
    /// Blank lines, lines not shaped as `[timestamp] author: content` and
    /// messages without a recognized link credit nothing.
    pub fn add_line(&mut self, line: &str) -> usize {
        if line.trim().is_empty() {
            return 0;
        }

        match parse_message(line) {
            Some(message) if message.has_link => {
                self.add_contribution(&message.author, &message.content)
            }
            _ => 0,
        }
    }

    pub fn add_lines<'a, I>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.add_line(line);
        }
        self
    }

    /// Feeds one message of a chat history; messages without an author
    /// cannot be attributed and credit nothing.
    pub fn add_message(&mut self, message: &ChatMessage) -> usize {
        let Some(author) = message.author.as_deref().map(str::trim) else {
            return 0;
        };

        if author.is_empty() || !links::has_link(&message.body) {
            return 0;
        }

        self.add_contribution(author, &message.body)
    }

    fn add_contribution(&mut self, author: &str, content: &str) -> usize {
        let found: Vec<String> = links::attributable_links(content)
            .into_iter()
            .map(|link| link.raw)
            .collect();

        let idx = match self.index.get(author) {
            Some(idx) => *idx,
            None => {
                self.contributions.push(Contribution::new(author.to_string()));
                self.index
                    .insert(author.to_string(), self.contributions.len() - 1);
                self.contributions.len() - 1
            }
        };

        let count = found.len();
        self.contributions[idx].links.extend(found);
        count
    }

    /// Snapshot of the contributions, highest count first.
    pub fn report(&self) -> ContributionReport {
        let mut contributions = self.contributions.clone();
        // sort_by is stable: equal counts stay in first-seen order
        contributions.sort_by(|a, b| b.count().cmp(&a.count()));
        ContributionReport { contributions }
    }
}

/// Builds a report from chat export lines.
///
/// # Arguments
///
/// * `lines` - Lines shaped as `[timestamp] author: content`; any other
///   line is skipped
///
/// # Returns
///
/// A [`ContributionReport`] sorted by descending link count, equal counts in
/// the order authors first shared a link. Authors without links are absent.
pub fn parse<'a, I>(lines: I) -> ContributionReport
where
    I: IntoIterator<Item = &'a str>,
{
    ContributionParser::new().add_lines(lines).report()
}

/// Builds a report from the messages of a chat history.
pub fn parse_messages(messages: &[ChatMessage]) -> ContributionReport {
    let mut parser = ContributionParser::new();
    for message in messages {
        parser.add_message(message);
    }
    parser.report()
}

/// Builds a report from a chat history file.
///
/// # Arguments
///
/// * `path` - A JSON history (`.json`, array of `{timestamp, author, body}`)
///   or a bracketed text export
///
/// # Errors
///
/// Returns [`SyncError::SourceUnavailable`] when the file cannot be read and
/// [`SyncError::MalformedSource`] for invalid JSON. No partial report is
/// produced in either case.
pub async fn parse_file(path: &Path) -> Result<ContributionReport, SyncError> {
    let messages = sources::load_messages(path).await?;
    Ok(parse_messages(&messages))
}

/// Two column `author,count` summary, highest count first.
///
/// Rows are joined by `\n` with no trailing newline. Author names holding a
/// comma, quote or line break are quoted CSV style.
pub fn render_csv(report: &ContributionReport) -> String {
    let mut rows: Vec<String> = vec![CSV_HEADER.join(",")];
    rows.extend(
        report
            .contributions
            .iter()
            .map(|c| format!("{},{}", csv_field(&c.author), c.count())),
    );
    rows.join("\n")
}

/// Every credited link grouped per author.
pub fn render_detailed(report: &ContributionReport) -> String {
    let mut out = String::from("DETAILED USER CONTRIBUTIONS REPORT\n");
    out.push_str(&"=".repeat(37));
    out.push_str("\n\n");

    for contribution in &report.contributions {
        out.push_str(&format!("USER: {}\n", contribution.author));
        out.push_str(&format!("Total Tracks: {}\n", contribution.count()));
        out.push_str("Track Links:\n");

        for (i, link) in contribution.links.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, link));
        }

        out.push('\n');
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push_str("\n\n");
    }

    out
}

pub fn table_rows(report: &ContributionReport, top: usize) -> Vec<ContributionTableRow> {
    report
        .top(top)
        .iter()
        .enumerate()
        .map(|(i, c)| ContributionTableRow {
            rank: i + 1,
            author: c.author.clone(),
            links: c.count(),
        })
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
