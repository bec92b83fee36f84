//! Phrase-weight spam scoring on top of `ChainedHashMap`.
//!
//! A database is a file of `phrase,weight` records, one per line. Phrases
//! are folded to ASCII uppercase; weights are non-negative integers. A message
//! is scored by summing, for every line and every phrase, the phrase's weight
//! once per occurrence (overlapping occurrences included).
//!
//! Both inputs are handled as raw bytes. Only ASCII letters are case folded,
//! and any other byte must match exactly.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::TableConfig;
use crate::error::TableError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Phrase to weight table produced by [`load_database`].
pub type Database = ChainedHashMap<Vec<u8>, u64>;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed database record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: &'static str },
    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T, E = DetectorError> = std::result::Result<T, E>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    Spam,
    NotSpam,
}

impl Verdict {
    /// The line the command-line tool prints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Spam => "SPAM",
            Verdict::NotSpam => "NOT_SPAM",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Whitespace as C `isspace` sees it in the "C" locale.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

// Integer syntax of C `stoi`: leading whitespace is skipped, then an optional
// sign and digits that must run to the end of the field and fit in an `i32`.
fn parse_weight(field: &[u8]) -> Option<i32> {
    let start = field
        .iter()
        .position(|&b| !is_c_space(b))
        .unwrap_or(field.len());
    std::str::from_utf8(&field[start..]).ok()?.parse().ok()
}

fn parse_record(line: &[u8], line_no: usize) -> Result<(Vec<u8>, u64)> {
    let malformed = |reason| DetectorError::MalformedRecord {
        line: line_no,
        reason,
    };
    let comma = line
        .iter()
        .position(|&b| b == b',')
        .ok_or_else(|| malformed("missing ','"))?;
    let (phrase, weight) = (&line[..comma], &line[comma + 1..]);
    if phrase.is_empty() {
        return Err(malformed("empty phrase"));
    }
    if weight.is_empty() {
        return Err(malformed("empty weight"));
    }
    let weight =
        parse_weight(weight).ok_or_else(|| malformed("weight is not a 32-bit integer"))?;
    let weight = u64::try_from(weight).map_err(|_| malformed("negative weight"))?;
    Ok((phrase.to_ascii_uppercase(), weight))
}

/// Feeds every line of `reader` to `f` with its 1-based number. The `\n` or
/// `\r\n` terminator is stripped; the bytes are otherwise untouched.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &mut Vec<u8>) -> Result<()>,
{
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        line_no += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        f(line_no, &mut buf)?;
    }
}

/// Reads `phrase,weight` records into a fresh table.
///
/// The whole load fails on the first malformed record: a line without a
/// comma (this includes blank lines, which would otherwise splice a newline
/// into the next phrase), an empty phrase, or a weight that is empty,
/// negative, out of `i32` range, or not an integer. A phrase seen twice
/// keeps its first weight.
pub fn load_database<R: BufRead>(reader: R) -> Result<Database> {
    let mut db = Database::with_config(TableConfig::default())?;
    for_each_line(reader, |line_no, line| {
        let (phrase, weight) = parse_record(line, line_no)?;
        if !db.insert(phrase, weight) {
            warn!("line {line_no}: duplicate phrase ignored");
        }
        Ok(())
    })?;
    debug!("loaded {} phrases into {} buckets", db.len(), db.capacity());
    Ok(db)
}

pub fn load_database_file<P: AsRef<Path>>(path: P) -> Result<Database> {
    let file = File::open(path.as_ref())?;
    info!("loading phrase database from {}", path.as_ref().display());
    load_database(BufReader::new(file))
}

/// Occurrences of `needle` in `haystack`, overlapping ones included.
fn count_overlapping(haystack: &[u8], needle: &[u8]) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count() as u64
}

/// Sums weighted phrase hits over every line of `reader`. Lines are folded to
/// ASCII uppercase before matching.
pub fn score<R: BufRead>(reader: R, db: &Database) -> Result<u64> {
    let mut total: u64 = 0;
    for_each_line(reader, |_, line| {
        line.make_ascii_uppercase();
        for (phrase, weight) in db {
            let hits = count_overlapping(line.as_slice(), phrase);
            if hits > 0 {
                debug!(
                    "{hits} x {:?} (weight {weight})",
                    String::from_utf8_lossy(phrase)
                );
            }
            total = total.saturating_add(hits.saturating_mul(*weight));
        }
        Ok(())
    })?;
    Ok(total)
}

pub fn score_file<P: AsRef<Path>>(path: P, db: &Database) -> Result<u64> {
    let file = File::open(path.as_ref())?;
    score(BufReader::new(file), db)
}

/// `Spam` once the score reaches `threshold`.
pub fn classify(score: u64, threshold: u64) -> Verdict {
    if score >= threshold {
        Verdict::Spam
    } else {
        Verdict::NotSpam
    }
}
