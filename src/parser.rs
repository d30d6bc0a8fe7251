use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{IndexSpec, Segment, Selector},
    error::PathError,
    lexer::{Lexer, RawSegment},
};

static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("index pattern is valid"));

static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?[0-9]+)?:(-?[0-9]+)?$").expect("range pattern is valid"));

/// A single comma separated entry of a bracket segment.
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Key(String),
    Index(IndexSpec),
}

/// Turns raw segments from the [`Lexer`] into structured [`Segment`]s.
pub struct Parser<'a> {
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser { source }
    }

    /// Lexes and parses the whole path.
    pub fn parse(source: &'a str) -> Result<Vec<Segment>, PathError> {
        let parser = Parser::new(source);
        Lexer::new(source)
            .tokenize()?
            .into_iter()
            .map(|raw| parser.parse_segment(raw))
            .collect()
    }

    fn error(&self, message: &str) -> PathError {
        PathError::invalid(message, self.source)
    }

    pub fn parse_segment(&self, raw: RawSegment) -> Result<Segment, PathError> {
        if !raw.bracketed {
            let selector = if raw.text == "*" {
                Selector::Wildcard
            } else {
                Selector::Keys(vec![raw.text.clone()])
            };
            return Ok(Segment::new(raw.text, selector, raw.recursive));
        }

        let parts = self.split_entries(&raw.text);
        if parts.len() == 1 && parts[0] == "*" {
            return Ok(Segment::new(format!("[{}]", raw.text), Selector::Wildcard, raw.recursive));
        }

        let mut keys = Vec::new();
        let mut indexes = Vec::new();
        for part in &parts {
            match self.parse_entry(part)? {
                Entry::Key(key) => keys.push(key),
                Entry::Index(spec) => indexes.push(spec),
            }
        }

        let selector = match (keys.is_empty(), indexes.is_empty()) {
            (false, true) => Selector::Keys(keys),
            (true, false) => Selector::Indexes(indexes),
            _ => {
                return Err(self.error(
                    "cannot specify both array indexes and map keys in a multi-select",
                ));
            }
        };
        Ok(Segment::new(format!("[{}]", raw.text), selector, raw.recursive))
    }

    /// Splits bracket contents on commas that are not inside quotes, trimming
    /// each entry.
    fn split_entries<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut parts = Vec::new();
        let mut quote: Option<char> = None;
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (offset, ch) = chars[i];
            match quote {
                Some(q) => {
                    if ch == '\\' && chars.get(i + 1).map(|(_, c)| *c) == Some(q) {
                        i += 1;
                    } else if ch == q {
                        quote = None;
                    }
                }
                None => match ch {
                    '\'' | '"' => quote = Some(ch),
                    ',' => {
                        parts.push(text[start..offset].trim());
                        start = offset + 1;
                    }
                    _ => {}
                },
            }
            i += 1;
        }
        parts.push(text[start..].trim());
        parts
    }

    fn parse_entry(&self, entry: &str) -> Result<Entry, PathError> {
        if entry.is_empty() {
            return Err(self.error("empty path segment"));
        }

        if let Some(q) = entry.chars().next().filter(|c| *c == '\'' || *c == '"') {
            return self.parse_quoted(entry, q).map(Entry::Key);
        }

        if INDEX_PATTERN.is_match(entry) {
            let index = entry.parse::<i64>().map_err(|_| self.error("invalid index"))?;
            return Ok(Entry::Index(IndexSpec::Index(index)));
        }

        if let Some(caps) = RANGE_PATTERN.captures(entry) {
            let bound = |i: usize| -> Result<Option<i64>, PathError> {
                caps.get(i)
                    .map(|m| m.as_str().parse::<i64>().map_err(|_| self.error("invalid index")))
                    .transpose()
            };
            let (start, end) = (bound(1)?, bound(2)?);
            if let (Some(s), Some(e)) = (start, end)
                && s == e
            {
                return Err(self.error("invalid index range"));
            }
            return Ok(Entry::Index(IndexSpec::Range { start, end }));
        }

        Ok(Entry::Key(entry.to_string()))
    }

    /// Unquotes `'...'` / `"..."`, turning `\q` into `q` for the active quote.
    fn parse_quoted(&self, entry: &str, q: char) -> Result<String, PathError> {
        let mut key = String::new();
        let mut chars = entry.chars().skip(1).peekable();

        while let Some(ch) = chars.next() {
            if ch == '\\' && chars.peek() == Some(&q) {
                key.push(q);
                chars.next();
            } else if ch == q {
                if chars.next().is_some() {
                    return Err(self.error("unexpected characters after closing quote"));
                }
                return Ok(key);
            } else {
                key.push(ch);
            }
        }

        Err(self.error("missing closing quote"))
    }
}
