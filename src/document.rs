//! Typed model of an index file.
//!
//! An index file is a small markdown document:
//!
//! ```text
//! # src
//!
//! Describe the role of this folder.
//!
//! ## Key Files
//! - `util.py`: Utility helpers for string formatting.
//! - `main.py`: Program entry point.
//! ```
//!
//! [`IndexDocument`] parses such a file into typed lines (free text, the
//! section header, and entries) and renders it back. Lines that are not
//! touched by an edit render byte-for-byte as they were read, so hand-written
//! prose around the entry list survives every update.
//!
//! Entries are matched by exact file name. A summary that happens to mention
//! another file in backticks never makes its line look like that file's entry.

use std::fmt;

/// One `` - `name`: summary `` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub summary: String,
}

impl Entry {
    /// Build an entry, keeping only the first line of `summary`.
    pub fn new(name: impl Into<String>, summary: &str) -> Self {
        let summary = summary.lines().next().unwrap_or_default().trim().to_string();
        Self {
            name: name.into(),
            summary,
        }
    }

    /// Parse an entry line. Leading and trailing whitespace is ignored.
    ///
    /// The name runs up to the first `` `: `` so it may itself contain
    /// backticks. A line without the `:` separator still counts as an entry
    /// for the name up to the next backtick; its remainder becomes the summary.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix("- `")?;
        let end = rest.find("`:").or_else(|| rest.find('`'))?;
        let name = &rest[..end];
        if name.is_empty() {
            return None;
        }
        let tail = &rest[end + 1..];
        let summary = match tail.strip_prefix(':') {
            Some(summary) => summary.trim(),
            None => tail.trim(),
        };
        Some(Self {
            name: name.to_string(),
            summary: summary.to_string(),
        })
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- `{}`: {}", self.name, self.summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Text(String),
    Header(String),
    /// `raw` is the line as read; freshly written entries use the canonical form.
    Entry { entry: Entry, raw: String },
}

impl Line {
    fn entry(entry: Entry) -> Self {
        let raw = entry.to_string();
        Line::Entry { entry, raw }
    }

    fn as_str(&self) -> &str {
        match self {
            Line::Text(text) | Line::Header(text) => text,
            Line::Entry { raw, .. } => raw,
        }
    }

    fn is_entry_for(&self, name: &str) -> bool {
        matches!(self, Line::Entry { entry, .. } if entry.name == name)
    }
}

/// What [`IndexDocument::upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The document already held exactly this entry.
    Unchanged,
    /// An existing entry for the name was rewritten in place.
    Replaced,
    /// The entry was inserted right after the section header.
    Inserted,
    /// The section header was missing; header and entry were appended.
    Appended,
}

/// A parsed index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    lines: Vec<Line>,
    section_header: String,
    trailing_newline: bool,
}

impl IndexDocument {
    /// Parse `content`, recognising `section_header` as the entry list heading.
    pub fn parse(content: &str, section_header: &str) -> Self {
        let header = section_header.trim();
        let lines = content
            .lines()
            .map(|line| {
                if line.trim() == header {
                    Line::Header(line.to_string())
                } else if let Some(entry) = Entry::parse(line) {
                    Line::Entry {
                        entry,
                        raw: line.to_string(),
                    }
                } else {
                    Line::Text(line.to_string())
                }
            })
            .collect();

        Self {
            lines,
            section_header: header.to_string(),
            trailing_newline: content.ends_with('\n'),
        }
    }

    /// A fresh document with a title, a description and an empty entry list.
    pub fn new(title: &str, description: &str, section_header: &str) -> Self {
        let header = section_header.trim();
        Self {
            lines: vec![
                Line::Text(format!("# {}", title)),
                Line::Text(String::new()),
                Line::Text(description.to_string()),
                Line::Text(String::new()),
                Line::Header(header.to_string()),
            ],
            section_header: header.to_string(),
            trailing_newline: true,
        }
    }

    /// Text of the first `#` heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Text(text) if text.trim_start().starts_with('#') => {
                Some(text.trim_start().trim_start_matches('#').trim())
            }
            _ => None,
        })
    }

    pub fn has_section(&self) -> bool {
        self.lines.iter().any(|line| matches!(line, Line::Header(_)))
    }

    /// Entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry { entry, .. } => Some(entry),
            _ => None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries().find(|entry| entry.name == name)
    }

    /// Insert or replace the entry for `entry.name`.
    ///
    /// An existing entry is rewritten where it stands and any later
    /// duplicates of the same name are dropped. A new entry goes directly
    /// under the section header, so the list reads newest-first.
    pub fn upsert(&mut self, entry: Entry) -> Upsert {
        let positions: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_entry_for(&entry.name))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(&first) = positions.first() {
            let replacement = Line::entry(entry);
            if positions.len() == 1 && self.lines[first] == replacement {
                return Upsert::Unchanged;
            }
            for &idx in positions[1..].iter().rev() {
                self.lines.remove(idx);
            }
            self.lines[first] = replacement;
            return Upsert::Replaced;
        }

        match self
            .lines
            .iter()
            .position(|line| matches!(line, Line::Header(_)))
        {
            Some(header) => {
                self.lines.insert(header + 1, Line::entry(entry));
                Upsert::Inserted
            }
            None => {
                if self
                    .lines
                    .last()
                    .is_some_and(|line| !line.as_str().trim().is_empty())
                {
                    self.lines.push(Line::Text(String::new()));
                }
                self.lines.push(Line::Header(self.section_header.clone()));
                self.lines.push(Line::entry(entry));
                self.trailing_newline = true;
                Upsert::Appended
            }
        }
    }

    /// Drop every entry for `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !line.is_entry_for(name));
        before - self.lines.len()
    }

    /// Render the document back to text.
    pub fn render(&self) -> String {
        let mut out = self
            .lines
            .iter()
            .map(Line::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for IndexDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
