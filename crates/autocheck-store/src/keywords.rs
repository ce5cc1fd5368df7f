//! Keyword list processing and the two named lists.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Split `text` into keywords: one per line, trimmed, blank lines dropped,
/// case-insensitive duplicates removed keeping the first occurrence.
pub fn process_keywords(text: &str) -> Vec<String> {
    dedup_keywords(text.split('\n').map(str::to_string))
}

fn dedup_keywords(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .filter(|keyword| seen.insert(keyword.to_lowercase()))
        .collect()
}

/// Names of the stored keyword lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Packages,
    Vods,
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::Packages, ListKind::Vods];

    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Packages => "packages",
            ListKind::Vods => "vods",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "packages" => Ok(ListKind::Packages),
            "vods" => Ok(ListKind::Vods),
            other => Err(StoreError::UnknownList(other.to_string())),
        }
    }
}

/// The stored keyword lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLists {
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub vods: Vec<String>,
}

impl KeywordLists {
    pub fn get(&self, kind: ListKind) -> &[String] {
        match kind {
            ListKind::Packages => &self.packages,
            ListKind::Vods => &self.vods,
        }
    }

    fn get_mut(&mut self, kind: ListKind) -> &mut Vec<String> {
        match kind {
            ListKind::Packages => &mut self.packages,
            ListKind::Vods => &mut self.vods,
        }
    }

    /// Replace one list with the keywords processed from `text`.
    pub fn set(&mut self, kind: ListKind, text: &str) {
        *self.get_mut(kind) = process_keywords(text);
    }

    /// Append keywords to one list, skipping blanks and duplicates.
    pub fn add<I, S>(&mut self, kind: ListKind, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.get_mut(kind);
        let merged = list
            .drain(..)
            .chain(keywords.into_iter().map(Into::into))
            .collect::<Vec<_>>();
        *list = dedup_keywords(merged);
    }

    /// Re-apply keyword processing to both lists.
    pub fn normalized(&self) -> Self {
        Self {
            packages: dedup_keywords(self.packages.iter().cloned()),
            vods: dedup_keywords(self.vods.iter().cloned()),
        }
    }

    /// Packages followed by vods. Duplicates across the two lists are kept.
    pub fn combined(&self) -> Vec<String> {
        self.packages.iter().chain(&self.vods).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.vods.is_empty()
    }
}
