//! Bookmark model and persistence.
//!
//! Bookmarks are stored as a flat TOML list at
//! `~/.manmark/bookmarks.toml`:
//!
//! ```toml
//! [[bookmark]]
//! page = "ls"
//! section = "1"
//! line = "42"
//!
//! [[bookmark]]
//! page = "printf"
//! section = "3"
//! ```
//!
//! A missing or unreadable file yields an empty store; saving is
//! explicit and happens whenever the set changes.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One saved man page position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub page: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Last line the user jumped to, as shown by the pager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl Bookmark {
    /// Display label, e.g. `ls(1):42`.
    pub fn label(&self) -> String {
        let mut label = self.page.clone();
        if let Some(ref section) = self.section {
            label.push_str(&format!("({})", section));
        }
        if let Some(ref line) = self.line {
            label.push_str(&format!(":{}", line));
        }
        label
    }
}

/// On-disk file shape: a list of `[[bookmark]]` tables.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BookmarkFile {
    #[serde(default, rename = "bookmark")]
    bookmarks: Vec<Bookmark>,
}

/// The loaded bookmark set plus the path it persists to.
#[derive(Default)]
pub struct BookmarkStore {
    entries: Vec<Bookmark>,
    path: Option<PathBuf>,
}

impl BookmarkStore {
    /// Load from `path`. Missing files are a normal first run; corrupt
    /// files are reported and treated as empty rather than clobbering
    /// the session.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<BookmarkFile>(&content) {
                Ok(file) => file.bookmarks,
                Err(e) => {
                    warn!("ignoring malformed bookmark file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            entries,
            path: Some(path),
        }
    }

    /// Write the current set back to disk.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = BookmarkFile {
            bookmarks: self.entries.clone(),
        };
        let content = toml::to_string_pretty(&file).context("serializing bookmarks")?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Add a bookmark, or refresh the stored line when the same page
    /// and section are already bookmarked.
    pub fn add(&mut self, bookmark: Bookmark) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|b| b.page == bookmark.page && b.section == bookmark.section)
        {
            existing.line = bookmark.line;
        } else {
            self.entries.push(bookmark);
        }
    }

    pub fn remove(&mut self, idx: usize) -> Option<Bookmark> {
        if idx < self.entries.len() {
            Some(self.entries.remove(idx))
        } else {
            None
        }
    }

    pub fn get(&self, idx: usize) -> Option<&Bookmark> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter()
    }
}
