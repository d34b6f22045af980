//! Index of installed man pages.
//!
//! Built once at startup from `apropos .` output. The browser degrades
//! gracefully when the index cannot be built (no man-db, restricted
//! environment): the page list is simply empty.

use std::process::Command;

use tracing::warn;

/// One entry from the system's man page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub name: String,
    pub section: String,
    pub description: String,
}

/// All known man pages, sorted by name.
#[derive(Default)]
pub struct PageIndex {
    entries: Vec<PageEntry>,
}

impl PageIndex {
    /// Query the system index.
    pub fn load() -> Self {
        let output = match Command::new("apropos").arg(".").output() {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                warn!("apropos exited with {}", output.status);
                return Self::default();
            }
            Err(e) => {
                warn!("could not run apropos: {}", e);
                return Self::default();
            }
        };

        let text = String::from_utf8_lossy(&output.stdout);
        Self::from_entries(text.lines().filter_map(parse_line).collect())
    }

    /// Build an index from already-parsed entries.
    pub fn from_entries(mut entries: Vec<PageEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.section.cmp(&b.section)));
        Self { entries }
    }

    pub fn get(&self, idx: usize) -> Option<&PageEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter()
    }
}

/// Parse one `apropos` line: `name (section) - description`.
fn parse_line(line: &str) -> Option<PageEntry> {
    let open = line.find('(')?;
    let close = line[open..].find(')')? + open;
    let name = line[..open].trim();
    let section = line[open + 1..close].trim();
    if name.is_empty() || section.is_empty() {
        return None;
    }
    let description = line[close + 1..]
        .trim_start()
        .trim_start_matches('-')
        .trim()
        .to_string();
    Some(PageEntry {
        name: name.to_string(),
        section: section.to_string(),
        description,
    })
}
