//! Entry parser for the `updated-dependencies` list
//!
//! Handles entries of the form:
//! - `- dependency-name: <value>` opening an entry
//! - indented `<key>: <value>` continuation lines belonging to it
//!
//! Entries missing any of the three recognized keys are dropped.

use crate::domain::UpdatedDependency;
use regex::Regex;
use std::sync::LazyLock;

/// Top-level key introducing the dependency list
const UPDATED_DEPENDENCIES_KEY: &str = "updated-dependencies";

const DEPENDENCY_NAME_KEY: &str = "dependency-name";
const DEPENDENCY_TYPE_KEY: &str = "dependency-type";
const UPDATE_TYPE_KEY: &str = "update-type";

// Mapping line: `  key: value`
static KEY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)(?P<key>[A-Za-z0-9_.-]+):(?P<value>(?:[ \t].*)?)$").unwrap()
});

// List item line: `- key: value`
static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)-[ \t]+(?P<key>[A-Za-z0-9_.-]+):(?P<value>(?:[ \t].*)?)$")
        .unwrap()
});

/// A list entry whose fields are still being collected
#[derive(Debug, Default)]
struct PendingEntry {
    /// Indentation of the list marker line
    indent: usize,
    /// Indentation of the entry's own fields, fixed by the first one seen
    field_indent: Option<usize>,
    name: Option<String>,
    dependency_type: Option<String>,
    update_type: Option<String>,
}

impl PendingEntry {
    fn new(indent: usize) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }

    /// Records a continuation line at `indent`
    ///
    /// Lines deeper than the entry's fields belong to nested values and are
    /// skipped.
    fn continue_with(&mut self, indent: usize, key: &str, value: &str) {
        if indent <= self.indent {
            return;
        }
        let field_indent = *self.field_indent.get_or_insert(indent);
        if indent <= field_indent {
            self.set(key, value);
        }
    }

    /// Records a field; unrecognized keys are ignored
    fn set(&mut self, key: &str, value: &str) {
        let value = clean_value(value);
        match key {
            DEPENDENCY_NAME_KEY => self.name = Some(value),
            DEPENDENCY_TYPE_KEY => self.dependency_type = Some(value),
            UPDATE_TYPE_KEY => self.update_type = Some(value),
            _ => {}
        }
    }

    fn finish(self) -> Option<UpdatedDependency> {
        let name = self.name.clone();
        let record =
            UpdatedDependency::from_parts(self.name, self.dependency_type, self.update_type);
        if record.is_none() {
            log::debug!(
                "dropping incomplete dependency entry {}",
                name.as_deref().unwrap_or("<unnamed>")
            );
        }
        record
    }
}

/// Trims a value and removes one pair of matching surrounding quotes
fn clean_value(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

/// Returns true if the line is the top-level `updated-dependencies:` key
fn is_list_key(line: &str) -> bool {
    KEY_LINE_RE.captures(line).is_some_and(|caps| {
        caps["indent"].is_empty()
            && &caps["key"] == UPDATED_DEPENDENCIES_KEY
            && caps["value"].trim().is_empty()
    })
}

/// Parses the dependency entries listed under `updated-dependencies:`
///
/// Returns an empty set when the key is absent or no entry is complete.
/// Records keep the order in which they are declared.
pub fn parse_entries(block: &str) -> Vec<UpdatedDependency> {
    let mut lines = block.lines();
    if !lines.by_ref().any(is_list_key) {
        return Vec::new();
    }

    let mut records = Vec::new();
    let mut current: Option<PendingEntry> = None;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = LIST_ITEM_RE.captures(line) {
            let indent = caps["indent"].len();
            if current.as_ref().is_some_and(|entry| indent > entry.indent) {
                // Nested list inside the current entry
                continue;
            }
            if let Some(record) = current.take().and_then(PendingEntry::finish) {
                records.push(record);
            }
            let mut entry = PendingEntry::new(indent);
            entry.set(&caps["key"], &caps["value"]);
            current = Some(entry);
            continue;
        }

        let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
        if indent == 0 {
            // Next top-level key ends the list
            break;
        }

        if let (Some(entry), Some(caps)) = (current.as_mut(), KEY_LINE_RE.captures(line)) {
            entry.continue_with(indent, &caps["key"], &caps["value"]);
        }
    }

    if let Some(record) = current.and_then(PendingEntry::finish) {
        records.push(record);
    }

    records
}
