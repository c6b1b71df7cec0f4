//! Metadata block locator
//!
//! Finds the region between a `---` line and the next `...` line:
//!
//! ```text
//! Bumps [coffee-rails](...) from 4.0.1 to 4.2.2.
//! ---
//! updated-dependencies:
//! - dependency-name: coffee-rails
//! ...
//! Signed-off-by: dependabot[bot] <support@github.com>
//! ```

/// Closing marker of a metadata block
const CLOSING_MARKER: &str = "...";

/// Minimum number of dashes in the opening marker
const MIN_OPENING_DASHES: usize = 3;

/// Returns true if the line is a horizontal rule of three or more dashes
fn is_opening_marker(line: &str) -> bool {
    line.len() >= MIN_OPENING_DASHES && line.bytes().all(|b| b == b'-')
}

/// Strips the line terminator (`\n` or `\r\n`)
fn strip_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Locates the metadata block in a commit message
///
/// Returns the content between the first opening marker and the first
/// closing marker after it, without the markers themselves. Returns `None`
/// when either marker is missing.
pub fn locate_block(message: &str) -> Option<&str> {
    let mut offset = 0;
    let mut start = None;

    for line in message.split_inclusive('\n') {
        let bare = strip_eol(line);
        match start {
            None if is_opening_marker(bare) => start = Some(offset + line.len()),
            Some(begin) if bare == CLOSING_MARKER => return Some(&message[begin..offset]),
            _ => {}
        }
        offset += line.len();
    }

    None
}
