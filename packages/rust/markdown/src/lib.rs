//! Line-by-line report renderer.
//!
//! Converts a report's Markdown-like text into typed display blocks by
//! inspecting each line's first non-space character. This is a best-effort,
//! deliberately narrow subset: no nested lists, no emphasis, no links, no
//! code blocks. Callers that need a real Markdown parser should bring one
//! instead of growing this rule table.

use serde::Serialize;
use tracing::trace;

// ---------------------------------------------------------------------------
// DisplayBlock
// ---------------------------------------------------------------------------

/// One rendered line of a report.
///
/// Ordering matches input line order; blocks are recomputed on every render
/// and carry no state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "text")]
pub enum DisplayBlock {
    /// A line whose first non-space character is `#`. Text has every `#`
    /// removed and surrounding whitespace trimmed.
    Heading(String),
    /// A line whose first non-space character is `*`. Text has the first
    /// `*` occurrence removed and surrounding whitespace trimmed.
    BulletItem(String),
    /// Any other line, kept raw. Empty lines land here too.
    Paragraph(String),
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Render report text into display blocks, one per line.
///
/// Pure function of the input: re-rendering identical text yields an
/// identical sequence. The iterator is lazy and restartable by calling
/// `render` again.
pub fn render(text: &str) -> impl Iterator<Item = DisplayBlock> + '_ {
    text.split('\n').map(classify_line)
}

/// Classify a single line by its first non-space character.
fn classify_line(line: &str) -> DisplayBlock {
    let block = match line.trim_start().chars().next() {
        Some('#') => {
            let text: String = line.chars().filter(|c| *c != '#').collect();
            DisplayBlock::Heading(text.trim().to_string())
        }
        Some('*') => {
            let text = line.replacen('*', "", 1);
            DisplayBlock::BulletItem(text.trim().to_string())
        }
        _ => DisplayBlock::Paragraph(line.to_string()),
    };
    trace!(?block, "classified line");
    block
}
