//! Line normalization: turning raw sketch lines into structured records.
//!
//! Each line passes through a fixed-order pipeline: line-ending and
//! path-separator normalization, copy-paste repairs, indent measurement,
//! comment stripping, then the decorative stripping chain that yields the
//! entry name. The pipeline is total; malformed lines degrade, they never
//! fail. Blank lines and lines that clean down to an empty name are
//! dropped and do not affect their neighbours.

use regex::Regex;
use tracing::{instrument, trace};

use crate::domain::entities::NormalizedLine;

/// Comment markers. Each requires the preceding space so names like
/// `page#1.js` or `proto//stub` survive.
const COMMENT_MARKERS: [&str; 3] = [" #", " <--", " //"];

/// Connector glyphs that mark a line as carrying its own tree prefix.
const PREFIX_GLYPHS: [char; 4] = ['│', '├', '└', '|'];

/// Normalizes raw sketch text into an ordered sequence of line records.
pub struct LineNormalizer {
    prefix: Regex,
    marker_drift: Regex,
    emoji_leading: Regex,
    emoji_trailing: Regex,
    parenthetical: Regex,
}

impl Default for LineNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineNormalizer {
    pub fn new() -> Self {
        // Emoji-like: pictographs plus the variation selector and ZWJ that
        // glue multi-codepoint emoji together. Deliberately not \p{Emoji},
        // which also matches ASCII digits, '#' and '*'.
        let emoji = r"[\p{Extended_Pictographic}\x{FE0F}\x{200D}]";
        Self {
            prefix: Regex::new(r"^[\s│├└─•*|+>-]+").unwrap(),
            // One to three leading spaces before a strong connector are
            // copy drift; four or more are a real alignment cell.
            marker_drift: Regex::new(r"^( {1,3})(?:├─|└─|\|--|\+--)").unwrap(),
            emoji_leading: Regex::new(&format!(r"^{emoji}+\s*")).unwrap(),
            emoji_trailing: Regex::new(&format!(r"\s+{emoji}+$")).unwrap(),
            parenthetical: Regex::new(r"\s+\([^)]*\)$").unwrap(),
        }
    }

    /// Convert raw multi-line text into normalized line records.
    #[instrument(level = "debug", skip(self, input))]
    pub fn normalize(&self, input: &str) -> Vec<NormalizedLine> {
        // Evidence for the dangling-root repair: some line carries a
        // connector glyph at column zero, so a first line without one
        // lost its glyph to copy-paste truncation.
        let has_prefixed_sibling = input.lines().any(|l| l.starts_with(&PREFIX_GLYPHS[..]));

        let mut lines = Vec::new();
        let mut at_first_content = true;
        for raw in input.split('\n') {
            let line = raw.replace('\r', "");
            if line.is_empty() {
                continue;
            }
            let mut line = line.replace('\\', "/");
            if at_first_content && !line.trim().is_empty() {
                at_first_content = false;
                if has_prefixed_sibling {
                    if let Some(repaired) = repair_dangling_root(&line) {
                        trace!(line = %line, "repaired dangling first connector");
                        line = repaired;
                    }
                }
            }
            let line = self.repair_marker_drift(line);
            let indent = self.measure_indent(&line);
            let truncated = strip_comment(&line);
            let (name, explicit_folder) = self.clean_name(truncated);
            if name.is_empty() {
                trace!(line = %line, "dropping line with no name");
                continue;
            }
            lines.push(NormalizedLine {
                raw: line,
                indent,
                name,
                explicit_folder,
            });
        }
        lines
    }

    /// Strip sub-cell space drift before a strong connector marker.
    fn repair_marker_drift(&self, line: String) -> String {
        match self.marker_drift.captures(&line).and_then(|c| c.get(1)) {
            Some(ws) => line[ws.end()..].to_string(),
            None => line,
        }
    }

    /// Length in characters of the leading structural run: whitespace,
    /// box-drawing glyphs, bullets, and the ASCII substitutes `* | - + >`.
    fn measure_indent(&self, line: &str) -> usize {
        self.prefix
            .find(line)
            .map(|m| m.as_str().chars().count())
            .unwrap_or(0)
    }

    /// The decorative stripping chain. Returns the cleaned name and the
    /// explicit-folder flag, read off the trailing separator after suffix
    /// decorations are gone but before the separator itself is removed.
    fn clean_name(&self, truncated: &str) -> (String, bool) {
        let stripped = self.prefix.replace(truncated, "");
        let stripped = self.emoji_leading.replace(&stripped, "");
        let stripped = self.emoji_trailing.replace(&stripped, "");
        let stripped = self.parenthetical.replace(&stripped, "");
        // A parenthetical can expose a second emoji run.
        let stripped = self.emoji_trailing.replace(&stripped, "");
        let trimmed = stripped.trim();
        let explicit_folder = trimmed.ends_with('/');
        let name = trimmed
            .strip_suffix('/')
            .unwrap_or(trimmed)
            .trim_end()
            .to_string();
        (name, explicit_folder)
    }
}

/// Truncate at the earliest comment marker, if any.
fn strip_comment(line: &str) -> &str {
    let cut = COMMENT_MARKERS
        .iter()
        .filter_map(|marker| line.find(marker))
        .min();
    match cut {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Re-insert the connector glyph a copy-paste truncation chopped off the
/// first line, so its prefix length lines up with its siblings'.
fn repair_dangling_root(line: &str) -> Option<String> {
    let content = line.trim_start();
    let ws_len = line.len() - content.len();
    let glyph = if content.starts_with("──") {
        "├"
    } else if content.starts_with("--") {
        "|"
    } else {
        return None;
    };
    Some(format!("{}{}{}", &line[..ws_len], glyph, content))
}
