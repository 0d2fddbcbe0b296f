//! File-vs-folder classification from the entry name alone.
//!
//! Last-resort heuristic, consulted only when a line carries no explicit
//! folder marker and no deeper-indented successor. Misclassification is
//! documented behavior here, never an error.

use regex::Regex;

/// Extensionless names that are conventionally files.
/// Matched case-sensitively: `Makefile` is a file, `MAKEFILE` is not assumed.
const KNOWN_FILES: [&str; 16] = [
    "LICENSE",
    "licence",
    "README",
    "readme",
    "Dockerfile",
    "dockerfile",
    "Makefile",
    "makefile",
    "Jenkinsfile",
    "Procfile",
    "CNAME",
    ".gitignore",
    ".env",
    ".npmrc",
    ".dockerignore",
    ".editorconfig",
];

/// Classifies entry names as file or folder.
pub struct NameClassifier {
    extension: Regex,
    version_stem: Regex,
}

impl Default for NameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NameClassifier {
    pub fn new() -> Self {
        Self {
            extension: Regex::new(r"\.([A-Za-z0-9]{1,10})$").unwrap(),
            version_stem: Regex::new(r"^[vV]?\d+(?:\.\d+)*$").unwrap(),
        }
    }

    /// True if `name` reads as a filename.
    ///
    /// A trailing `.`-plus-1-to-10-alphanumerics suffix counts as an
    /// extension unless the whole name looks like a version tag: numeric
    /// stem and all-digit suffix (`v1.2`, `1.0`) read as folders, while
    /// `2024.md` or `ls.1` keep reading as files.
    pub fn is_file(&self, name: &str) -> bool {
        if KNOWN_FILES.contains(&name) {
            return true;
        }
        let Some(caps) = self.extension.captures(name) else {
            return false;
        };
        let suffix = match caps.get(1) {
            Some(m) => m.as_str(),
            None => return false,
        };
        let stem = &name[..name.len() - suffix.len() - 1];
        let version_like =
            self.version_stem.is_match(stem) && suffix.chars().all(|c| c.is_ascii_digit());
        !version_like
    }
}
