//! Filesystem materialization of parsed trees.
//!
//! Walks the node hierarchy and creates directories and empty placeholder
//! files under a destination root. Supports dry-run simulation, a
//! skip-or-overwrite policy for existing files, optional collapsing of a
//! single top-level folder into the destination, and a traversal guard
//! that refuses any target resolving outside the destination.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::application::error::ApplicationError;
use crate::application::ApplicationResult;
use crate::domain::{NodeKind, TreeNode};

/// Policy for files that already exist at their target path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnExists {
    /// Leave the existing file untouched.
    #[default]
    Skip,
    /// Truncate the existing file to an empty placeholder.
    Overwrite,
}

#[derive(Debug, Clone, Default)]
pub struct MaterializeOptions {
    /// Perform every check and count, but write nothing.
    pub dry_run: bool,
    pub on_exists: OnExists,
    /// When the tree has exactly one top-level folder, create its children
    /// directly in the destination instead of the folder itself.
    pub collapse_root: bool,
}

/// What a materialization run did (or, under dry-run, would do).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub dirs_created: usize,
    pub files_created: usize,
    /// Existing files left untouched under the skip policy.
    pub skipped: Vec<PathBuf>,
    /// Node names whose target escaped the destination root.
    pub unsafe_paths: Vec<String>,
}

/// Writes a parsed tree to disk.
pub struct Materializer {
    dest: PathBuf,
    options: MaterializeOptions,
}

impl Materializer {
    pub fn new(dest: impl Into<PathBuf>, options: MaterializeOptions) -> Self {
        let dest = lexical_normalize(&dest.into());
        let dest = if dest.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dest
        };
        Self { dest, options }
    }

    /// Create the hierarchy under the destination root.
    ///
    /// Escaping targets and skipped files are recorded in the report, not
    /// raised; only genuine I/O failures error.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn materialize(&self, nodes: &[TreeNode]) -> ApplicationResult<MaterializeReport> {
        let mut report = MaterializeReport::default();
        if nodes.is_empty() {
            return Ok(report);
        }

        if !self.options.dry_run {
            fs::create_dir_all(&self.dest).map_err(|e| ApplicationError::CreateFailed {
                path: self.dest.clone(),
                source: e,
            })?;
        }

        let top_level: &[TreeNode] = match nodes {
            [root] if root.is_folder() && self.options.collapse_root => &root.children,
            _ => nodes,
        };

        let mut stack: Vec<(PathBuf, &TreeNode)> = Vec::new();
        for node in top_level.iter().rev() {
            stack.push((self.dest.clone(), node));
        }

        while let Some((dir, node)) = stack.pop() {
            let target = lexical_normalize(&dir.join(&node.name));
            if !self.is_within_dest(&target) {
                warn!(name = %node.name, "skipping unsafe path");
                report.unsafe_paths.push(node.name.clone());
                continue;
            }

            match node.kind {
                NodeKind::Folder => {
                    if !target.exists() {
                        if !self.options.dry_run {
                            create_dir(&target)?;
                        }
                        report.dirs_created += 1;
                    }
                    for child in node.children.iter().rev() {
                        stack.push((target.clone(), child));
                    }
                }
                NodeKind::File => {
                    if target.exists() && self.options.on_exists == OnExists::Skip {
                        debug!(path = %target.display(), "skipping existing file");
                        report.skipped.push(target);
                        continue;
                    }
                    if !self.options.dry_run {
                        if let Some(parent) = target.parent() {
                            if !parent.as_os_str().is_empty() && !parent.exists() {
                                create_dir(parent)?;
                            }
                        }
                        fs::write(&target, "").map_err(|e| ApplicationError::CreateFailed {
                            path: target.clone(),
                            source: e,
                        })?;
                    }
                    report.files_created += 1;
                }
            }
        }

        debug!(
            dirs = report.dirs_created,
            files = report.files_created,
            skipped = report.skipped.len(),
            "materialization finished"
        );
        Ok(report)
    }

    /// Traversal guard: the target must stay inside the destination root.
    fn is_within_dest(&self, target: &Path) -> bool {
        match pathdiff::diff_paths(target, &self.dest) {
            Some(relative) => !relative.is_absolute() && !relative.starts_with(".."),
            None => false,
        }
    }
}

fn create_dir(path: &Path) -> ApplicationResult<()> {
    fs::create_dir_all(path).map_err(|e| ApplicationError::CreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve `.` and `..` components textually, without touching the
/// filesystem, so the traversal guard sees through dotted segments.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_dotted_path_when_normalizing_then_resolves_textually() {
        assert_eq!(
            lexical_normalize(Path::new("out/a/../b/./c")),
            PathBuf::from("out/b/c")
        );
        assert_eq!(
            lexical_normalize(Path::new("out/a/../../x")),
            PathBuf::from("x")
        );
        assert_eq!(lexical_normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn given_escaping_target_when_guarding_then_rejected() {
        let materializer = Materializer::new("out", MaterializeOptions::default());

        assert!(materializer.is_within_dest(Path::new("out/src")));
        assert!(materializer.is_within_dest(Path::new("out")));
        assert!(!materializer.is_within_dest(Path::new("elsewhere/src")));
        assert!(!materializer.is_within_dest(Path::new("x")));
        assert!(!materializer.is_within_dest(Path::new("/etc/passwd")));
    }
}
