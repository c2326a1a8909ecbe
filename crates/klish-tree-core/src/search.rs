// crates/klish-tree-core/src/search.rs - Command search with breadcrumb paths
//
// Walks the definition tree depth-first (pre-order) and reports every command
// whose name or help text contains the pattern, together with the path that
// leads to it.
//
// PATH RULES:
// - Entering a VIEW replaces the path with `[view_name]`
// - Entering a COMMAND appends its name; the extended path is both the match
//   location and the path handed to the command's own children
// - Any other node passes the path through unchanged
//
// Filter-marked commands are searched like any other command. Hiding them is
// a rendering concern only.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::node::{Node, NodeKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("No search pattern provided")]
    EmptyPattern,
}

pub type SearchResult<T> = Result<T, SearchError>;

/// A command that satisfied the search pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Breadcrumb from the enclosing view down to (and including) the command
    pub path: Vec<String>,
    pub name: String,
    pub help: String,
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Stop after this many matches. 0 means unlimited.
    #[serde(default)]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 0 }
    }
}

/// Pattern search over a definition tree
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    config: SearchConfig,
}

impl PathSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Find all commands whose name or help contains `pattern`, case-insensitively.
    ///
    /// The pattern is trimmed first; an empty result of trimming is reported as
    /// [`SearchError::EmptyPattern`] without walking the tree. Matches come back
    /// in document pre-order with no deduplication.
    pub fn search(&self, root: &Node, pattern: &str) -> SearchResult<Vec<Match>> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyPattern);
        }

        let needle = trimmed.to_lowercase();
        debug!(pattern = trimmed, "searching command tree");

        let mut walker = Walker {
            needle: &needle,
            limit: self.config.max_results,
            matches: Vec::new(),
        };
        walker.walk(root, &[]);

        debug!(matches = walker.matches.len(), "search finished");
        Ok(walker.matches)
    }
}

/// Search with the default configuration
///
/// ```
/// use klish_tree_core::node::Node;
/// use klish_tree_core::search::search;
///
/// let root = Node::document().with_child(
///     Node::view("main").with_child(Node::command("show").with_help("Show information")),
/// );
///
/// let matches = search(&root, "  INFO ").unwrap();
/// assert_eq!(matches[0].path, vec!["main", "show"]);
/// ```
pub fn search(root: &Node, pattern: &str) -> SearchResult<Vec<Match>> {
    PathSearch::default().search(root, pattern)
}

/// Per-query traversal state. The path is never stored here; each call
/// receives the path in scope and derives its children's path from it.
struct Walker<'p> {
    needle: &'p str,
    limit: usize,
    matches: Vec<Match>,
}

impl Walker<'_> {
    fn is_full(&self) -> bool {
        self.limit != 0 && self.matches.len() >= self.limit
    }

    fn walk(&mut self, node: &Node, path: &[String]) {
        if self.is_full() {
            return;
        }

        let scoped: Vec<String>;
        let child_path = match node.kind() {
            NodeKind::View => {
                scoped = vec![node.name().to_string()];
                &scoped[..]
            }
            NodeKind::Command => {
                scoped = path
                    .iter()
                    .cloned()
                    .chain(std::iter::once(node.name().to_string()))
                    .collect();

                if self.is_match(node) {
                    trace!(path = ?scoped, "command matched");
                    self.matches.push(Match {
                        path: scoped.clone(),
                        name: node.name().to_string(),
                        help: node.help().to_string(),
                    });
                }
                &scoped[..]
            }
            NodeKind::Switch | NodeKind::Other => path,
        };

        for child in node.children() {
            if self.is_full() {
                break;
            }
            self.walk(child, child_path);
        }
    }

    fn is_match(&self, node: &Node) -> bool {
        let help = node.help();
        node.name().to_lowercase().contains(self.needle)
            || (!help.is_empty() && help.to_lowercase().contains(self.needle))
    }
}
