// crates/klish-tree-core/src/lib.rs - Klish command-tree queries
//
// Two read-only queries over an already-built command-definition tree:
//
// - search: find commands by name/help substring, reported with their
//   breadcrumb path (view -> command -> sub-command)
// - render: ASCII tree view of views and commands, with SWITCH groups
//   flattened and pipe/filter commands hidden
//
// Both take `&Node` and never mutate it, so a single tree can be queried from
// several threads at once.

pub mod config;
pub mod logging;
pub mod node;
pub mod render;
pub mod search;

pub use config::{ConfigError, ConfigManager, KlishTreeConfig, LoggingConfig};
pub use node::{Node, NodeKind};
pub use render::{RenderConfig, TreeRenderer, render, render_view, visible_children};
pub use search::{Match, PathSearch, SearchConfig, SearchError, search};
