// crates/klish-tree-core/src/node.rs - Command-definition tree data model
//
// A Klish definition document is a tree of VIEW, COMMAND and SWITCH elements
// carrying `name`, `help` and `filter` attributes. The tree is built once by
// whoever reads the source document and is only ever read here.
//
// ATTRIBUTE DEFAULTS:
// - name:   "<unnamed-view>" for views, "<unnamed-command>" for everything else
// - help:   empty string
// - filter: false unless the source literal is exactly "true"

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Name reported for a view without a `name` attribute
pub const UNNAMED_VIEW: &str = "<unnamed-view>";

/// Name reported for a command (or any non-view node) without a `name` attribute
pub const UNNAMED_COMMAND: &str = "<unnamed-command>";

/// Structural role of a node in the definition tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// Named scope; resets the search path for its descendants
    #[serde(alias = "view")]
    View,
    /// Invocable command; contributes one path segment
    #[serde(alias = "command")]
    Command,
    /// Transparent grouping of views/commands
    #[serde(alias = "switch")]
    Switch,
    /// Anything else; only traversed for its descendants
    #[default]
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Resolve a raw element tag to a kind.
    ///
    /// Accepts bare tags (`VIEW`), Clark notation (`{https://klish.libcode.org/klish3}VIEW`)
    /// and prefixed names (`k:VIEW`). Matching is case-insensitive.
    ///
    /// ```
    /// use klish_tree_core::node::NodeKind;
    ///
    /// assert_eq!(NodeKind::from_tag("{https://klish.libcode.org/klish3}COMMAND"), NodeKind::Command);
    /// assert_eq!(NodeKind::from_tag("k:SWITCH"), NodeKind::Switch);
    /// assert_eq!(NodeKind::from_tag("PTYPE"), NodeKind::Other);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        let local = tag.rsplit_once('}').map_or(tag, |(_, local)| local);
        let local = local.rsplit_once(':').map_or(local, |(_, local)| local);

        if local.eq_ignore_ascii_case("VIEW") {
            Self::View
        } else if local.eq_ignore_ascii_case("COMMAND") {
            Self::Command
        } else if local.eq_ignore_ascii_case("SWITCH") {
            Self::Switch
        } else {
            Self::Other
        }
    }

    /// Tag name as it appears in Klish documents
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Command => "COMMAND",
            Self::Switch => "SWITCH",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One element of the command-definition tree
///
/// Attributes are stored as they were found in the source; absent values are
/// resolved to their defaults by the accessors, so reading never fails.
/// Children keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    help: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_filter",
        skip_serializing_if = "std::ops::Not::not"
    )]
    filter: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Create a node of the given kind with no attributes and no children
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Document root: an inert container for top-level views
    pub fn document() -> Self {
        Self::new(NodeKind::Other)
    }

    pub fn view<S: Into<String>>(name: S) -> Self {
        Self::new(NodeKind::View).with_name(name)
    }

    pub fn command<S: Into<String>>(name: S) -> Self {
        Self::new(NodeKind::Command).with_name(name)
    }

    pub fn switch() -> Self {
        Self::new(NodeKind::Switch)
    }

    pub fn other() -> Self {
        Self::new(NodeKind::Other)
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Mark (or unmark) this node as a pipe/filter command
    pub fn with_filter(mut self, filter: bool) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Node name, or the sentinel for its kind when the attribute is absent
    pub fn name(&self) -> &str {
        match (&self.name, self.kind) {
            (Some(name), _) => name,
            (None, NodeKind::View) => UNNAMED_VIEW,
            (None, _) => UNNAMED_COMMAND,
        }
    }

    /// Help text, empty when absent
    pub fn help(&self) -> &str {
        self.help.as_deref().unwrap_or("")
    }

    /// Whether this node is a pipe/filter command
    pub fn is_filter(&self) -> bool {
        self.filter
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_view(&self) -> bool {
        self.kind == NodeKind::View
    }

    pub fn is_command(&self) -> bool {
        self.kind == NodeKind::Command
    }

    pub fn is_switch(&self) -> bool {
        self.kind == NodeKind::Switch
    }

    /// Whether the tree view may show this node: a view or command that is not a filter
    pub fn is_renderable(&self) -> bool {
        matches!(self.kind, NodeKind::View | NodeKind::Command) && !self.filter
    }
}

/// Accept both the source literal ("true"/"false") and a plain boolean.
/// Any string other than exactly "true" leaves the flag unset.
fn deserialize_filter<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FilterFlag {
        Flag(bool),
        Literal(String),
    }

    Ok(match FilterFlag::deserialize(deserializer)? {
        FilterFlag::Flag(flag) => flag,
        FilterFlag::Literal(literal) => literal == "true",
    })
}
