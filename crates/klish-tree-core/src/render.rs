// crates/klish-tree-core/src/render.rs - ASCII tree view of a definition document
//
// Produces one line per visible VIEW/COMMAND:
//
// ```text
// └── configure
//     ├── interface : set interface
//     └── mtu
// ```
//
// VISIBILITY:
// - Only VIEW and COMMAND nodes are drawn
// - A SWITCH is never drawn; its VIEW/COMMAND children take its place in the
//   parent's child list (one level, nested switches are not pulled up)
// - Filter-marked nodes are dropped after flattening, together with their subtrees

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::node::{Node, NodeKind};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Emit a blank line after each top-level view's block
    #[serde(default = "default_true")]
    pub separate_views: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            separate_views: true,
        }
    }
}

/// Children of `node` as the tree view shows them.
///
/// Recomputed on every call; it depends only on the nodes' own attributes.
pub fn visible_children(node: &Node) -> Vec<&Node> {
    let mut flattened = Vec::with_capacity(node.children().len());

    for child in node.children() {
        match child.kind() {
            NodeKind::View | NodeKind::Command => flattened.push(child),
            NodeKind::Switch => flattened.extend(
                child
                    .children()
                    .iter()
                    .filter(|grandchild| grandchild.is_view() || grandchild.is_command()),
            ),
            NodeKind::Other => {}
        }
    }

    flattened.retain(|child| !child.is_filter());
    flattened
}

/// Lazily rendered lines of a single subtree, in pre-order
pub struct TreeLines<'a> {
    stack: Vec<Frame<'a>>,
}

struct Frame<'a> {
    node: &'a Node,
    prefix: String,
    is_last: bool,
}

impl<'a> Iterator for TreeLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let Frame {
            node,
            prefix,
            is_last,
        } = self.stack.pop()?;

        let line = format_line(&prefix, is_last, node);

        let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
        let children = visible_children(node);
        let count = children.len();

        // Reversed so the first child is popped next
        self.stack
            .extend(children.into_iter().enumerate().rev().map(|(index, child)| Frame {
                node: child,
                prefix: child_prefix.clone(),
                is_last: index + 1 == count,
            }));

        Some(line)
    }
}

fn format_line(prefix: &str, is_last: bool, node: &Node) -> String {
    let connector = if is_last { LAST_BRANCH } else { BRANCH };
    let help = node.help();

    if help.is_empty() {
        format!("{prefix}{connector}{}", node.name())
    } else {
        format!("{prefix}{connector}{} : {help}", node.name())
    }
}

/// Render one view (or command) and everything visible beneath it.
///
/// The starting node is drawn as a last sibling with an empty prefix. A node
/// that is not renderable itself yields no lines.
pub fn render_view(view: &Node) -> TreeLines<'_> {
    let stack = if view.is_renderable() {
        vec![Frame {
            node: view,
            prefix: String::new(),
            is_last: true,
        }]
    } else {
        Vec::new()
    };

    TreeLines { stack }
}

/// Tree view of every top-level view in a document
///
/// ```
/// use klish_tree_core::node::Node;
/// use klish_tree_core::render::TreeRenderer;
///
/// let root = Node::document().with_child(
///     Node::view("main").with_child(Node::command("exit").with_help("Leave the CLI")),
/// );
///
/// let text = TreeRenderer::new(&root).separate_views(false).render();
/// assert_eq!(text, "└── main\n    └── exit : Leave the CLI\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    root: &'a Node,
    config: RenderConfig,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self {
            root,
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set whether a blank line follows each top-level view (default: true).
    pub fn separate_views(mut self, separate: bool) -> Self {
        self.config.separate_views = separate;
        self
    }

    /// Lines for all top-level views, produced on demand.
    ///
    /// Each call walks the document again from the root.
    pub fn lines(self) -> impl Iterator<Item = String> + 'a {
        let separate = self.config.separate_views;
        let views = self.root.children().iter().filter(|child| child.is_view());
        debug!(views = views.clone().count(), "rendering command tree");

        views.flat_map(move |view| {
            trace!(view = view.name(), "rendering view");
            render_view(view).chain(separate.then(String::new))
        })
    }

    /// Render to a string, one newline-terminated line per entry
    pub fn render(&self) -> String {
        self.lines().map(|line| line + "\n").collect()
    }
}

impl fmt::Display for TreeRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render a document with the default configuration
pub fn render(root: &Node) -> impl Iterator<Item = String> + '_ {
    TreeRenderer::new(root).lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn configure_view() -> Node {
        Node::view("configure").with_children([
            Node::command("interface").with_help("set interface"),
            Node::switch().with_children([
                Node::command("vlan").with_filter(true),
                Node::command("mtu"),
            ]),
        ])
    }

    fn main_view() -> Node {
        Node::view("main").with_children([
            Node::command("show").with_help("Show running state").with_children([
                Node::command("interfaces").with_help("Show interfaces"),
                Node::command("version"),
            ]),
            Node::command("exit"),
        ])
    }

    fn lines_of(root: &Node) -> Vec<String> {
        render(root).collect()
    }

    #[test]
    fn test_switch_flattened_and_filter_hidden() {
        let root = Node::document().with_child(configure_view());
        assert_eq!(
            lines_of(&root),
            vec![
                "└── configure",
                "    ├── interface : set interface",
                "    └── mtu",
                "",
            ]
        );
    }

    #[test]
    fn test_nested_prefixes() {
        let root = Node::document().with_child(main_view());
        assert_eq!(
            lines_of(&root),
            vec![
                "└── main",
                "    ├── show : Show running state",
                "    │   ├── interfaces : Show interfaces",
                "    │   └── version",
                "    └── exit",
                "",
            ]
        );
    }

    #[test]
    fn test_each_top_level_view_followed_by_blank_line() {
        let root = Node::document().with_children([
            main_view(),
            Node::command("stray"),
            configure_view(),
        ]);
        let lines = lines_of(&root);

        assert_eq!(lines.iter().filter(|line| line.is_empty()).count(), 2);
        assert_eq!(lines[0], "└── main");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "└── configure");
        assert!(!lines.iter().any(|line| line.contains("stray")));
    }

    #[test]
    fn test_filtered_top_level_view_renders_only_separator() {
        let root = Node::document().with_child(Node::view("hidden").with_filter(true));
        assert_eq!(lines_of(&root), vec![""]);
    }

    #[test]
    fn test_filtered_subtree_is_skipped() {
        let view = Node::view("main").with_children([
            Node::command("show"),
            Node::command("grep")
                .with_filter(true)
                .with_child(Node::command("pattern")),
        ]);
        let lines: Vec<String> = render_view(&view).collect();
        assert_eq!(lines, vec!["└── main", "    └── show"]);
    }

    #[test]
    fn test_nested_switch_not_flattened() {
        let view = Node::view("main").with_child(
            Node::switch().with_children([
                Node::command("outer"),
                Node::switch().with_child(Node::command("inner")),
            ]),
        );
        let lines: Vec<String> = render_view(&view).collect();
        assert_eq!(lines, vec!["└── main", "    └── outer"]);
    }

    #[test]
    fn test_other_nodes_hide_their_subtrees() {
        let view = Node::view("main").with_children([
            Node::other().with_child(Node::command("buried")),
            Node::command("visible"),
        ]);
        let lines: Vec<String> = render_view(&view).collect();
        assert_eq!(lines, vec!["└── main", "    └── visible"]);
    }

    #[test]
    fn test_visible_children_order() {
        let view = Node::view("main").with_children([
            Node::command("a"),
            Node::switch().with_children([
                Node::command("b"),
                Node::other(),
                Node::view("c"),
                Node::command("d").with_filter(true),
            ]),
            Node::command("e"),
        ]);
        let names: Vec<&str> = visible_children(&view).into_iter().map(Node::name).collect();
        assert_eq!(names, vec!["a", "b", "c", "e"]);
    }

    #[test]
    fn test_no_trailing_separator_without_help() {
        let view = Node::view("main").with_child(Node::command("exit").with_help(""));
        let lines: Vec<String> = render_view(&view).collect();
        assert_eq!(lines[1], "    └── exit");
    }

    #[test]
    fn test_unnamed_nodes_use_sentinels() {
        let view = Node::new(NodeKind::View).with_child(Node::new(NodeKind::Command));
        let lines: Vec<String> = render_view(&view).collect();
        assert_eq!(lines, vec!["└── <unnamed-view>", "    └── <unnamed-command>"]);
    }

    #[test]
    fn test_render_string_and_display_agree() {
        let root = Node::document().with_children([main_view(), configure_view()]);
        let renderer = TreeRenderer::new(&root);
        assert_eq!(renderer.render(), renderer.to_string());
        assert!(renderer.render().ends_with("└── mtu\n\n"));
    }

    #[test]
    fn test_lines_restart_from_root() {
        let root = Node::document().with_child(main_view());
        let renderer = TreeRenderer::new(&root).separate_views(false);
        let first: Vec<String> = renderer.lines().collect();
        let second: Vec<String> = renderer.lines().collect();
        assert_eq!(first, second);
        assert_eq!(first.last().map(String::as_str), Some("    └── exit"));
    }

    fn entries() -> impl Strategy<Value = Vec<(String, bool)>> {
        prop::collection::vec(("[a-z]{1,6}", any::<bool>()), 0..10)
    }

    proptest! {
        #[test]
        fn prop_switch_is_transparent(entries in entries()) {
            let flat = Node::view("v").with_children(
                entries.iter().map(|(name, _)| Node::command(name.clone())),
            );

            // Wrap each run of flagged entries in its own switch
            let mut grouped = Node::view("v");
            let mut run: Vec<Node> = Vec::new();
            for (name, wrap) in &entries {
                if *wrap {
                    run.push(Node::command(name.clone()));
                    continue;
                }
                if !run.is_empty() {
                    grouped = grouped.with_child(Node::switch().with_children(run.drain(..)));
                }
                grouped = grouped.with_child(Node::command(name.clone()));
            }
            if !run.is_empty() {
                grouped = grouped.with_child(Node::switch().with_children(run.drain(..)));
            }

            let expected: Vec<String> = render_view(&flat).collect();
            let actual: Vec<String> = render_view(&grouped).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_only_last_sibling_closes_branch(count in 1usize..8, hidden in any::<bool>()) {
            let mut view = Node::view("v")
                .with_children((0..count).map(|index| Node::command(format!("c{index}"))));
            if hidden {
                view = view.with_child(Node::command("filtered").with_filter(true));
            }

            let lines: Vec<String> = render_view(&view).skip(1).collect();
            prop_assert_eq!(lines.len(), count);
            for (index, line) in lines.iter().enumerate() {
                let connector = if index + 1 == count { LAST_BRANCH } else { BRANCH };
                prop_assert_eq!(line, &format!("{SPACE}{connector}c{index}"));
            }
        }
    }
}
