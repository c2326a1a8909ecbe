// crates/klish-tree-core/examples/playground.rs
// Run with: cargo run --example playground

use anyhow::Result;
use klish_tree_core::node::Node;
use klish_tree_core::{ConfigManager, PathSearch, SearchError, TreeRenderer, logging};
use serde_json::json;

fn main() -> Result<()> {
    let config = ConfigManager::load_config(None)?;
    logging::init_with_config(&config.logging);

    // Stand-in for whatever reads the XML definitions
    let root: Node = serde_json::from_value(json!({
        "children": [
            {
                "kind": "VIEW",
                "name": "main",
                "children": [
                    {
                        "kind": "COMMAND",
                        "name": "show",
                        "help": "Show running state",
                        "children": [
                            { "kind": "COMMAND", "name": "interfaces", "help": "Show interfaces" },
                            { "kind": "COMMAND", "name": "version" }
                        ]
                    },
                    { "kind": "COMMAND", "name": "configure", "help": "Enter configuration mode" },
                    {
                        "kind": "SWITCH",
                        "children": [
                            { "kind": "COMMAND", "name": "grep", "help": "Filter lines", "filter": "true" },
                            { "kind": "COMMAND", "name": "exit", "help": "Leave the CLI" }
                        ]
                    }
                ]
            },
            {
                "kind": "VIEW",
                "name": "configure",
                "children": [
                    { "kind": "COMMAND", "name": "interface", "help": "set interface" },
                    {
                        "kind": "SWITCH",
                        "children": [
                            { "kind": "COMMAND", "name": "vlan", "filter": "true" },
                            { "kind": "COMMAND", "name": "mtu" }
                        ]
                    }
                ]
            }
        ]
    }))?;

    println!("=== Tree ===");
    print!("{}", TreeRenderer::new(&root).with_config(config.render));

    let engine = PathSearch::new(config.search);
    for pattern in ["show", "filter", "set", "   "] {
        println!("=== Search: {pattern:?} ===");
        match engine.search(&root, pattern) {
            Ok(matches) if matches.is_empty() => println!("No matches"),
            Ok(matches) => {
                for (idx, m) in matches.iter().enumerate() {
                    println!("{}. {}", idx + 1, m.path.join(" -> "));
                    if !m.help.is_empty() {
                        println!("   help: {}", m.help);
                    }
                }
            }
            Err(SearchError::EmptyPattern) => println!("Please provide a non-empty search term."),
        }
        println!();
    }

    Ok(())
}
