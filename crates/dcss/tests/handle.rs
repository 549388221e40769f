use std::thread;

use dcss::declarations::Property;
use dcss::{CompiledStyleSheet, NodeTree, StyleSheetHandle};

#[test]
fn test_swap_is_seen_by_later_matches() {
    let handle = StyleSheetHandle::new(CompiledStyleSheet::new("class { line-width: 1 }"));
    let mut tree = NodeTree::new();
    let class = tree.add_root("class");

    let snapshot = handle.load();
    let old = handle.recompile(["class { line-width: 2 }"]);

    assert_eq!(old.rules().len(), 1);
    assert_eq!(
        snapshot.match_node(&tree.node(class)).number(&Property::LineWidth),
        Some(1.0)
    );
    assert_eq!(
        handle.match_node(&tree.node(class)).number(&Property::LineWidth),
        Some(2.0)
    );
}

#[test]
fn test_recompile_keeps_config() {
    let handle = StyleSheetHandle::new(CompiledStyleSheet::from_sources(
        [],
        dcss::CascadeConfig::with_base_font_size(20.0),
    ));
    handle.recompile(["* { font-size: medium }"]);

    let mut tree = NodeTree::new();
    let node = tree.add_root("class");
    assert_eq!(handle.match_node(&tree.node(node)).font_size(), Some(20.0));
}

#[test]
fn test_readers_see_whole_sheets() {
    let handle = StyleSheetHandle::new(CompiledStyleSheet::new(
        "class { line-width: 1; opacity: 1 }",
    ));
    let mut tree = NodeTree::new();
    let class = tree.add_root("class");
    let tree = &tree;

    thread::scope(|scope| {
        for _ in 0..4 {
            let handle = handle.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    let style = handle.match_node(&tree.node(class));
                    let width = style.number(&Property::LineWidth);
                    let opacity = style.opacity();
                    // Both properties always come from the same sheet.
                    assert!(
                        (width, opacity) == (Some(1.0), Some(1.0))
                            || (width, opacity) == (Some(2.0), Some(0.5)),
                        "{width:?} {opacity:?}"
                    );
                }
            });
        }

        for i in 0..50 {
            let css = if i % 2 == 0 {
                "class { line-width: 2; opacity: 0.5 }"
            } else {
                "class { line-width: 1; opacity: 1 }"
            };
            handle.recompile([css]);
        }
    });
}
