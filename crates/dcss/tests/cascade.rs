use dcss::declarations::Property;
use dcss::types::{Color, DeclarationBlock, Value};
use dcss::{CascadeConfig, CompiledStyleSheet, NodeId, NodeTree, merge_styles};

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value missing");
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

/// diagram > package > class
fn diagram_tree() -> (NodeTree, NodeId, NodeId, NodeId) {
    let mut tree = NodeTree::new();
    let diagram = tree.add_root("diagram");
    let package = tree.add_child(diagram, "package");
    let class = tree.add_child(package, "class");
    (tree, diagram, package, class)
}

#[test]
fn test_relative_font_size_scales_matched_absolute() {
    let sheet = CompiledStyleSheet::new("class { font-size: 10 } :selected { font-size: large }");
    let (mut tree, _, _, class) = diagram_tree();
    tree.add_state(class, "selected");

    approx(sheet.match_node(&tree.node(class)).font_size(), 12.0);
}

#[test]
fn test_relative_font_size_without_absolute_uses_config() {
    let sheet = CompiledStyleSheet::from_sources(
        [":selected { font-size: x-small }"],
        CascadeConfig::with_base_font_size(20.0),
    );
    let (mut tree, _, _, class) = diagram_tree();
    tree.add_state(class, "selected");

    approx(sheet.match_node(&tree.node(class)).font_size(), 15.0);
}

#[test]
fn test_higher_specificity_wins_regardless_of_order() {
    let sheet = CompiledStyleSheet::new(
        r#"
        package class { line-width: 3 }
        class { line-width: 1 }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.number(&Property::LineWidth), Some(3.0));
}

#[test]
fn test_equal_specificity_later_wins() {
    let sheet = CompiledStyleSheet::new(
        r#"
        class { color: red; line-width: 1 }
        class { color: blue }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.color(&Property::Color), Some(Color::rgb8(0, 0, 255)));
    assert_eq!(style.number(&Property::LineWidth), Some(1.0));
}

#[test]
fn test_later_source_wins_ties() {
    let sheet = CompiledStyleSheet::from_sources(
        ["class { line-width: 1 }", "class { line-width: 2 }"],
        CascadeConfig::default(),
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.number(&Property::LineWidth), Some(2.0));
}

#[test]
fn test_matching_rules_are_sorted() {
    let sheet = CompiledStyleSheet::new(
        r#"
        :hover { }
        class { }
        * { }
        diagram class { }
        "#,
    );
    let (mut tree, _, _, class) = diagram_tree();
    tree.add_state(class, "hover");

    let orders: Vec<_> = sheet
        .matching_rules(&tree.node(class))
        .iter()
        .map(|r| r.order)
        .collect();
    assert_eq!(orders, vec![2, 1, 3, 0]);
}

#[test]
fn test_opacity_scales_alpha() {
    let sheet = CompiledStyleSheet::new(
        r#"
        class {
            color: rgba(0, 0, 255, 0.5);
            background-color: rgba(0, 0, 0, 0);
            text-color: black;
            opacity: 0.5;
        }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));

    let color = style.color(&Property::Color).unwrap();
    assert_eq!(color.a, 0.25);
    assert_eq!((color.r, color.g, color.b), (0.0, 0.0, 1.0));
    assert_eq!(style.color(&Property::BackgroundColor).map(|c| c.a), Some(0.0));
    assert_eq!(style.color(&Property::TextColor).map(|c| c.a), Some(0.5));
    assert_eq!(style.opacity(), Some(0.5));
}

#[test]
fn test_variable_resolves_from_same_node() {
    let sheet = CompiledStyleSheet::new(
        r#"
        * { --accent: red }
        class { color: var(--accent) }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.color(&Property::Color), Some(Color::rgb8(255, 0, 0)));
}

#[test]
fn test_variable_rules_at_different_specificities() {
    let sheet = CompiledStyleSheet::new(
        r#"
        * { --accent: red }
        package class { color: var(--accent) }
        class { color: var(--accent) }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.color(&Property::Color), Some(Color::rgb8(255, 0, 0)));

    // The winning rule's variable is undefined, so the weaker var() rule
    // supplies the value.
    let sheet = CompiledStyleSheet::new(
        r#"
        * { --accent: red }
        package class { color: var(--missing) }
        class { color: var(--accent) }
        "#,
    );
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.color(&Property::Color), Some(Color::rgb8(255, 0, 0)));
}

#[test]
fn test_unresolved_variable_falls_back_then_drops() {
    let sheet = CompiledStyleSheet::new(
        r#"
        class { color: green }
        package class { color: var(--missing); line-width: var(--missing) }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.color(&Property::Color), Some(Color::rgb8(0, 128, 0)));
    assert!(!style.contains(&Property::LineWidth));
}

#[test]
fn test_variable_with_wrong_domain_falls_back() {
    let sheet = CompiledStyleSheet::new(
        r#"
        class { --width: 2; --accent: not-a-color; line-width: 1; color: blue }
        class:hover { line-width: var(--width); color: var(--accent) }
        "#,
    );
    let (mut tree, _, _, class) = diagram_tree();
    tree.add_state(class, "hover");

    let style = sheet.match_node(&tree.node(class));
    assert_eq!(style.number(&Property::LineWidth), Some(2.0));
    assert_eq!(style.color(&Property::Color), Some(Color::rgb8(0, 0, 255)));
}

#[test]
fn test_no_variable_survives_the_cascade() {
    let sheet = CompiledStyleSheet::new(
        r#"
        * { --a: 3; --b: var(--a); --c: var(--nothing) }
        class { line-width: var(--b); font-size: var(--a); padding: var(--a) }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));

    assert!(style.iter().all(|(_, value)| !value.is_variable()));
    assert_eq!(style.font_size(), Some(3.0));
    assert!(style.contains(&Property::Padding));
    // A reference to a reference is not followed.
    assert!(!style.contains(&Property::LineWidth));
    assert!(!style.contains(&Property::Custom("--c".into())));
}

#[test]
fn test_merge_is_idempotent_without_opacity() {
    let sheet = CompiledStyleSheet::new(
        r#"
        * { --accent: #336699; font-size: 12 }
        class { color: var(--accent); font-size: small; dash-style: 4 2; text-decoration: underline }
        "#,
    );
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));

    let block = DeclarationBlock::from(style.clone());
    assert_eq!(merge_styles(&[&block]), style);
}

#[test]
fn test_unmatched_node_has_empty_style() {
    let sheet = CompiledStyleSheet::new("comment { color: red }");
    let (tree, diagram, _, _) = diagram_tree();
    assert!(sheet.match_node(&tree.node(diagram)).is_empty());
}

#[test]
fn test_style_lookup_by_name() {
    let sheet = CompiledStyleSheet::new("class { Font-Family: 'Noto Sans'; white-space: nowrap }");
    let (tree, _, _, class) = diagram_tree();
    let style = sheet.match_node(&tree.node(class));
    assert_eq!(
        style.get_named("font-family"),
        Some(&Value::Text("Noto Sans".to_string()))
    );
    assert!(style.get_named("white-space").is_some());
}
