//! The cascade: compiled sheets, matching and merging.
//!
//! - [`CompiledStyleSheet`]: an immutable, ordered rule set built once from source
//! - [`CompiledStyleSheet::match_node`]: computes the [`Style`] of one node
//! - [`merge_styles`]: merges declaration layers, lowest precedence first
//!
//! ## Merge Algorithm
//!
//! 1. Later layers overwrite earlier ones, property by property
//! 2. A relative `font-size` keyword scales the last absolute size seen in
//!    the layers (or [`CascadeConfig::base_font_size`])
//! 3. `opacity` scales the alpha of `color`, `background-color` and
//!    `text-color`, unless that alpha is already zero
//! 4. `var(--name)` values are resolved, falling back through the layers
//!    when a reference does not resolve
//!
//! Opacity runs before variable resolution, so a color that arrives through
//! `var()` keeps its own alpha.

use crate::config::CascadeConfig;
use crate::declarations::{OPACITY_TARGETS, Property};
use crate::error::Diagnostic;
use crate::matching::matches_complex;
use crate::node::StyleNode;
use crate::parser::{CompiledRule, compile_style_sheet};
use crate::types::{DeclarationBlock, Style, Value};

/// An immutable rule set, ready to be matched against nodes.
///
/// Recompiling means building a new sheet; see
/// [`StyleSheetHandle`](crate::handle::StyleSheetHandle) for swapping one in
/// while other threads are matching.
///
/// # Examples
///
/// ```rust
/// use dcss::{CompiledStyleSheet, NodeTree};
///
/// let sheet = CompiledStyleSheet::new(
///     "class { font-size: 10 } :selected { font-size: large }",
/// );
///
/// let mut tree = NodeTree::new();
/// let diagram = tree.add_root("diagram");
/// let class = tree.add_child(diagram, "class");
/// tree.add_state(class, "selected");
///
/// let style = sheet.match_node(&tree.node(class));
/// let size = style.font_size().unwrap();
/// assert!((size - 12.0).abs() < 1e-9);
/// ```
#[derive(Debug, Default)]
pub struct CompiledStyleSheet {
    rules: Vec<CompiledRule>,
    diagnostics: Vec<Diagnostic>,
    config: CascadeConfig,
}

impl CompiledStyleSheet {
    /// Compiles a single source with the default configuration.
    pub fn new(source: &str) -> Self {
        Self::from_sources([source], CascadeConfig::default())
    }

    /// Compiles several sources as one sheet. Later sources win specificity ties.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = &'a str>,
        config: CascadeConfig,
    ) -> Self {
        let compiled = compile_style_sheet(sources);
        Self {
            rules: compiled.rules,
            diagnostics: compiled.diagnostics,
            config,
        }
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Rules and declarations dropped during compilation.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// The rules matching `node`, lowest precedence first.
    pub fn matching_rules<N: StyleNode>(&self, node: &N) -> Vec<&CompiledRule> {
        let mut matched: Vec<&CompiledRule> = self
            .rules
            .iter()
            .filter(|rule| matches_complex(&rule.selector, node))
            .collect();

        matched.sort_by(|a, b| {
            a.specificity
                .cmp(&b.specificity)
                .then(a.order.cmp(&b.order))
        });
        matched
    }

    /// Computes the style of `node`.
    pub fn match_node<N: StyleNode>(&self, node: &N) -> Style {
        let matched = self.matching_rules(node);
        let layers: Vec<&DeclarationBlock> =
            matched.iter().map(|rule| rule.declarations.as_ref()).collect();
        let style = merge_styles_with(&layers, &self.config);

        log::trace!(
            "CASCADE: {} matched {} rules -> {} properties",
            node.name(),
            matched.len(),
            style.len()
        );
        style
    }
}

/// Merges declaration layers, lowest precedence first, with the default
/// configuration.
pub fn merge_styles(layers: &[&DeclarationBlock]) -> Style {
    merge_styles_with(layers, &CascadeConfig::default())
}

pub fn merge_styles_with(layers: &[&DeclarationBlock], config: &CascadeConfig) -> Style {
    let mut merged = Style::default();
    let mut absolute_font_size = None;

    for layer in layers {
        if let Some(Value::Number(size)) = layer.get(&Property::FontSize) {
            absolute_font_size = Some(*size);
        }
        for declaration in layer.iter() {
            merged.insert(declaration.property.clone(), declaration.value.clone());
        }
    }

    let absolute_font_size = absolute_font_size.unwrap_or(config.base_font_size);
    scale_font_size(&mut merged, absolute_font_size);
    apply_opacity(&mut merged);

    let mut resolved = resolve_variables(&merged, layers);
    scale_font_size(&mut resolved, absolute_font_size);
    resolved
}

/// Replaces `var()` values in `style` using `layers` for fallback.
///
/// For each property holding a variable, the layers are searched from the
/// highest precedence down. A concrete value resolves the property. A
/// variable is looked up once in `style` and reinterpreted in the
/// property's domain; if that fails the search continues. Properties that
/// never resolve are left out.
pub fn resolve_variables(style: &Style, layers: &[&DeclarationBlock]) -> Style {
    let mut resolved = Style::default();

    for (property, value) in style.iter() {
        let Value::Variable(var) = value else {
            resolved.insert(property.clone(), value.clone());
            continue;
        };

        match resolve_from_layers(property, style, layers) {
            Some(value) => resolved.insert(property.clone(), value),
            None => log::debug!("dropping {}: var({}) does not resolve", property, var.name),
        }
    }
    resolved
}

fn resolve_from_layers(
    property: &Property,
    style: &Style,
    layers: &[&DeclarationBlock],
) -> Option<Value> {
    layers
        .iter()
        .rev()
        .filter_map(|layer| layer.get(property))
        .find_map(|value| match value {
            Value::Variable(var) => style
                .get(&Property::Custom(var.name.clone()))
                .and_then(|referenced| property.coerce(referenced)),
            concrete => Some(concrete.clone()),
        })
}

fn scale_font_size(style: &mut Style, absolute: f64) {
    if let Some(Value::RelativeSize(size)) = style.get(&Property::FontSize) {
        let scaled = absolute * size.scale();
        style.insert(Property::FontSize, Value::Number(scaled));
    }
}

fn apply_opacity(style: &mut Style) {
    let Some(opacity) = style.opacity() else {
        return;
    };

    for property in &OPACITY_TARGETS {
        if let Some(color) = style.color(property).filter(|c| c.a > 0.0) {
            style.insert(property.clone(), Value::Color(color.with_alpha(color.a * opacity)));
        }
    }
}
