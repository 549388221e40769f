use std::collections::BTreeMap;

use crate::declarations::Property;
use crate::types::color::Color;
use crate::types::value::Value;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: Property,
    pub value: Value,
}

impl Declaration {
    pub fn new(property: Property, value: Value) -> Self {
        Self { property, value }
    }
}

/// The declarations of one rule, in source order.
///
/// Declaring a property twice keeps only the later value, at the later
/// position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBlock {
    declarations: Vec<Declaration>,
}

impl DeclarationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, declaration: Declaration) {
        self.declarations
            .retain(|d| d.property != declaration.property);
        self.declarations.push(declaration);
    }

    pub fn get(&self, property: &Property) -> Option<&Value> {
        self.declarations
            .iter()
            .find(|d| &d.property == property)
            .map(|d| &d.value)
    }

    pub fn contains(&self, property: &Property) -> bool {
        self.get(property).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<Declaration> for DeclarationBlock {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut block = DeclarationBlock::new();
        for declaration in iter {
            block.insert(declaration);
        }
        block
    }
}

impl From<Style> for DeclarationBlock {
    fn from(style: Style) -> Self {
        style
            .values
            .into_iter()
            .map(|(property, value)| Declaration::new(property, value))
            .collect()
    }
}

/// The resolved style of one node.
///
/// Produced by the cascade; never contains [`Value::Variable`]. Properties
/// that are absent should fall back to the renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    values: BTreeMap<Property, Value>,
}

impl Style {
    pub fn get(&self, property: &Property) -> Option<&Value> {
        self.values.get(property)
    }

    /// Looks a property up by its CSS name.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        Property::parse(name).ok().and_then(|p| self.values.get(&p))
    }

    pub fn contains(&self, property: &Property) -> bool {
        self.values.contains_key(property)
    }

    pub fn color(&self, property: &Property) -> Option<Color> {
        self.get(property).and_then(Value::as_color)
    }

    pub fn number(&self, property: &Property) -> Option<f64> {
        self.get(property).and_then(Value::as_number)
    }

    pub fn font_size(&self) -> Option<f64> {
        self.number(&Property::FontSize)
    }

    pub fn opacity(&self) -> Option<f64> {
        self.number(&Property::Opacity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Property, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, property: Property, value: Value) {
        self.values.insert(property, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_declaration_in_block_wins() {
        let block: DeclarationBlock = [
            Declaration::new(Property::LineWidth, Value::Number(1.0)),
            Declaration::new(Property::Opacity, Value::Number(0.5)),
            Declaration::new(Property::LineWidth, Value::Number(2.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(block.len(), 2);
        assert_eq!(block.get(&Property::LineWidth), Some(&Value::Number(2.0)));
        assert_eq!(
            block.iter().last().map(|d| &d.property),
            Some(&Property::LineWidth)
        );
    }

    #[test]
    fn style_lookup_by_name() {
        let mut style = Style::default();
        style.insert(Property::FontSize, Value::Number(12.0));
        assert_eq!(style.get_named("font-size"), Some(&Value::Number(12.0)));
        assert_eq!(style.font_size(), Some(12.0));
        assert_eq!(style.get_named("nope"), None);
    }
}
